//! A small retained scene graph: nodes own ordered children, and masking is
//! a node property clipping everything the node and its children draw.

use crate::data_types::{GradientSpec, LineCap};
use crate::path::Path;
use crate::rendering::{DrawContext, FillRule, Paint, StateGuard, StrokeStyle};
use gpui::{Bounds, Hsla, Pixels};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayerId(usize);

/// Region a layer's output is clipped to.
#[derive(Clone, Debug, PartialEq)]
pub enum Mask {
    Rect(Bounds<Pixels>),
    /// The path's filled interior plus its stroke of `line_width`.
    Shape {
        path: Path,
        line_width: f32,
        line_cap: LineCap,
    },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShapeContent {
    pub path: Option<Path>,
    pub stroke_color: Option<Hsla>,
    pub fill_color: Option<Hsla>,
    pub line_width: f32,
    pub line_cap: LineCap,
}

#[derive(Clone, Debug, PartialEq)]
pub enum LayerContent {
    /// Draws nothing itself; groups children under one mask.
    Group,
    /// Covers the whole tree bounds. `None` paints nothing.
    Gradient(Option<GradientSpec>),
    Shape(ShapeContent),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    pub name: &'static str,
    pub content: LayerContent,
    pub mask: Option<Mask>,
    children: Vec<LayerId>,
}

impl Layer {
    pub fn children(&self) -> &[LayerId] {
        &self.children
    }
}

/// Arena of layers under a single root. Later children draw on top.
#[derive(Clone, Debug)]
pub struct LayerTree {
    layers: Vec<Layer>,
    bounds: Bounds<Pixels>,
}

impl LayerTree {
    const ROOT: LayerId = LayerId(0);

    pub fn new(bounds: Bounds<Pixels>) -> Self {
        Self {
            layers: vec![Layer {
                name: "root",
                content: LayerContent::Group,
                mask: None,
                children: Vec::new(),
            }],
            bounds,
        }
    }

    pub fn root(&self) -> LayerId {
        Self::ROOT
    }

    pub fn bounds(&self) -> Bounds<Pixels> {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Bounds<Pixels>) {
        self.bounds = bounds;
    }

    pub fn add_child(
        &mut self,
        parent: LayerId,
        name: &'static str,
        content: LayerContent,
    ) -> LayerId {
        let id = LayerId(self.layers.len());
        self.layers.push(Layer {
            name,
            content,
            mask: None,
            children: Vec::new(),
        });
        self.layers[parent.0].children.push(id);
        id
    }

    pub fn layer(&self, id: LayerId) -> &Layer {
        &self.layers[id.0]
    }

    pub fn layer_mut(&mut self, id: LayerId) -> &mut Layer {
        &mut self.layers[id.0]
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Paints the whole tree, parents before children.
    pub fn composite(&self, ctx: &mut dyn DrawContext) {
        self.paint_layer(Self::ROOT, ctx);
    }

    fn paint_layer(&self, id: LayerId, ctx: &mut dyn DrawContext) {
        let layer = self.layer(id);
        let mut ctx = StateGuard::new(ctx);

        match (&layer.mask, &layer.content) {
            (Some(Mask::Rect(rect)), _) => ctx.clip_to_rect(*rect),
            // Gradients are painted through their shape mask below.
            (Some(Mask::Shape { .. }), LayerContent::Gradient(_)) => {}
            (Some(Mask::Shape { path, .. }), _) => {
                tracing::warn!(layer = layer.name, "shape mask approximated by its bounds");
                if let Some(bounds) = path.bounds() {
                    ctx.clip_to_rect(bounds);
                }
            }
            (None, _) => {}
        }

        match &layer.content {
            LayerContent::Group | LayerContent::Gradient(None) => {}
            LayerContent::Gradient(Some(spec)) => {
                let paint = Paint::Gradient {
                    spec: spec.clone(),
                    rect: self.bounds,
                };
                match &layer.mask {
                    Some(Mask::Shape {
                        path,
                        line_width,
                        line_cap,
                    }) => {
                        ctx.fill_path(path, FillRule::NonZero, &paint);
                        if *line_width > 0.0 {
                            ctx.stroke_path(path, StrokeStyle::new(*line_width, *line_cap), &paint);
                        }
                    }
                    _ => ctx.fill_path(&Path::rect(self.bounds), FillRule::NonZero, &paint),
                }
            }
            LayerContent::Shape(shape) => {
                if let Some(path) = &shape.path {
                    if let Some(fill) = shape.fill_color {
                        ctx.fill_path(path, FillRule::NonZero, &Paint::Color(fill));
                    }
                    if let Some(stroke) = shape.stroke_color {
                        ctx.stroke_path(
                            path,
                            StrokeStyle::new(shape.line_width, shape.line_cap),
                            &Paint::Color(stroke),
                        );
                    }
                }
            }
        }

        for child in &layer.children {
            self.paint_layer(*child, &mut *ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::{DrawCommand, RecordingContext};
    use gpui::{px, Point, Size};

    fn bounds() -> Bounds<Pixels> {
        Bounds::new(Point::new(px(0.0), px(0.0)), Size::new(px(100.0), px(50.0)))
    }

    #[test]
    fn children_paint_in_order_inside_parent_clip() {
        let mut tree = LayerTree::new(bounds());
        let host = tree.add_child(tree.root(), "host", LayerContent::Group);
        let clip = Bounds::new(Point::new(px(0.0), px(0.0)), Size::new(px(40.0), px(50.0)));
        tree.layer_mut(host).mask = Some(Mask::Rect(clip));
        tree.add_child(
            host,
            "gradient",
            LayerContent::Gradient(Some(GradientSpec::new(vec![gpui::red(), gpui::blue()]))),
        );
        let mut line = Path::new();
        line.move_to(Point::new(px(0.0), px(10.0)));
        line.line_to(Point::new(px(100.0), px(20.0)));
        tree.add_child(
            host,
            "spline",
            LayerContent::Shape(ShapeContent {
                path: Some(line),
                stroke_color: Some(gpui::green()),
                line_width: 2.0,
                ..Default::default()
            }),
        );

        let mut ctx = RecordingContext::new();
        tree.composite(&mut ctx);

        assert!(ctx.is_balanced());
        assert_eq!(ctx.clips().collect::<Vec<_>>(), vec![&clip]);
        let painted: Vec<&DrawCommand> = ctx
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Fill { .. } | DrawCommand::Stroke { .. }))
            .collect();
        assert!(matches!(painted[0], DrawCommand::Fill { .. }));
        assert!(matches!(painted[1], DrawCommand::Stroke { .. }));
    }

    #[test]
    fn empty_layers_draw_nothing() {
        let mut tree = LayerTree::new(bounds());
        tree.add_child(tree.root(), "gradient", LayerContent::Gradient(None));
        tree.add_child(tree.root(), "spline", LayerContent::Shape(ShapeContent::default()));
        let mut ctx = RecordingContext::new();
        tree.composite(&mut ctx);
        assert_eq!(ctx.strokes().count() + ctx.fills().count(), 0);
    }
}
