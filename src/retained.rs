//! Retained-mode renderer.
//!
//! Two hosting groups (leading, trailing) each hold a gradient layer under a
//! stroke layer. A rectangular mask on the host confines the segment to one
//! side of the highlight, while a path-shaped mask on the gradient confines
//! the gradient to the area under the line. The compositor has no path
//! union, so the two masks live on separate layers.
//!
//! Every update first builds a complete [`RetainedRenderState`] and then
//! overwrites all layer properties from it.

use crate::data_types::{DrawingPathSettings, GradientSpec, LineCap, SegmentAppearance};
use crate::layers::{LayerContent, LayerId, LayerTree, Mask, ShapeContent};
use crate::path::Path;
use crate::rendering::DrawContext;
use crate::utils::PixelsExt;
use gpui::{px, Bounds, Hsla, Pixels, Point, Size};

/// Properties of one hosting sub-tree.
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentLayerState {
    pub gradient: Option<GradientSpec>,
    pub gradient_mask: Option<Mask>,
    pub stroke_path: Option<Path>,
    pub stroke_color: Option<Hsla>,
    pub line_width: f32,
    pub line_cap: LineCap,
    pub host_mask: Option<Mask>,
}

impl SegmentLayerState {
    fn cleared(settings: &DrawingPathSettings) -> Self {
        Self {
            gradient: None,
            gradient_mask: None,
            stroke_path: None,
            stroke_color: None,
            line_width: settings.line_width,
            line_cap: settings.line_cap,
            host_mask: None,
        }
    }

    fn visible(
        path: &Path,
        settings: &DrawingPathSettings,
        appearance: Option<&SegmentAppearance>,
        host_mask: Option<Mask>,
    ) -> Self {
        Self {
            gradient: appearance.and_then(|a| a.gradient()),
            gradient_mask: Some(Mask::Shape {
                path: path.to_mask_region(settings.drawing_rect),
                line_width: settings.line_width,
                line_cap: settings.line_cap,
            }),
            stroke_path: Some(path.clone()),
            stroke_color: appearance.map(|a| a.line_color),
            line_width: settings.line_width,
            line_cap: settings.line_cap,
            host_mask,
        }
    }
}

/// Complete layer configuration for one update.
#[derive(Clone, Debug, PartialEq)]
pub struct RetainedRenderState {
    pub bounds: Bounds<Pixels>,
    pub leading: SegmentLayerState,
    pub trailing: SegmentLayerState,
}

impl RetainedRenderState {
    /// With a highlight, the leading host shows everything left of its x and
    /// the trailing host everything right of it. Without one, only the
    /// leading segment is drawn, unmasked.
    pub fn build(
        path: &Path,
        settings: &DrawingPathSettings,
        leading: Option<&SegmentAppearance>,
        trailing: Option<&SegmentAppearance>,
        highlight_point: Option<Point<Pixels>>,
    ) -> Self {
        let rect = settings.drawing_rect;
        match highlight_point {
            Some(point) => {
                let (left, right) = split_rect(rect, point.x);
                Self {
                    bounds: rect,
                    leading: SegmentLayerState::visible(
                        path,
                        settings,
                        leading,
                        Some(Mask::Rect(left)),
                    ),
                    trailing: SegmentLayerState::visible(
                        path,
                        settings,
                        trailing,
                        Some(Mask::Rect(right)),
                    ),
                }
            }
            None => Self {
                bounds: rect,
                leading: SegmentLayerState::visible(path, settings, leading, None),
                trailing: SegmentLayerState::cleared(settings),
            },
        }
    }

    /// Both segments empty: nothing is painted.
    pub fn cleared(bounds: Bounds<Pixels>) -> Self {
        let settings = DrawingPathSettings::new(bounds, 0.0, LineCap::default());
        Self {
            bounds,
            leading: SegmentLayerState::cleared(&settings),
            trailing: SegmentLayerState::cleared(&settings),
        }
    }
}

/// Splits `rect` at `x` (clamped into it) into the part left of it and the
/// part right of it.
fn split_rect(rect: Bounds<Pixels>, x: Pixels) -> (Bounds<Pixels>, Bounds<Pixels>) {
    let min_x = rect.origin.x.as_f32();
    let width = rect.size.width.as_f32();
    let split = (x.as_f32() - min_x).clamp(0.0, width);

    let left = Bounds::new(rect.origin, Size::new(px(split), rect.size.height));
    let right = Bounds::new(
        Point::new(px(min_x + split), rect.origin.y),
        Size::new(px(width - split), rect.size.height),
    );
    (left, right)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SegmentLayers {
    pub host: LayerId,
    pub gradient: LayerId,
    pub spline: LayerId,
}

pub struct RetainedLineRenderer {
    tree: LayerTree,
    leading: SegmentLayers,
    trailing: SegmentLayers,
    applied: Option<RetainedRenderState>,
}

impl Default for RetainedLineRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl RetainedLineRenderer {
    pub fn new() -> Self {
        let mut tree = LayerTree::new(Bounds::default());
        let root = tree.root();
        let leading = Self::install_segment(&mut tree, root, "leading");
        let trailing = Self::install_segment(&mut tree, root, "trailing");
        Self {
            tree,
            leading,
            trailing,
            applied: None,
        }
    }

    // The gradient sits under the spline so the stroke color stays opaque.
    fn install_segment(tree: &mut LayerTree, root: LayerId, name: &'static str) -> SegmentLayers {
        let host = tree.add_child(root, name, LayerContent::Group);
        let gradient = tree.add_child(host, "gradient", LayerContent::Gradient(None));
        let spline = tree.add_child(host, "spline", LayerContent::Shape(ShapeContent::default()));
        SegmentLayers {
            host,
            gradient,
            spline,
        }
    }

    pub fn tree(&self) -> &LayerTree {
        &self.tree
    }

    pub fn leading_layers(&self) -> SegmentLayers {
        self.leading
    }

    pub fn trailing_layers(&self) -> SegmentLayers {
        self.trailing
    }

    pub fn state(&self) -> Option<&RetainedRenderState> {
        self.applied.as_ref()
    }

    pub fn set_drawing_path(
        &mut self,
        path: &Path,
        settings: &DrawingPathSettings,
        leading: Option<&SegmentAppearance>,
        trailing: Option<&SegmentAppearance>,
        highlight_point: Option<Point<Pixels>>,
    ) -> bool {
        let state = RetainedRenderState::build(path, settings, leading, trailing, highlight_point);
        self.apply(state)
    }

    /// Empties every layer, e.g. when there is no line left to show.
    pub fn clear(&mut self, bounds: Bounds<Pixels>) -> bool {
        self.apply(RetainedRenderState::cleared(bounds))
    }

    /// Overwrites every layer property from `state`. Returns `false` when
    /// `state` equals the last applied one and nothing was touched.
    pub fn apply(&mut self, state: RetainedRenderState) -> bool {
        if self.applied.as_ref() == Some(&state) {
            tracing::trace!("retained state unchanged");
            return false;
        }
        tracing::debug!(
            split = state.leading.host_mask.is_some(),
            "applying retained line state"
        );

        self.tree.set_bounds(state.bounds);
        Self::apply_segment(&mut self.tree, self.leading, &state.leading);
        Self::apply_segment(&mut self.tree, self.trailing, &state.trailing);
        self.applied = Some(state);
        true
    }

    fn apply_segment(tree: &mut LayerTree, layers: SegmentLayers, state: &SegmentLayerState) {
        let gradient = tree.layer_mut(layers.gradient);
        gradient.content = LayerContent::Gradient(state.gradient.clone());
        gradient.mask = state.gradient_mask.clone();

        let spline = tree.layer_mut(layers.spline);
        spline.content = LayerContent::Shape(ShapeContent {
            path: state.stroke_path.clone(),
            stroke_color: state.stroke_color,
            fill_color: None,
            line_width: state.line_width,
            line_cap: state.line_cap,
        });

        tree.layer_mut(layers.host).mask = state.host_mask.clone();
    }

    pub fn composite(&self, ctx: &mut dyn DrawContext) {
        self.tree.composite(ctx);
    }
}
