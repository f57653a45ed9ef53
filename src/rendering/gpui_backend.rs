//! [`DrawContext`] over a gpui [`Window`].

use super::{DrawContext, FillRule, Paint, StrokeStyle};
use crate::data_types::{GradientKind, LineCap};
use crate::path::{Path, PathOp};
use crate::utils::PixelsExt;
use gpui::{
    linear_color_stop, linear_gradient, px, Background, Bounds, ContentMask, FillOptions,
    PathBuilder, PathStyle, Pixels, StrokeOptions, Window,
};

/// Paints into a window during the paint phase. Clips are tracked here and
/// applied as content masks around each path.
pub struct WindowCanvas<'a> {
    window: &'a mut Window,
    clip: Option<Bounds<Pixels>>,
    saved: Vec<Option<Bounds<Pixels>>>,
}

impl<'a> WindowCanvas<'a> {
    pub fn new(window: &'a mut Window) -> Self {
        Self {
            window,
            clip: None,
            saved: Vec::new(),
        }
    }

    fn paint(&mut self, builder: PathBuilder, paint: &Paint) {
        let Ok(path) = builder.build() else {
            tracing::trace!("path tessellation failed");
            return;
        };
        let background = to_background(paint);
        match self.clip {
            Some(bounds) => {
                self.window
                    .with_content_mask(Some(ContentMask { bounds }), |window| {
                        window.paint_path(path, background);
                    });
            }
            None => self.window.paint_path(path, background),
        }
    }
}

impl DrawContext for WindowCanvas<'_> {
    fn save_state(&mut self) {
        self.saved.push(self.clip);
    }

    fn restore_state(&mut self) {
        match self.saved.pop() {
            Some(clip) => self.clip = clip,
            None => tracing::warn!("restore_state without matching save_state"),
        }
    }

    fn clip_to_rect(&mut self, rect: Bounds<Pixels>) {
        self.clip = Some(match self.clip {
            Some(current) => current.intersect(&rect),
            None => rect,
        });
    }

    fn stroke_path(&mut self, path: &Path, style: StrokeStyle, paint: &Paint) {
        let mut builder = PathBuilder::stroke(px(style.width))
            .with_style(PathStyle::Stroke(stroke_options(style)));
        append_ops(&mut builder, path);
        self.paint(builder, paint);
    }

    fn fill_path(&mut self, path: &Path, rule: FillRule, paint: &Paint) {
        let mut builder = PathBuilder::fill().with_style(PathStyle::Fill(fill_options(rule)));
        append_ops(&mut builder, path);
        self.paint(builder, paint);
    }
}

fn stroke_options(style: StrokeStyle) -> StrokeOptions {
    let cap = match style.cap {
        LineCap::Butt => lyon::tessellation::LineCap::Butt,
        LineCap::Round => lyon::tessellation::LineCap::Round,
        LineCap::Square => lyon::tessellation::LineCap::Square,
    };
    StrokeOptions::default()
        .with_line_width(style.width)
        .with_line_cap(cap)
}

fn fill_options(rule: FillRule) -> FillOptions {
    let rule = match rule {
        FillRule::NonZero => gpui::FillRule::NonZero,
        FillRule::EvenOdd => gpui::FillRule::EvenOdd,
    };
    FillOptions::default().with_fill_rule(rule)
}

fn append_ops(builder: &mut PathBuilder, path: &Path) {
    for op in path.ops() {
        match *op {
            PathOp::MoveTo(p) => builder.move_to(p),
            PathOp::LineTo(p) => builder.line_to(p),
            PathOp::Close => builder.close(),
        }
    }
}

/// gpui gradients carry two stops: intermediate stops are dropped and radial
/// gradients are painted as axial ones.
fn to_background(paint: &Paint) -> Background {
    match paint {
        Paint::Color(color) => (*color).into(),
        Paint::Gradient { spec, rect } => {
            let stops = spec.stops();
            let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
                return gpui::transparent_black().into();
            };
            if spec.kind == Some(GradientKind::Radial) {
                tracing::trace!("radial gradient painted as axial");
            }
            let start = spec.start();
            let end = spec.end();
            let dx = (end.x - start.x) * rect.size.width.as_f32();
            let dy = (end.y - start.y) * rect.size.height.as_f32();
            // CSS convention: 0deg points up, angles grow clockwise.
            let angle = dx.atan2(-dy).to_degrees().rem_euclid(360.0);
            linear_gradient(
                angle,
                linear_color_stop(first.0, first.1),
                linear_color_stop(last.0, last.1),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stroke_caps_map_onto_tessellator_caps() {
        let options = stroke_options(StrokeStyle::new(3.0, LineCap::Round));
        assert_eq!(options.line_width, 3.0);
        assert_eq!(options.start_cap, lyon::tessellation::LineCap::Round);
        assert_eq!(options.end_cap, lyon::tessellation::LineCap::Round);

        let square = stroke_options(StrokeStyle::new(1.0, LineCap::Square));
        assert_eq!(square.start_cap, lyon::tessellation::LineCap::Square);
        let butt = stroke_options(StrokeStyle::new(1.0, LineCap::Butt));
        assert_eq!(butt.end_cap, lyon::tessellation::LineCap::Butt);
    }

    #[test]
    fn fill_rule_is_forwarded() {
        assert_eq!(
            fill_options(FillRule::EvenOdd).fill_rule,
            gpui::FillRule::EvenOdd
        );
        assert_eq!(
            fill_options(FillRule::NonZero).fill_rule,
            gpui::FillRule::NonZero
        );
    }
}
