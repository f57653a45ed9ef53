//! Immediate-mode renderer: strokes and fills each side of the highlight
//! split straight into a [`DrawContext`] on every draw pass.

use crate::data_types::{DataSet, Fill, GradientSpec, Highlight, SegmentAppearance};
use crate::delegate::SegmentAppearanceProvider;
use crate::path::Path;
use crate::rendering::{DrawContext, FillRule, Paint, StateGuard, StrokeStyle};
use crate::split::{
    highlight_entry_index, IndexRange, Segment, SegmentPathBuilder, SplitPlan, XBounds,
};
use crate::transform::PlotTransform;
use std::rc::Rc;

/// Animation progress; 1.0 on both axes draws the full chart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Animator {
    pub phase_x: f64,
    pub phase_y: f64,
}

impl Default for Animator {
    fn default() -> Self {
        Self {
            phase_x: 1.0,
            phase_y: 1.0,
        }
    }
}

/// A highlight resolved to an entry index with both appearances available.
#[derive(Clone, Debug, PartialEq)]
struct ResolvedSplit {
    index: usize,
    before: SegmentAppearance,
    after: SegmentAppearance,
}

impl ResolvedSplit {
    fn appearance(&self, segment: Segment) -> Option<&SegmentAppearance> {
        match segment {
            Segment::Whole => None,
            Segment::Leading => Some(&self.before),
            Segment::Trailing => Some(&self.after),
        }
    }
}

#[derive(Default)]
pub struct SplitLineRenderer {
    provider: Option<Rc<dyn SegmentAppearanceProvider>>,
    pub animator: Animator,
}

impl SplitLineRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_provider(mut self, provider: Rc<dyn SegmentAppearanceProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn set_provider(&mut self, provider: Option<Rc<dyn SegmentAppearanceProvider>>) {
        self.provider = provider;
    }

    pub fn provider(&self) -> Option<&Rc<dyn SegmentAppearanceProvider>> {
        self.provider.as_ref()
    }

    pub fn default_appearance(&self) -> Option<SegmentAppearance> {
        self.provider.as_ref().and_then(|p| p.default_appearance())
    }

    /// Lines, fills and highlight markers of every visible data set.
    pub fn draw(
        &self,
        ctx: &mut dyn DrawContext,
        data_sets: &[DataSet],
        transform: &PlotTransform,
        highlight: Option<&Highlight>,
    ) {
        self.draw_data(ctx, data_sets, transform, highlight);
        if let Some(highlight) = highlight {
            self.draw_highlighted(ctx, data_sets, transform, std::slice::from_ref(highlight));
        }
    }

    pub fn draw_data(
        &self,
        ctx: &mut dyn DrawContext,
        data_sets: &[DataSet],
        transform: &PlotTransform,
        highlight: Option<&Highlight>,
    ) {
        for (index, data_set) in data_sets.iter().enumerate() {
            if !data_set.visible || data_set.is_empty() {
                continue;
            }
            let highlight = highlight.filter(|h| h.data_set_index == index);
            self.draw_linear(ctx, data_set, transform, highlight);
        }
    }

    /// Draws one data set, split at `highlight` when both segment
    /// appearances can be resolved.
    pub fn draw_linear(
        &self,
        ctx: &mut dyn DrawContext,
        data_set: &DataSet,
        transform: &PlotTransform,
        highlight: Option<&Highlight>,
    ) {
        let Some(bounds) = XBounds::new(data_set, transform.x_scale.domain(), self.animator.phase_x)
        else {
            return;
        };
        let split = highlight.and_then(|h| self.resolve_split(data_set, h, &bounds));
        let plan = SplitPlan::new(&bounds, split.as_ref().map(|s| s.index));
        let builder = SegmentPathBuilder::new(data_set, transform, self.animator.phase_y);

        if data_set.draw_filled {
            self.draw_linear_fill(ctx, data_set, transform, &builder, &plan, split.as_ref());
        }

        let mut ctx = StateGuard::new(ctx);

        if data_set.colors.len() > 1 && !data_set.line_gradient_enabled {
            tracing::error!(
                label = %data_set.label,
                colors = data_set.colors.len(),
                "data sets with multiple colors are not supported by this renderer"
            );
            debug_assert!(
                false,
                "data sets with multiple colors are not supported by this renderer"
            );
            return;
        }

        if data_set.entry_for_index(bounds.min).is_none() {
            return;
        }

        for ranges in plan.segments() {
            let color = match split.as_ref().and_then(|s| s.appearance(ranges.segment)) {
                Some(appearance) => appearance.line_color,
                None => self
                    .default_appearance()
                    .map(|a| a.line_color)
                    .unwrap_or_else(|| data_set.color(0)),
            };
            self.draw_linear_segment(&mut *ctx, data_set, transform, &builder, ranges.stroke, color);
        }
    }

    fn draw_linear_segment(
        &self,
        ctx: &mut dyn DrawContext,
        data_set: &DataSet,
        transform: &PlotTransform,
        builder: &SegmentPathBuilder<'_>,
        range: IndexRange,
        color: gpui::Hsla,
    ) {
        let Some(path) = builder.stroke_path(range) else {
            tracing::trace!(?range, "empty segment, nothing to stroke");
            return;
        };
        let paint = if data_set.line_gradient_enabled {
            Paint::Gradient {
                spec: GradientSpec::horizontal(data_set.colors.clone()),
                rect: transform.bounds,
            }
        } else {
            Paint::Color(color)
        };
        ctx.stroke_path(
            &path,
            StrokeStyle::new(data_set.line_width, data_set.line_cap),
            &paint,
        );
    }

    fn draw_linear_fill(
        &self,
        ctx: &mut dyn DrawContext,
        data_set: &DataSet,
        transform: &PlotTransform,
        builder: &SegmentPathBuilder<'_>,
        plan: &SplitPlan,
        split: Option<&ResolvedSplit>,
    ) {
        let fill_min = data_set.fill_min();
        let default_appearance = self.default_appearance();

        for ranges in plan.segments() {
            let Some(path) = builder.fill_path(ranges.fill, fill_min) else {
                continue;
            };

            let (fill, alpha) = match split.and_then(|s| s.appearance(ranges.segment)) {
                Some(appearance) => match &appearance.fill {
                    Some(fill) => (fill.clone(), appearance.fill_alpha),
                    None => (Fill::Solid(data_set.fill_color), data_set.fill_alpha),
                },
                None => match default_appearance.as_ref().and_then(|a| {
                    a.fill.as_ref().map(|fill| (fill.clone(), a.fill_alpha))
                }) {
                    Some(resolved) => resolved,
                    None => match &data_set.fill {
                        Some(fill) => (fill.clone(), data_set.fill_alpha),
                        None => (Fill::Solid(data_set.fill_color), data_set.fill_alpha),
                    },
                },
            };

            let paint = fill_paint(&fill, &path, transform).with_opacity(alpha);
            let mut ctx = StateGuard::new(&mut *ctx);
            ctx.fill_path(&path, FillRule::NonZero, &paint);
        }
    }

    /// Concentric rings at each highlighted point whose data set asks for them.
    pub fn draw_highlighted(
        &self,
        ctx: &mut dyn DrawContext,
        data_sets: &[DataSet],
        transform: &PlotTransform,
        highlights: &[Highlight],
    ) {
        if highlights.is_empty() {
            return;
        }
        let mut ctx = StateGuard::new(ctx);

        for highlight in highlights {
            let Some(data_set) = data_sets.get(highlight.data_set_index) else {
                continue;
            };
            let style = &data_set.highlight_circle;
            if !data_set.visible || !style.enabled {
                continue;
            }

            let center = transform.value_to_pixel(highlight.x, highlight.y, self.animator.phase_y);
            if !transform.is_in_bounds(center) {
                tracing::trace!(?center, "highlight outside the viewport");
                continue;
            }

            // Outer ring with a hole the size of the inner circle, then the
            // inner ring with a smaller hole.
            ctx.fill_path(
                &Path::ring(center, style.outer_radius, style.inner_radius),
                FillRule::EvenOdd,
                &Paint::Color(style.outer_color.alpha(style.outer_alpha)),
            );
            ctx.fill_path(
                &Path::ring(center, style.inner_radius, style.hole_radius),
                FillRule::EvenOdd,
                &Paint::Color(style.inner_color.alpha(style.inner_alpha)),
            );
        }
    }

    /// Full-range stroke of a data set, as handed to the retained renderer.
    pub fn spline_path(&self, data_set: &DataSet, transform: &PlotTransform) -> Option<Path> {
        let bounds = XBounds::new(data_set, transform.x_scale.domain(), self.animator.phase_x)?;
        let SplitPlan::Whole(ranges) = SplitPlan::new(&bounds, None) else {
            return None;
        };
        SegmentPathBuilder::new(data_set, transform, self.animator.phase_y).stroke_path(ranges.stroke)
    }

    fn resolve_split(
        &self,
        data_set: &DataSet,
        highlight: &Highlight,
        bounds: &XBounds,
    ) -> Option<ResolvedSplit> {
        let index = highlight_entry_index(data_set, highlight, bounds)?;
        let entry = data_set.entry_for_index(index)?;
        let Some(provider) = self.provider.as_ref() else {
            tracing::trace!("no appearance provider, drawing the default line");
            return None;
        };
        let before = provider.appearance_before(entry, highlight);
        let after = provider.appearance_after(entry, highlight);
        match (before, after) {
            (Some(before), Some(after)) => Some(ResolvedSplit {
                index,
                before,
                after,
            }),
            _ => {
                tracing::trace!(index, "segment appearances incomplete, drawing the default line");
                None
            }
        }
    }
}

fn fill_paint(fill: &Fill, path: &Path, transform: &PlotTransform) -> Paint {
    match fill {
        Fill::Solid(color) => Paint::Color(*color),
        Fill::Gradient(spec) => Paint::Gradient {
            spec: spec.clone(),
            rect: path.bounds().unwrap_or(transform.bounds),
        },
    }
}
