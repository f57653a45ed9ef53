//! Glue between the data, the highlight and the two line renderers.
//!
//! A [`LineChartContainer`] owns everything one chart needs to paint a frame
//! and decides, per [`RenderMode`], which renderer draws the line.

use crate::data_types::{
    DataSet, DrawingPathSettings, Fill, Highlight, RenderMode, Rounding, SegmentAppearance,
    SplitChartConfig,
};
use crate::delegate::{PathHandler, SegmentAppearanceProvider};
use crate::path::Path;
use crate::renderer::SplitLineRenderer;
use crate::rendering::DrawContext;
use crate::retained::RetainedLineRenderer;
use crate::transform::PlotTransform;
use crate::utils::PixelsExt;
use gpui::{Bounds, Pixels, Point};
use std::rc::Rc;

pub struct LineChartContainer {
    data_sets: Vec<DataSet>,
    x_domain: Option<(f64, f64)>,
    y_domain: Option<(f64, f64)>,
    highlight: Option<Highlight>,
    render_mode: RenderMode,
    renderer: SplitLineRenderer,
    retained: RetainedLineRenderer,
}

impl Default for LineChartContainer {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl LineChartContainer {
    pub fn new(data_sets: Vec<DataSet>) -> Self {
        Self {
            data_sets,
            x_domain: None,
            y_domain: None,
            highlight: None,
            render_mode: RenderMode::default(),
            renderer: SplitLineRenderer::new(),
            retained: RetainedLineRenderer::new(),
        }
    }

    /// Styles every data set from `config.data_set` and installs the
    /// configured appearances as the provider.
    pub fn from_config(config: &SplitChartConfig, mut data_sets: Vec<DataSet>) -> Self {
        for data_set in &mut data_sets {
            config.data_set.apply_to(data_set);
        }
        let mut container = Self::new(data_sets);
        container.render_mode = config.render_mode;
        if let Some(appearances) = &config.appearances {
            container.set_provider(Some(Rc::new(appearances.to_provider())));
        }
        container
    }

    pub fn data_sets(&self) -> &[DataSet] {
        &self.data_sets
    }

    pub fn data_sets_mut(&mut self) -> &mut Vec<DataSet> {
        &mut self.data_sets
    }

    pub fn add_data_set(&mut self, data_set: DataSet) {
        self.data_sets.push(data_set);
    }

    pub fn set_x_domain(&mut self, domain: Option<(f64, f64)>) {
        self.x_domain = domain;
    }

    pub fn set_y_domain(&mut self, domain: Option<(f64, f64)>) {
        self.y_domain = domain;
    }

    /// Visible x and y domains. Axes without an explicit domain fit the
    /// visible data; the y domain always includes the fill baseline.
    pub fn domains(&self) -> ((f64, f64), (f64, f64)) {
        let mut fitted: Option<(f64, f64, f64, f64)> = None;
        for data_set in self.data_sets.iter().filter(|d| d.visible) {
            let Some((x0, x1, y0, y1)) = data_set.bounds() else {
                continue;
            };
            let (y0, y1) = if data_set.draw_filled {
                let base = data_set.fill_min();
                (y0.min(base), y1.max(base))
            } else {
                (y0, y1)
            };
            fitted = Some(match fitted {
                Some((a, b, c, d)) => (a.min(x0), b.max(x1), c.min(y0), d.max(y1)),
                None => (x0, x1, y0, y1),
            });
        }
        let (x0, x1, y0, y1) = fitted.unwrap_or((0.0, 1.0, 0.0, 1.0));
        (
            self.x_domain.unwrap_or((x0, x1)),
            self.y_domain.unwrap_or((y0, y1)),
        )
    }

    pub fn transform(&self, bounds: Bounds<Pixels>) -> PlotTransform {
        let (x_domain, y_domain) = self.domains();
        PlotTransform::for_domains(x_domain, y_domain, bounds)
    }

    pub fn highlight(&self) -> Option<&Highlight> {
        self.highlight.as_ref()
    }

    pub fn set_highlight(&mut self, highlight: Option<Highlight>) {
        self.highlight = highlight;
    }

    /// Highlight for the entry of the first visible data set nearest to a
    /// pixel inside `bounds`.
    pub fn highlight_at_pixel(
        &self,
        point: Point<Pixels>,
        bounds: Bounds<Pixels>,
    ) -> Option<Highlight> {
        let transform = self.transform(bounds);
        if !transform.is_in_bounds(point) {
            return None;
        }
        let value = transform.screen_to_data(point);
        let (index, data_set) = self
            .data_sets
            .iter()
            .enumerate()
            .find(|(_, d)| d.visible && !d.is_empty())?;
        let entry = data_set.entry_for_x_value(value.x, value.y, Rounding::Closest)?;
        let pixel = transform.value_to_pixel(entry.x, entry.y, self.renderer.animator.phase_y);
        Some(
            Highlight::new(entry.x, entry.y, pixel.x.as_f32(), pixel.y.as_f32())
                .with_data_set_index(index),
        )
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.render_mode = mode;
    }

    pub fn set_provider(&mut self, provider: Option<Rc<dyn SegmentAppearanceProvider>>) {
        self.renderer.set_provider(provider);
    }

    pub fn renderer(&self) -> &SplitLineRenderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut SplitLineRenderer {
        &mut self.renderer
    }

    pub fn retained(&self) -> &RetainedLineRenderer {
        &self.retained
    }

    /// Paints one frame into `bounds`.
    pub fn draw(&mut self, ctx: &mut dyn DrawContext, bounds: Bounds<Pixels>) {
        let transform = self.transform(bounds);
        match self.render_mode {
            RenderMode::Immediate => {
                self.renderer
                    .draw(ctx, &self.data_sets, &transform, self.highlight.as_ref());
            }
            RenderMode::Retained => {
                self.sync_retained(&transform);
                self.retained.composite(ctx);
                if let Some(highlight) = &self.highlight {
                    self.renderer.draw_highlighted(
                        ctx,
                        &self.data_sets,
                        &transform,
                        std::slice::from_ref(highlight),
                    );
                }
            }
        }
    }

    /// Hands the full-range spline of the first visible data set to the
    /// retained renderer, or empties the layers when there is none.
    fn sync_retained(&mut self, transform: &PlotTransform) {
        let Some(data_set) = self.data_sets.iter().find(|d| d.visible && !d.is_empty()) else {
            tracing::trace!("no visible data set for the retained line");
            self.retained.clear(transform.bounds);
            return;
        };
        let Some(path) = self.renderer.spline_path(data_set, transform) else {
            self.retained.clear(transform.bounds);
            return;
        };
        let settings =
            DrawingPathSettings::new(transform.bounds, data_set.line_width, data_set.line_cap);
        self.handle_path(&path, &settings);
    }

    fn primary_index(&self) -> Option<usize> {
        self.data_sets
            .iter()
            .position(|d| d.visible && !d.is_empty())
    }

    /// Appearance of an unsplit line when the provider has none.
    fn fallback_appearance(data_set: &DataSet) -> SegmentAppearance {
        let fill = data_set.draw_filled.then(|| {
            data_set
                .fill
                .clone()
                .unwrap_or(Fill::Solid(data_set.fill_color))
        });
        SegmentAppearance::new(fill, data_set.fill_alpha, data_set.color(0))
    }
}

impl PathHandler for LineChartContainer {
    fn handle_path(&mut self, path: &Path, settings: &DrawingPathSettings) {
        let Some(index) = self.primary_index() else {
            return;
        };
        let data_set = &self.data_sets[index];
        let provider = self.renderer.provider();

        let split = self
            .highlight
            .filter(|h| h.data_set_index == index)
            .and_then(|highlight| {
                let entry =
                    data_set.entry_for_x_value(highlight.x, highlight.y, Rounding::Closest)?;
                let provider = provider?;
                let before = provider.appearance_before(entry, &highlight)?;
                let after = provider.appearance_after(entry, &highlight)?;
                Some((before, after, highlight.draw_point()))
            });

        let changed = match split {
            Some((before, after, point)) => self.retained.set_drawing_path(
                path,
                settings,
                Some(&before),
                Some(&after),
                Some(point),
            ),
            None => {
                let appearance = provider
                    .and_then(|p| p.default_appearance())
                    .unwrap_or_else(|| Self::fallback_appearance(data_set));
                self.retained
                    .set_drawing_path(path, settings, Some(&appearance), None, None)
            }
        };
        tracing::trace!(changed, "retained line updated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::Entry;
    use gpui::{px, Size};

    fn bounds() -> Bounds<Pixels> {
        Bounds::new(Point::new(px(0.0), px(0.0)), Size::new(px(100.0), px(100.0)))
    }

    fn container() -> LineChartContainer {
        let entries = (0..=10).map(|i| Entry::new(i as f64, (i * i) as f64));
        LineChartContainer::new(vec![DataSet::new(entries, "squares")])
    }

    #[test]
    fn domains_fit_visible_data() {
        let mut c = container();
        assert_eq!(c.domains(), ((0.0, 10.0), (0.0, 100.0)));
        c.set_x_domain(Some((2.0, 4.0)));
        assert_eq!(c.domains().0, (2.0, 4.0));
    }

    #[test]
    fn highlight_snaps_to_nearest_entry() {
        let c = container();
        let highlight = c
            .highlight_at_pixel(Point::new(px(31.0), px(50.0)), bounds())
            .expect("inside the plot");
        assert_eq!(highlight.x, 3.0);
        assert_eq!(highlight.y, 9.0);
        assert!((highlight.draw_x - 30.0).abs() < 1e-3);
        assert_eq!(highlight.data_set_index, 0);
    }

    #[test]
    fn highlight_outside_bounds_is_none() {
        let c = container();
        assert!(c
            .highlight_at_pixel(Point::new(px(150.0), px(50.0)), bounds())
            .is_none());
    }
}
