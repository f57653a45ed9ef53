use gpui::{Hsla, Point};
use serde::{Deserialize, Serialize};

/// Geometry of a gradient.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientKind {
    #[default]
    Axial,
    Radial,
}

/// A gradient description. Points are in unit space of the painted rect,
/// (0, 0) being the top-left corner.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientSpec {
    pub colors: Vec<Hsla>,
    /// Stop positions in `0.0..=1.0`, one per color. Evenly spaced when absent.
    pub locations: Option<Vec<f32>>,
    pub start_point: Option<Point<f32>>,
    pub end_point: Option<Point<f32>>,
    pub kind: Option<GradientKind>,
}

impl GradientSpec {
    pub fn new(colors: Vec<Hsla>) -> Self {
        Self {
            colors,
            locations: None,
            start_point: None,
            end_point: None,
            kind: None,
        }
    }

    pub fn with_locations(mut self, locations: Vec<f32>) -> Self {
        self.locations = Some(locations);
        self
    }

    pub fn with_points(mut self, start: Point<f32>, end: Point<f32>) -> Self {
        self.start_point = Some(start);
        self.end_point = Some(end);
        self
    }

    pub fn with_kind(mut self, kind: GradientKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Horizontal gradient, left to right.
    pub fn horizontal(colors: Vec<Hsla>) -> Self {
        Self::new(colors).with_points(Point::new(0.0, 0.5), Point::new(1.0, 0.5))
    }

    pub fn start(&self) -> Point<f32> {
        self.start_point.unwrap_or(Point::new(0.5, 0.0))
    }

    pub fn end(&self) -> Point<f32> {
        self.end_point.unwrap_or(Point::new(0.5, 1.0))
    }

    /// Resolved (color, location) pairs, sorted by location.
    pub fn stops(&self) -> Vec<(Hsla, f32)> {
        let n = self.colors.len();
        let mut stops: Vec<(Hsla, f32)> = self
            .colors
            .iter()
            .enumerate()
            .map(|(i, color)| {
                let location = self
                    .locations
                    .as_ref()
                    .and_then(|l| l.get(i).copied())
                    .unwrap_or(if n > 1 { i as f32 / (n - 1) as f32 } else { 0.0 });
                (*color, location.clamp(0.0, 1.0))
            })
            .collect();
        stops.sort_by(|a, b| a.1.total_cmp(&b.1));
        stops
    }

    /// Same gradient with every color's alpha multiplied by `alpha`.
    pub fn with_opacity(&self, alpha: f32) -> Self {
        let mut out = self.clone();
        for color in &mut out.colors {
            *color = color.opacity(alpha);
        }
        out
    }
}

/// What is painted below a line.
#[derive(Clone, Debug, PartialEq)]
pub enum Fill {
    Solid(Hsla),
    Gradient(GradientSpec),
}

impl Fill {
    pub fn as_gradient(&self) -> GradientSpec {
        match self {
            Fill::Solid(color) => GradientSpec::new(vec![*color, *color]),
            Fill::Gradient(spec) => spec.clone(),
        }
    }
}

/// Style bundle for one side of a highlight split.
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentAppearance {
    pub fill: Option<Fill>,
    pub fill_alpha: f32,
    pub line_color: Hsla,
}

impl SegmentAppearance {
    pub fn new(fill: Option<Fill>, fill_alpha: f32, line_color: Hsla) -> Self {
        Self {
            fill,
            fill_alpha,
            line_color,
        }
    }

    /// Gradient used by the retained renderer. No fill paints nothing.
    pub fn gradient(&self) -> Option<GradientSpec> {
        self.fill
            .as_ref()
            .map(|fill| fill.as_gradient().with_opacity(self.fill_alpha))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_are_evenly_spaced_without_locations() {
        let spec = GradientSpec::new(vec![gpui::red(), gpui::green(), gpui::blue()]);
        let locations: Vec<f32> = spec.stops().iter().map(|s| s.1).collect();
        assert_eq!(locations, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn solid_fill_becomes_two_stop_gradient() {
        let appearance = SegmentAppearance::new(Some(Fill::Solid(gpui::red())), 0.5, gpui::blue());
        let gradient = appearance.gradient().unwrap();
        assert_eq!(gradient.colors.len(), 2);
        assert_eq!(gradient.colors[0].a, 0.5);
    }
}
