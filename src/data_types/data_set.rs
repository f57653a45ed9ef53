use super::appearance::Fill;
use super::entry::{Entry, Rounding};
use super::settings::LineCap;
use gpui::Hsla;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineMode {
    #[default]
    Linear,
    /// Horizontal-then-vertical connections between entries.
    Stepped,
}

/// Where the filled area under the line closes, in data space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FillFormatter {
    Constant(f64),
}

impl FillFormatter {
    pub fn fill_line_position(&self, _data_set: &DataSet) -> f64 {
        match self {
            FillFormatter::Constant(value) => *value,
        }
    }
}

/// Concentric rings drawn at the highlighted point.
#[derive(Clone, Debug, PartialEq)]
pub struct HighlightCircleStyle {
    pub enabled: bool,
    pub outer_radius: f32,
    pub outer_color: Hsla,
    pub outer_alpha: f32,
    pub inner_radius: f32,
    pub inner_color: Hsla,
    pub inner_alpha: f32,
    pub hole_radius: f32,
}

impl Default for HighlightCircleStyle {
    fn default() -> Self {
        Self {
            enabled: false,
            outer_radius: 10.0,
            outer_color: gpui::red(),
            outer_alpha: 1.0,
            inner_radius: 6.0,
            inner_color: gpui::green(),
            inner_alpha: 1.0,
            hole_radius: 4.0,
        }
    }
}

/// An x-ordered sequence of entries plus the styling of its line.
#[derive(Clone, Debug, PartialEq)]
pub struct DataSet {
    entries: Vec<Entry>,
    pub label: String,
    pub visible: bool,
    pub colors: Vec<Hsla>,
    pub line_width: f32,
    pub line_cap: LineCap,
    pub mode: LineMode,
    pub draw_filled: bool,
    pub fill: Option<Fill>,
    pub fill_color: Hsla,
    pub fill_alpha: f32,
    pub line_gradient_enabled: bool,
    pub fill_formatter: Option<FillFormatter>,
    pub highlight_circle: HighlightCircleStyle,
}

impl Default for DataSet {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            label: String::new(),
            visible: true,
            colors: vec![gpui::blue()],
            line_width: 1.0,
            line_cap: LineCap::Butt,
            mode: LineMode::Linear,
            draw_filled: false,
            fill: None,
            fill_color: gpui::blue(),
            fill_alpha: 0.33,
            line_gradient_enabled: false,
            fill_formatter: None,
            highlight_circle: HighlightCircleStyle::default(),
        }
    }
}

impl DataSet {
    /// Builds a data set; entries are sorted by x.
    pub fn new(entries: impl IntoIterator<Item = Entry>, label: impl Into<String>) -> Self {
        let mut entries: Vec<Entry> = entries.into_iter().collect();
        entries.sort_by(|a, b| a.x.total_cmp(&b.x));
        Self {
            entries,
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts an entry after every entry with a smaller or equal x.
    pub fn add_entry(&mut self, entry: Entry) {
        let at = self.entries.partition_point(|e| e.x <= entry.x);
        self.entries.insert(at, entry);
    }

    pub fn entry_for_index(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn is_stepped(&self) -> bool {
        self.mode == LineMode::Stepped
    }

    pub fn color(&self, index: usize) -> Hsla {
        if self.colors.is_empty() {
            return gpui::blue();
        }
        self.colors[index % self.colors.len()]
    }

    /// Baseline of the filled area in data space.
    pub fn fill_min(&self) -> f64 {
        self.fill_formatter
            .map(|f| f.fill_line_position(self))
            .unwrap_or(0.0)
    }

    /// (x_min, x_max, y_min, y_max), or `None` when empty.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let first = self.entries.first()?;
        let last = self.entries.last()?;
        let (y_min, y_max) = self
            .entries
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), e| {
                (lo.min(e.y), hi.max(e.y))
            });
        Some((first.x, last.x, y_min, y_max))
    }

    /// Index of the entry matching `x_value` under `rounding`. Among entries
    /// sharing that x, the one closest to `closest_to_y` wins; a NaN y keeps
    /// the first of them.
    pub fn entry_index_for_x(
        &self,
        x_value: f64,
        closest_to_y: f64,
        rounding: Rounding,
    ) -> Option<usize> {
        let n = self.entries.len();
        if n == 0 || x_value.is_nan() {
            return None;
        }

        let at_or_after = self.entries.partition_point(|e| e.x < x_value);
        let mut index = match rounding {
            Rounding::Up => at_or_after.min(n - 1),
            Rounding::Down => self
                .entries
                .partition_point(|e| e.x <= x_value)
                .saturating_sub(1),
            Rounding::Closest => {
                if at_or_after == 0 {
                    0
                } else if at_or_after == n {
                    n - 1
                } else {
                    let below = x_value - self.entries[at_or_after - 1].x;
                    let above = self.entries[at_or_after].x - x_value;
                    if above < below {
                        at_or_after
                    } else {
                        at_or_after - 1
                    }
                }
            }
        };

        let x = self.entries[index].x;
        let mut start = index;
        while start > 0 && self.entries[start - 1].x == x {
            start -= 1;
        }
        index = start;

        if !closest_to_y.is_nan() {
            let mut best = f64::INFINITY;
            for (i, e) in self.entries.iter().enumerate().skip(start) {
                if e.x != x {
                    break;
                }
                let d = (e.y - closest_to_y).abs();
                if d < best {
                    best = d;
                    index = i;
                }
            }
        }

        Some(index)
    }

    pub fn entry_for_x_value(
        &self,
        x_value: f64,
        closest_to_y: f64,
        rounding: Rounding,
    ) -> Option<&Entry> {
        self.entry_index_for_x(x_value, closest_to_y, rounding)
            .and_then(|i| self.entries.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> DataSet {
        DataSet::new(
            [(0.0, 0.0), (1.0, 5.0), (2.0, 3.0), (2.0, 9.0), (3.0, 8.0)]
                .into_iter()
                .map(Entry::from),
            "test",
        )
    }

    #[test]
    fn closest_rounding_picks_nearest_x() {
        let ds = data();
        assert_eq!(ds.entry_index_for_x(0.4, f64::NAN, Rounding::Closest), Some(0));
        assert_eq!(ds.entry_index_for_x(0.6, f64::NAN, Rounding::Closest), Some(1));
        assert_eq!(ds.entry_index_for_x(-5.0, f64::NAN, Rounding::Closest), Some(0));
        assert_eq!(ds.entry_index_for_x(50.0, f64::NAN, Rounding::Closest), Some(4));
    }

    #[test]
    fn up_and_down_rounding() {
        let ds = data();
        assert_eq!(ds.entry_index_for_x(0.1, f64::NAN, Rounding::Up), Some(1));
        assert_eq!(ds.entry_index_for_x(0.9, f64::NAN, Rounding::Down), Some(0));
        assert_eq!(ds.entry_index_for_x(1.0, f64::NAN, Rounding::Down), Some(1));
        assert_eq!(ds.entry_index_for_x(-1.0, f64::NAN, Rounding::Down), Some(0));
        assert_eq!(ds.entry_index_for_x(9.0, f64::NAN, Rounding::Up), Some(4));
    }

    #[test]
    fn duplicate_x_resolved_by_y() {
        let ds = data();
        assert_eq!(ds.entry_index_for_x(2.0, 8.0, Rounding::Closest), Some(3));
        assert_eq!(ds.entry_index_for_x(2.0, 2.0, Rounding::Closest), Some(2));
        assert_eq!(ds.entry_index_for_x(2.0, f64::NAN, Rounding::Closest), Some(2));
    }

    #[test]
    fn empty_data_set_has_no_entries() {
        let ds = DataSet::default();
        assert!(ds.entry_index_for_x(1.0, 1.0, Rounding::Closest).is_none());
        assert!(ds.bounds().is_none());
    }

    #[test]
    fn add_entry_keeps_x_order() {
        let mut ds = data();
        ds.add_entry(Entry::new(1.5, 1.0));
        let xs: Vec<f64> = ds.entries().iter().map(|e| e.x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 1.5, 2.0, 2.0, 3.0]);
    }
}
