//! Splitting a line at the highlighted entry.
//!
//! The split happens on entry indices, never on pixel positions: the leading
//! stroke ends on the highlighted entry and the trailing stroke starts from it,
//! so both sub-paths share exactly one vertex and the line shows no seam.

use crate::data_types::{DataSet, Entry, Highlight, Rounding};
use crate::path::Path;
use crate::transform::{apply_matrix, PlotTransform};
use glam::DAffine2;
use gpui::{Pixels, Point};

/// Visible entry indices, `min..=min + range`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct XBounds {
    pub min: usize,
    pub max: usize,
    pub range: usize,
}

impl XBounds {
    /// Indices covering the visible x window, scaled by the horizontal phase.
    pub fn new(data_set: &DataSet, visible_x: (f64, f64), phase_x: f64) -> Option<Self> {
        let (low, high) = if visible_x.0 <= visible_x.1 {
            visible_x
        } else {
            (visible_x.1, visible_x.0)
        };
        let min = data_set.entry_index_for_x(low, f64::NAN, Rounding::Down)?;
        let max = data_set.entry_index_for_x(high, f64::NAN, Rounding::Up)?;
        let max = max.max(min);
        let phase_x = phase_x.clamp(0.0, 1.0);
        let range = ((max - min) as f64 * phase_x) as usize;
        Some(Self { min, max, range })
    }

    /// Every entry of the data set.
    pub fn full(data_set: &DataSet) -> Option<Self> {
        let max = data_set.entry_count().checked_sub(1)?;
        Some(Self {
            min: 0,
            max,
            range: max,
        })
    }

    pub fn last(&self) -> usize {
        self.min + self.range
    }
}

/// Inclusive index range. `from > through` is empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndexRange {
    pub from: usize,
    pub through: usize,
}

impl IndexRange {
    pub fn new(from: usize, through: usize) -> Self {
        Self { from, through }
    }

    pub fn is_empty(&self) -> bool {
        self.from > self.through
    }

    pub fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.through - self.from + 1
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segment {
    /// The whole line, no highlight.
    Whole,
    /// Up to and including the highlighted entry.
    Leading,
    /// After the highlighted entry.
    Trailing,
}

/// Index ranges walked for one segment's stroke and fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SegmentRanges {
    pub segment: Segment,
    pub stroke: IndexRange,
    pub fill: IndexRange,
}

/// How the visible entries are partitioned for one draw pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitPlan {
    Whole(SegmentRanges),
    Split {
        highlight_index: usize,
        leading: SegmentRanges,
        trailing: SegmentRanges,
    },
}

impl SplitPlan {
    /// `highlight_index` is clamped into the visible range.
    pub fn new(bounds: &XBounds, highlight_index: Option<usize>) -> Self {
        let whole = IndexRange::new(bounds.min, bounds.last());
        match highlight_index {
            None => Self::Whole(SegmentRanges {
                segment: Segment::Whole,
                stroke: whole,
                fill: whole,
            }),
            Some(h) => {
                let h = h.clamp(bounds.min, bounds.last());
                Self::Split {
                    highlight_index: h,
                    leading: SegmentRanges {
                        segment: Segment::Leading,
                        stroke: IndexRange::new(bounds.min, h),
                        fill: IndexRange::new(bounds.min, h),
                    },
                    // The trailing fill starts on the shared vertex so the two
                    // filled regions abut.
                    trailing: SegmentRanges {
                        segment: Segment::Trailing,
                        stroke: IndexRange::new(h + 1, bounds.last()),
                        fill: IndexRange::new(h, bounds.last()),
                    },
                }
            }
        }
    }

    pub fn segments(&self) -> Vec<SegmentRanges> {
        match self {
            Self::Whole(ranges) => vec![*ranges],
            Self::Split {
                leading, trailing, ..
            } => vec![*leading, *trailing],
        }
    }
}

/// The entry a highlight splits on: the closest one by x (then y), clamped
/// into the visible bounds.
pub fn highlight_entry_index(
    data_set: &DataSet,
    highlight: &Highlight,
    bounds: &XBounds,
) -> Option<usize> {
    let index = data_set.entry_index_for_x(highlight.x, highlight.y, Rounding::Closest)?;
    Some(index.clamp(bounds.min, bounds.last()))
}

/// Builds stroke and fill paths for index ranges of one data set.
pub struct SegmentPathBuilder<'a> {
    data_set: &'a DataSet,
    matrix: DAffine2,
    phase_y: f64,
    stepped: bool,
}

impl<'a> SegmentPathBuilder<'a> {
    pub fn new(data_set: &'a DataSet, transform: &PlotTransform, phase_y: f64) -> Self {
        Self {
            data_set,
            matrix: transform.value_to_pixel_matrix(),
            phase_y,
            stepped: data_set.is_stepped(),
        }
    }

    fn pixel(&self, x: f64, y: f64) -> Point<Pixels> {
        apply_matrix(&self.matrix, x, y * self.phase_y)
    }

    /// Open line through the entries of `range`. Each step `x` draws from
    /// entry `x - 1` (clamped to 0) to entry `x`; a step whose entries are
    /// missing is skipped. `None` when nothing was emitted.
    pub fn stroke_path(&self, range: IndexRange) -> Option<Path> {
        let mut path = Path::new();
        let mut last_emitted: Option<usize> = None;

        for x in range.from..=range.through {
            let prev = x.saturating_sub(1);
            let (Some(e1), Some(e2)) = (
                self.data_set.entry_for_index(prev),
                self.data_set.entry_for_index(x),
            ) else {
                tracing::trace!(index = x, "no entry, skipping stroke step");
                continue;
            };

            if last_emitted != Some(prev) {
                let start = self.pixel(e1.x, e1.y);
                if path.is_empty() {
                    path.move_to(start);
                } else {
                    path.line_to(start);
                }
            }
            last_emitted = Some(x);

            if prev == x {
                continue;
            }

            if self.stepped {
                path.line_to(self.pixel(e2.x, e1.y));
            }
            path.line_to(self.pixel(e2.x, e2.y));
        }

        if path.is_empty() {
            None
        } else {
            Some(path)
        }
    }

    /// Closed region between the entries of `range` and the baseline
    /// `fill_min` (data space, unaffected by the phase).
    pub fn fill_path(&self, range: IndexRange, fill_min: f64) -> Option<Path> {
        let mut path = Path::new();
        let mut previous: Option<&Entry> = None;

        for x in range.from..=range.through {
            let Some(e) = self.data_set.entry_for_index(x) else {
                tracing::trace!(index = x, "no entry, skipping fill step");
                continue;
            };

            match previous {
                None => {
                    path.move_to(apply_matrix(&self.matrix, e.x, fill_min));
                }
                Some(prev) if self.stepped => {
                    path.line_to(self.pixel(e.x, prev.y));
                }
                Some(_) => {}
            }
            path.line_to(self.pixel(e.x, e.y));
            previous = Some(e);
        }

        let last = previous?;
        path.line_to(apply_matrix(&self.matrix, last.x, fill_min));
        path.close();
        Some(path)
    }
}
