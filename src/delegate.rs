//! Hooks through which the host decides how each side of a split looks.

use crate::data_types::{DrawingPathSettings, Entry, Highlight, SegmentAppearance};
use crate::path::Path;

/// Supplies segment appearances. `None` from a hook means "not provided":
/// the renderer falls back to the data set's own styling.
pub trait SegmentAppearanceProvider {
    /// Appearance of the whole line while nothing is highlighted.
    fn default_appearance(&self) -> Option<SegmentAppearance>;

    /// Appearance up to and including the highlighted entry.
    fn appearance_before(
        &self,
        highlighted_entry: &Entry,
        highlight: &Highlight,
    ) -> Option<SegmentAppearance>;

    /// Appearance after the highlighted entry.
    fn appearance_after(
        &self,
        highlighted_entry: &Entry,
        highlight: &Highlight,
    ) -> Option<SegmentAppearance>;
}

/// Fixed appearances, independent of which entry is highlighted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StaticAppearances {
    pub default: Option<SegmentAppearance>,
    pub before: Option<SegmentAppearance>,
    pub after: Option<SegmentAppearance>,
}

impl SegmentAppearanceProvider for StaticAppearances {
    fn default_appearance(&self) -> Option<SegmentAppearance> {
        self.default.clone()
    }

    fn appearance_before(&self, _: &Entry, _: &Highlight) -> Option<SegmentAppearance> {
        self.before.clone()
    }

    fn appearance_after(&self, _: &Entry, _: &Highlight) -> Option<SegmentAppearance> {
        self.after.clone()
    }
}

/// Receives the full-range spline built during an immediate-mode pass.
pub trait PathHandler {
    fn handle_path(&mut self, path: &Path, settings: &DrawingPathSettings);
}
