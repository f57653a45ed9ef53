//! gpui_split_chart: line charts split at a highlighted entry, for GPUI

pub mod chart_container;
pub mod chart_view;
pub mod data_types;
pub mod delegate;
pub mod layers;
pub mod path;
pub mod renderer;
pub mod rendering;
pub mod retained;
pub mod scales;
pub mod split;
pub mod transform;
pub mod utils;

pub use chart_container::LineChartContainer;
pub use chart_view::SplitLineChartView;
pub use data_types::{DataSet, Entry, Highlight, RenderMode, SegmentAppearance, SplitChartConfig};
pub use delegate::{PathHandler, SegmentAppearanceProvider, StaticAppearances};
pub use renderer::SplitLineRenderer;
pub use retained::RetainedLineRenderer;
