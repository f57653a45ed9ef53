use gpui::{Bounds, Pixels};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

/// Stroke parameters handed to the retained renderer once per draw pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawingPathSettings {
    pub drawing_rect: Bounds<Pixels>,
    pub line_width: f32,
    pub line_cap: LineCap,
}

impl DrawingPathSettings {
    pub fn new(drawing_rect: Bounds<Pixels>, line_width: f32, line_cap: LineCap) -> Self {
        Self {
            drawing_rect,
            line_width,
            line_cap,
        }
    }
}
