use serde::{Deserialize, Serialize};

/// A single data point of a line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub x: f64,
    pub y: f64,
}

impl Entry {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Entry {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// How an x value that falls between two entries is resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rounding {
    /// First entry at or after the value.
    Up,
    /// Last entry at or before the value.
    Down,
    #[default]
    Closest,
}
