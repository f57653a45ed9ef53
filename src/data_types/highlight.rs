use gpui::{px, Pixels, Point};

/// The currently selected point, in data space and pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Highlight {
    pub x: f64,
    pub y: f64,
    pub draw_x: f32,
    pub draw_y: f32,
    pub data_set_index: usize,
}

impl Highlight {
    pub fn new(x: f64, y: f64, draw_x: f32, draw_y: f32) -> Self {
        Self {
            x,
            y,
            draw_x,
            draw_y,
            data_set_index: 0,
        }
    }

    pub fn with_data_set_index(mut self, index: usize) -> Self {
        self.data_set_index = index;
        self
    }

    pub fn draw_point(&self) -> Point<Pixels> {
        Point::new(px(self.draw_x), px(self.draw_y))
    }
}
