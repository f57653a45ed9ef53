//! Transform helper for coordinate projection

use crate::scales::ChartScale;
use crate::utils::PixelsExt;
use glam::{DAffine2, DMat2, DVec2};
use gpui::*;

#[derive(Clone)]
pub struct PlotTransform {
    pub x_scale: ChartScale,
    pub y_scale: ChartScale,
    pub bounds: Bounds<Pixels>,
}

impl PlotTransform {
    pub fn new(x_scale: ChartScale, y_scale: ChartScale, bounds: Bounds<Pixels>) -> Self {
        Self {
            x_scale,
            y_scale,
            bounds,
        }
    }

    /// Builds a transform whose y range is flipped so larger values sit higher on screen.
    pub fn for_domains(x_domain: (f64, f64), y_domain: (f64, f64), bounds: Bounds<Pixels>) -> Self {
        let width = bounds.size.width.as_f32();
        let height = bounds.size.height.as_f32();
        Self::new(
            ChartScale::new_linear(x_domain, (0.0, width)),
            ChartScale::new_linear(y_domain, (height, 0.0)),
            bounds,
        )
    }

    pub fn data_to_screen(&self, point: Point<f64>) -> Point<Pixels> {
        Point::new(
            self.bounds.origin.x + px(self.x_scale.map(point.x)),
            self.bounds.origin.y + px(self.y_scale.map(point.y)),
        )
    }

    pub fn screen_to_data(&self, point: Point<Pixels>) -> Point<f64> {
        Point::new(
            self.x_scale
                .invert((point.x - self.bounds.origin.x).as_f32()),
            self.y_scale
                .invert((point.y - self.bounds.origin.y).as_f32()),
        )
    }

    /// Affine matrix mapping data space straight to pixel space, origin included.
    pub fn value_to_pixel_matrix(&self) -> DAffine2 {
        let (x_m, x_c) = self.x_scale.linear_coeffs();
        let (y_m, y_c) = self.y_scale.linear_coeffs();

        DAffine2::from_mat2_translation(
            DMat2::from_diagonal(DVec2::new(x_m, y_m)),
            DVec2::new(
                self.bounds.origin.x.as_f64() + x_c,
                self.bounds.origin.y.as_f64() + y_c,
            ),
        )
    }

    /// Projects a data value with the vertical animation phase applied to y.
    pub fn value_to_pixel(&self, x: f64, y: f64, phase_y: f64) -> Point<Pixels> {
        apply_matrix(&self.value_to_pixel_matrix(), x, y * phase_y)
    }

    /// Whether a pixel lies inside the plot rect, edges included.
    pub fn is_in_bounds(&self, point: Point<Pixels>) -> bool {
        let origin = self.bounds.origin;
        let size = self.bounds.size;
        point.x >= origin.x
            && point.x <= origin.x + size.width
            && point.y >= origin.y
            && point.y <= origin.y + size.height
    }
}

/// Applies a value-to-pixel matrix to a single data-space coordinate.
pub fn apply_matrix(matrix: &DAffine2, x: f64, y: f64) -> Point<Pixels> {
    let p = matrix.transform_point2(DVec2::new(x, y));
    Point::new(px(p.x as f32), px(p.y as f32))
}
