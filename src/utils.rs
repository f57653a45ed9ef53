use gpui::Pixels;

pub trait PixelsExt {
    fn as_f32(&self) -> f32;
    fn as_f64(&self) -> f64;
}

impl PixelsExt for Pixels {
    fn as_f32(&self) -> f32 {
        f32::from(*self)
    }

    fn as_f64(&self) -> f64 {
        f32::from(*self) as f64
    }
}
