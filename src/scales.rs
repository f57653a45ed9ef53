use d3rs::scale::{LinearScale, Scale as D3Scale};

/// Linear mapping between a data domain and a pixel range.
#[derive(Clone)]
pub struct ChartScale {
    inner: LinearScale,
    domain: (f64, f64),
    range: (f32, f32),
}

impl ChartScale {
    pub fn new_linear(domain: (f64, f64), range: (f32, f32)) -> Self {
        let (d_min, d_max) = padded(domain);
        let inner = LinearScale::new()
            .domain(d_min, d_max)
            .range(range.0 as f64, range.1 as f64);
        Self {
            inner,
            domain: (d_min, d_max),
            range,
        }
    }

    pub fn map(&self, value: f64) -> f32 {
        let res = self.inner.scale(value) as f32;
        if res.is_nan() || res.is_infinite() {
            0.0
        } else {
            res
        }
    }

    pub fn invert(&self, pixel: f32) -> f64 {
        self.inner.invert(pixel as f64).unwrap_or(0.0)
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns (m, c) such that screen = value * m + c
    pub fn linear_coeffs(&self) -> (f64, f64) {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        let m = (r_max - r_min) as f64 / (d_max - d_min);
        let c = r_min as f64 - m * d_min;
        (m, c)
    }
}

fn padded(domain: (f64, f64)) -> (f64, f64) {
    let (mut d_min, mut d_max) = domain;
    if (d_max - d_min).abs() < f64::EPSILON {
        d_min -= 0.5;
        d_max += 0.5;
    }
    (d_min, d_max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coefficients_match_mapping() {
        let scale = ChartScale::new_linear((0.0, 10.0), (100.0, 0.0));
        let (m, c) = scale.linear_coeffs();
        assert_eq!(m, -10.0);
        assert_eq!(c, 100.0);
        assert_eq!(scale.map(5.0), 50.0);
    }

    #[test]
    fn flat_domain_is_padded() {
        let scale = ChartScale::new_linear((3.0, 3.0), (0.0, 100.0));
        assert_eq!(scale.domain(), (2.5, 3.5));
        assert_eq!(scale.map(3.0), 50.0);
    }
}
