/// Two-point piecewise-linear map with flat extrapolation.
///
/// `x <= from.0` yields `from.1`, `x >= to.0` yields `to.1`, and points in
/// between lie on the segment. Endpoints are returned exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClampedLerp {
    pub from: (f64, f64),
    pub to: (f64, f64),
}

impl ClampedLerp {
    pub const fn new(from: (f64, f64), to: (f64, f64)) -> Self {
        Self { from, to }
    }

    pub fn eval(&self, x: f64) -> f64 {
        let (x0, y0) = self.from;
        let (x1, y1) = self.to;
        if x <= x0 {
            y0
        } else if x >= x1 {
            y1
        } else {
            y0 + (x - x0) * (y1 - y0) / (x1 - x0)
        }
    }
}

pub fn clamp01(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REDUCTION: ClampedLerp = ClampedLerp::new((-5.0, 0.0), (30.0, 1.0));

    #[test]
    fn endpoints_are_exact() {
        assert_eq!(REDUCTION.eval(-5.0), 0.0);
        assert_eq!(REDUCTION.eval(30.0), 1.0);
    }

    #[test]
    fn flat_outside_domain() {
        assert_eq!(REDUCTION.eval(-40.0), 0.0);
        assert_eq!(REDUCTION.eval(-5.000_001), 0.0);
        assert_eq!(REDUCTION.eval(30.000_001), 1.0);
        assert_eq!(REDUCTION.eval(1_000.0), 1.0);
    }

    #[test]
    fn linear_between_breakpoints() {
        let align = ClampedLerp::new((5.0, 0.0), (35.0, 1.0));
        assert!((align.eval(20.0) - 0.5).abs() < 1e-12);
        assert!((REDUCTION.eval(12.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn clamp01_bounds() {
        assert_eq!(clamp01(-0.2), 0.0);
        assert_eq!(clamp01(1.7), 1.0);
        assert_eq!(clamp01(0.42), 0.42);
    }
}
