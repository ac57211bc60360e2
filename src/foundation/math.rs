use crate::foundation::core::Point;

pub(crate) fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() < tolerance
}

pub(crate) fn points_close(a: &Point, b: &Point, tolerance: f64) -> bool {
    (a - b).norm() < tolerance
}

/// Fraction of `[t0, t1]` covered at `t`, clamped to `[0, 1]`. Zero-length spans yield 0.
pub(crate) fn span_fraction(t0: f64, t1: f64, t: f64) -> f64 {
    let span = t1 - t0;
    if span <= 0.0 {
        return 0.0;
    }
    ((t - t0) / span).clamp(0.0, 1.0)
}

pub(crate) fn clamp_time(t0: f64, t1: f64, t: f64) -> f64 {
    if t1 <= t0 {
        return t0;
    }
    t.clamp(t0, t1)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
