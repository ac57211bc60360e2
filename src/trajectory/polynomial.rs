use serde::{Deserialize, Serialize};

use crate::{
    foundation::core::{PathState, Point, Seconds},
    foundation::error::{ChorusError, ChorusResult},
    foundation::math::clamp_time,
    trajectory::motion::PathEval,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// Per-axis quintic `p(τ) = Σ c_k τ^k`, with `τ = t - t0`.
///
/// Built by [`PolynomialTrajectory::fit`], which matches position, velocity and acceleration at
/// both ends of the span exactly (six scalar constraints per axis).
pub struct PolynomialTrajectory {
    /// Coefficients `c0..c5`, one vector per power.
    pub coeffs: [Point; 6],
    /// Domain start.
    pub t0: Seconds,
    /// Domain end.
    pub t1: Seconds,
}

impl PolynomialTrajectory {
    /// Fit the minimal-degree polynomial joining `start` at `t0` to `end` at `t1`.
    pub fn fit(
        start: &PathState,
        t0: Seconds,
        end: &PathState,
        t1: Seconds,
    ) -> ChorusResult<Self> {
        if !t0.is_finite() || !t1.is_finite() {
            return Err(ChorusError::trajectory(
                "boundary fit times must be finite",
            ));
        }
        let span = t1 - t0;
        if span <= 0.0 {
            return Err(ChorusError::trajectory(format!(
                "boundary fit needs a positive span, got [{t0}, {t1}]"
            )));
        }

        let (p0, v0, a0) = (start.position, start.velocity, start.acceleration);
        let (p1, v1, a1) = (end.position, end.velocity, end.acceleration);
        let t2 = span * span;
        let t3 = t2 * span;
        let t4 = t3 * span;
        let t5 = t4 * span;
        let dp = p1 - p0;

        let c3 = (dp * 20.0 - (v1 * 8.0 + v0 * 12.0) * span - (a0 * 3.0 - a1) * t2) / (2.0 * t3);
        let c4 =
            (-dp * 30.0 + (v1 * 14.0 + v0 * 16.0) * span + (a0 * 3.0 - a1 * 2.0) * t2) / (2.0 * t4);
        let c5 = (dp * 12.0 - (v1 + v0) * 6.0 * span - (a0 - a1) * t2) / (2.0 * t5);

        Ok(Self {
            coeffs: [p0, v0, a0 * 0.5, c3, c4, c5],
            t0,
            t1,
        })
    }
}

impl PathEval for PolynomialTrajectory {
    fn start_time(&self) -> Seconds {
        self.t0
    }

    fn end_time(&self) -> Seconds {
        self.t1
    }

    fn state(&self, t: Seconds) -> PathState {
        let tau = clamp_time(self.t0, self.t1, t) - self.t0;
        let c = &self.coeffs;

        // Horner for position and its two derivatives.
        let mut position = c[5];
        for k in (0..5).rev() {
            position = position * tau + c[k];
        }
        let mut velocity = c[5] * 5.0;
        for k in (1..5).rev() {
            velocity = velocity * tau + c[k] * k as f64;
        }
        let mut acceleration = c[5] * 20.0;
        for k in (2..5).rev() {
            acceleration = acceleration * tau + c[k] * (k * (k - 1)) as f64;
        }

        PathState {
            position,
            velocity,
            acceleration,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trajectory/polynomial.rs"]
mod tests;
