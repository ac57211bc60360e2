use serde::{Deserialize, Serialize};

use crate::{
    foundation::core::{PathState, Point, Seconds},
    foundation::error::{ChorusError, ChorusResult},
    foundation::math::span_fraction,
    trajectory::polynomial::PolynomialTrajectory,
};

/// Evaluation contract shared by every motion trajectory.
///
/// Sampling outside `[start_time, end_time]` clamps the time into the domain, so callers get
/// the boundary state instead of an extrapolation.
pub trait PathEval {
    /// Domain start, in routine seconds.
    fn start_time(&self) -> Seconds;
    /// Domain end, in routine seconds.
    fn end_time(&self) -> Seconds;
    /// Full state at `t`.
    fn state(&self, t: Seconds) -> PathState;

    /// Position at `t`.
    fn position(&self, t: Seconds) -> Point {
        self.state(t).position
    }

    /// Velocity at `t`.
    fn velocity(&self, t: Seconds) -> Point {
        self.state(t).velocity
    }

    /// Acceleration at `t`.
    fn acceleration(&self, t: Seconds) -> Point {
        self.state(t).acceleration
    }

    /// Position at the start of the domain.
    fn start_point(&self) -> Point {
        self.position(self.start_time())
    }

    /// Position at the end of the domain.
    fn end_point(&self) -> Point {
        self.position(self.end_time())
    }
}

fn check_span(t0: Seconds, t1: Seconds, what: &str) -> ChorusResult<()> {
    if !t0.is_finite() || !t1.is_finite() {
        return Err(ChorusError::trajectory(format!(
            "{what} times must be finite"
        )));
    }
    if t1 < t0 {
        return Err(ChorusError::trajectory(format!(
            "{what} ends before it starts ({t1} < {t0})"
        )));
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// Constant-velocity straight segment. A zero-length span is a stationary point.
pub struct LinearTrajectory {
    /// Position at `t0`.
    pub start: Point,
    /// Position at `t1`.
    pub end: Point,
    /// Domain start.
    pub t0: Seconds,
    /// Domain end.
    pub t1: Seconds,
}

impl LinearTrajectory {
    /// Segment from `start` at `t0` to `end` at `t1`.
    pub fn new(start: Point, t0: Seconds, end: Point, t1: Seconds) -> ChorusResult<Self> {
        check_span(t0, t1, "linear trajectory")?;
        Ok(Self { start, end, t0, t1 })
    }

    fn constant_velocity(&self) -> Point {
        let span = self.t1 - self.t0;
        if span <= 0.0 {
            return Point::zeros();
        }
        (self.end - self.start) / span
    }
}

impl PathEval for LinearTrajectory {
    fn start_time(&self) -> Seconds {
        self.t0
    }

    fn end_time(&self) -> Seconds {
        self.t1
    }

    fn state(&self, t: Seconds) -> PathState {
        let s = span_fraction(self.t0, self.t1, t);
        PathState {
            position: self.start + (self.end - self.start) * s,
            velocity: self.constant_velocity(),
            acceleration: Point::zeros(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// Arc on a horizontal circle: `origin + radius * (cos θ, sin θ, 0)`.
///
/// θ moves linearly from `theta1` at `t0` to `theta2` at `t1`. The circle lies in the plane
/// `z = origin.z`.
pub struct CircularTrajectory {
    /// Circle center.
    pub origin: Point,
    /// Radius in meters.
    pub radius: f64,
    /// Angle at `t0`, radians.
    pub theta1: f64,
    /// Angle at `t1`, radians.
    pub theta2: f64,
    /// Domain start.
    pub t0: Seconds,
    /// Domain end.
    pub t1: Seconds,
}

impl CircularTrajectory {
    /// Arc from `theta1` at `t0` to `theta2` at `t1`.
    pub fn new(
        origin: Point,
        radius: f64,
        theta1: f64,
        t0: Seconds,
        theta2: f64,
        t1: Seconds,
    ) -> ChorusResult<Self> {
        check_span(t0, t1, "circular trajectory")?;
        if !radius.is_finite() || radius < 0.0 {
            return Err(ChorusError::trajectory(
                "circle radius must be finite and >= 0",
            ));
        }
        Ok(Self {
            origin,
            radius,
            theta1,
            theta2,
            t0,
            t1,
        })
    }

    fn angular_rate(&self) -> f64 {
        let span = self.t1 - self.t0;
        if span <= 0.0 {
            return 0.0;
        }
        (self.theta2 - self.theta1) / span
    }

    /// Angle at `t`, radians.
    pub fn theta(&self, t: Seconds) -> f64 {
        let s = span_fraction(self.t0, self.t1, t);
        self.theta1 + (self.theta2 - self.theta1) * s
    }
}

impl PathEval for CircularTrajectory {
    fn start_time(&self) -> Seconds {
        self.t0
    }

    fn end_time(&self) -> Seconds {
        self.t1
    }

    fn state(&self, t: Seconds) -> PathState {
        let theta = self.theta(t);
        let w = self.angular_rate();
        let (sin, cos) = theta.sin_cos();
        let r = self.radius;
        PathState {
            position: self.origin + Point::new(r * cos, r * sin, 0.0),
            velocity: Point::new(-r * w * sin, r * w * cos, 0.0),
            acceleration: Point::new(-r * w * w * cos, -r * w * w * sin, 0.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// Every motion trajectory kind the compiler produces.
pub enum Trajectory {
    /// Straight segment (lines and hovers).
    Linear(LinearTrajectory),
    /// Circular arc.
    Circular(CircularTrajectory),
    /// Boundary-fit quintic (synthesized transitions).
    Polynomial(PolynomialTrajectory),
}

impl PathEval for Trajectory {
    fn start_time(&self) -> Seconds {
        match self {
            Self::Linear(l) => l.start_time(),
            Self::Circular(c) => c.start_time(),
            Self::Polynomial(p) => p.start_time(),
        }
    }

    fn end_time(&self) -> Seconds {
        match self {
            Self::Linear(l) => l.end_time(),
            Self::Circular(c) => c.end_time(),
            Self::Polynomial(p) => p.end_time(),
        }
    }

    fn state(&self, t: Seconds) -> PathState {
        match self {
            Self::Linear(l) => l.state(t),
            Self::Circular(c) => c.state(t),
            Self::Polynomial(p) => p.state(t),
        }
    }
}

impl From<LinearTrajectory> for Trajectory {
    fn from(v: LinearTrajectory) -> Self {
        Self::Linear(v)
    }
}

impl From<CircularTrajectory> for Trajectory {
    fn from(v: CircularTrajectory) -> Self {
        Self::Circular(v)
    }
}

impl From<PolynomialTrajectory> for Trajectory {
    fn from(v: PolynomialTrajectory) -> Self {
        Self::Polynomial(v)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trajectory/motion.rs"]
mod tests;
