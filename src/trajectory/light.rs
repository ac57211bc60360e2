use serde::{Deserialize, Serialize};

use crate::{
    foundation::core::Seconds,
    foundation::error::{ChorusError, ChorusResult},
    foundation::math::span_fraction,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// Linear intensity ramp from `start_intensity` at `t0` to `end_intensity` at `t1`.
pub struct IntensityRamp {
    /// Intensity at `t0`.
    pub start_intensity: f64,
    /// Intensity at `t1`.
    pub end_intensity: f64,
    /// Domain start.
    pub t0: Seconds,
    /// Domain end.
    pub t1: Seconds,
}

impl IntensityRamp {
    /// Ramp over `[t0, t1]`.
    pub fn new(
        start_intensity: f64,
        t0: Seconds,
        end_intensity: f64,
        t1: Seconds,
    ) -> ChorusResult<Self> {
        if !(t0.is_finite() && t1.is_finite()) || t1 < t0 {
            return Err(ChorusError::trajectory(format!(
                "light ramp span [{t0}, {t1}] is invalid"
            )));
        }
        Ok(Self {
            start_intensity,
            end_intensity,
            t0,
            t1,
        })
    }

    /// Ramp value at `t`, clamped to the domain.
    pub fn intensity(&self, t: Seconds) -> f64 {
        let s = span_fraction(self.t0, self.t1, t);
        self.start_intensity + (self.end_intensity - self.start_intensity) * s
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// Intensity ramp gated on and off `bps` times per second.
///
/// Each period starts "on"; the second half of the period is dark.
pub struct StrobeTrajectory {
    /// Envelope of the strobe.
    pub ramp: IntensityRamp,
    /// Blinks per second. Non-positive means always on.
    pub bps: f64,
}

impl StrobeTrajectory {
    /// Whether the strobe is lit at `t`.
    pub fn is_on(&self, t: Seconds) -> bool {
        if self.bps <= 0.0 || !self.bps.is_finite() {
            return true;
        }
        let elapsed = (t - self.ramp.t0).max(0.0);
        (elapsed * self.bps).fract() < 0.5
    }

    /// Output intensity at `t`.
    pub fn intensity(&self, t: Seconds) -> f64 {
        if self.is_on(t) {
            self.ramp.intensity(t)
        } else {
            0.0
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// Light trajectory kinds.
pub enum LightTrajectory {
    /// Plain intensity ramp (`light`).
    Light(IntensityRamp),
    /// Blinking ramp (`strobe`).
    Strobe(StrobeTrajectory),
}

impl LightTrajectory {
    /// Domain start.
    pub fn start_time(&self) -> Seconds {
        match self {
            Self::Light(r) => r.t0,
            Self::Strobe(s) => s.ramp.t0,
        }
    }

    /// Domain end.
    pub fn end_time(&self) -> Seconds {
        match self {
            Self::Light(r) => r.t1,
            Self::Strobe(s) => s.ramp.t1,
        }
    }

    /// Output intensity at `t`.
    pub fn intensity(&self, t: Seconds) -> f64 {
        match self {
            Self::Light(r) => r.intensity(t),
            Self::Strobe(s) => s.intensity(t),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trajectory/light.rs"]
mod tests;
