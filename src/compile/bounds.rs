use serde::Serialize;

use crate::{
    compile::report::Diagnostic,
    foundation::core::{Point, VehicleId},
    foundation::error::{ChorusError, ChorusResult},
    routine::action::Action,
    trajectory::motion::PathEval,
};

const VOLUME_PATH: &str = "$.theater_volume";

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
/// Axis-aligned box the vehicles must stay inside.
pub struct TheaterVolume {
    /// Lower corner.
    pub min: Point,
    /// Upper corner.
    pub max: Point,
}

impl TheaterVolume {
    /// Box spanning `min..=max`; every axis needs `min <= max`.
    ///
    /// An inverted box is a malformed `theater_volume` section.
    pub fn new(min: Point, max: Point) -> ChorusResult<Self> {
        for axis in 0..3 {
            if min[axis] > max[axis] {
                return Err(ChorusError::malformed(
                    VOLUME_PATH,
                    format!(
                        "min exceeds max on axis {axis} ({} > {})",
                        min[axis], max[axis]
                    ),
                ));
            }
        }
        Ok(Self { min, max })
    }

    /// `true` when `p` is inside or on the boundary.
    pub fn contains(&self, p: &Point) -> bool {
        (0..3).all(|a| p[a] >= self.min[a] && p[a] <= self.max[a])
    }
}

/// One `OutOfBounds` per motion action that leaves the volume, reporting its first bad sample.
pub(crate) fn check_bounds(
    vehicle: VehicleId,
    home: &Point,
    actions: &[Action],
    volume: &TheaterVolume,
    samples: usize,
) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    if !volume.contains(home) {
        out.push(Diagnostic::OutOfBounds {
            vehicle,
            time: 0.0,
            point: *home,
        });
    }

    for motion in actions.iter().filter_map(Action::as_motion) {
        let t0 = motion.trajectory.start_time();
        let t1 = motion.trajectory.end_time();
        let first_outside = (0..=samples)
            .map(|i| t0 + (t1 - t0) * (i as f64 / samples as f64))
            .map(|t| (t, motion.trajectory.position(t)))
            .find(|(_, p)| !volume.contains(p));
        if let Some((time, point)) = first_outside {
            out.push(Diagnostic::OutOfBounds {
                vehicle,
                time,
                point,
            });
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/compile/bounds.rs"]
mod tests;
