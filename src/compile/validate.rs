use crate::{
    compile::options::{CompileOptions, DEFAULT_SPACE_TOLERANCE, DEFAULT_TIME_TOLERANCE},
    compile::report::{ContinuityViolation, ViolationKind},
    foundation::core::{Point, VehicleId},
    foundation::math::{approx_eq, points_close},
    routine::action::Action,
    routine::timeline::Routine,
};

/// Checks that each vehicle's motion timeline is contiguous in time and space.
///
/// Every violation is collected; checking never stops early. After a mismatch the running
/// time and point still advance to the offending action's end, so each action is judged only
/// against its immediate predecessor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContinuityValidator {
    /// Allowed time gap, seconds.
    pub time_tolerance: f64,
    /// Allowed position gap, meters.
    pub space_tolerance: f64,
}

impl Default for ContinuityValidator {
    fn default() -> Self {
        Self {
            time_tolerance: DEFAULT_TIME_TOLERANCE,
            space_tolerance: DEFAULT_SPACE_TOLERANCE,
        }
    }
}

impl ContinuityValidator {
    /// Validator using the tolerances in `opts`.
    pub fn from_options(opts: &CompileOptions) -> Self {
        Self {
            time_tolerance: opts.time_tolerance,
            space_tolerance: opts.space_tolerance,
        }
    }

    /// Violations for every vehicle of `routine`, in vehicle order.
    pub fn validate(&self, routine: &Routine) -> Vec<ContinuityViolation> {
        routine
            .homes()
            .iter()
            .enumerate()
            .flat_map(|(i, home)| {
                let vehicle = VehicleId(i);
                self.validate_vehicle(vehicle, home, routine.actions(vehicle))
            })
            .collect()
    }

    /// Violations for one vehicle whose `actions` are already sorted by start time.
    pub fn validate_vehicle(
        &self,
        vehicle: VehicleId,
        home: &Point,
        actions: &[Action],
    ) -> Vec<ContinuityViolation> {
        let mut violations = Vec::new();
        let mut running_time = 0.0;
        let mut running_point = *home;

        for action in actions {
            let start_time = action.start_time();
            let start_point = match action {
                Action::Light(_) => continue,
                Action::Empty(_) => None,
                Action::Motion(m) => Some(m.start_point()),
            };

            if !approx_eq(start_time, running_time, self.time_tolerance) {
                violations.push(ContinuityViolation {
                    vehicle,
                    time: start_time,
                    kind: ViolationKind::Temporal {
                        expected: running_time,
                        actual: start_time,
                    },
                });
            }
            if let Some(actual) = start_point
                && !points_close(&actual, &running_point, self.space_tolerance)
            {
                violations.push(ContinuityViolation {
                    vehicle,
                    time: start_time,
                    kind: ViolationKind::Spatial {
                        expected: running_point,
                        actual,
                    },
                });
            }

            running_time = action.end_time();
            if let Some(end) = action.end_point() {
                running_point = end;
            }
        }
        violations
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/validate.rs"]
mod tests;
