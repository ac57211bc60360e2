use std::path::Path;

use serde::Serialize;

use crate::{
    foundation::core::{PathState, Point, Seconds, Units, VehicleId},
    routine::action::{Action, LightAction, MotionAction},
    routine::breakpoint::Breakpoints,
};

/// File extension of choreography documents.
pub const CHOREOGRAPHY_EXTENSION: &str = "jocs";

#[derive(Clone, Debug, Serialize)]
/// Compiled choreography: per-vehicle motion and light timelines plus metadata.
///
/// Produced once by the compiler and read-only afterwards, so it can be shared across
/// control loops (wrap it in an `Arc`) without further synchronization.
pub struct Routine {
    units: Units,
    homes: Vec<Point>,
    actions: Vec<Vec<Action>>,
    light_actions: Vec<Vec<LightAction>>,
    breakpoints: Breakpoints,
}

impl Routine {
    pub(crate) fn new(
        units: Units,
        homes: Vec<Point>,
        actions: Vec<Vec<Action>>,
        light_actions: Vec<Vec<LightAction>>,
        breakpoints: Breakpoints,
    ) -> Self {
        Self {
            units,
            homes,
            actions,
            light_actions,
            breakpoints,
        }
    }

    /// `true` when `path` names a choreography document (`*.jocs`).
    pub fn is_file(path: impl AsRef<Path>) -> bool {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(CHOREOGRAPHY_EXTENSION))
    }

    /// Number of vehicles declared by the document.
    pub fn vehicle_count(&self) -> usize {
        self.homes.len()
    }

    /// Canonical home position of `vehicle`.
    pub fn home(&self, vehicle: VehicleId) -> Option<Point> {
        self.homes.get(vehicle.index()).copied()
    }

    /// All home positions, indexed by vehicle.
    pub fn homes(&self) -> &[Point] {
        &self.homes
    }

    /// Motion timeline of `vehicle`, sorted by start time.
    pub fn actions(&self, vehicle: VehicleId) -> &[Action] {
        self.actions
            .get(vehicle.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Light timeline of `vehicle`, in document order.
    pub fn light_actions(&self, vehicle: VehicleId) -> &[LightAction] {
        self.light_actions
            .get(vehicle.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Breakpoints in document order.
    pub fn breakpoints(&self) -> &Breakpoints {
        &self.breakpoints
    }

    /// Units and scale the document was compiled with.
    pub fn units(&self) -> Units {
        self.units
    }

    /// The document declared lengths in feet.
    pub fn length_in_feet(&self) -> bool {
        self.units.length_in_feet
    }

    /// The document declared angles in degrees.
    pub fn angle_in_degrees(&self) -> bool {
        self.units.angle_in_degrees
    }

    /// Scale factor applied at load time.
    pub fn scale(&self) -> f64 {
        self.units.scale
    }

    /// Latest end time over every motion and light action.
    pub fn duration(&self) -> Seconds {
        let motion = self.actions.iter().flatten().map(Action::end_time);
        let light = self.light_actions.iter().flatten().map(LightAction::end_time);
        motion.chain(light).fold(0.0, f64::max)
    }

    /// Motion state of `vehicle` at `t`.
    ///
    /// Picks the action whose `[start, end)` covers `t`; the final action also covers its end.
    pub fn state_at(&self, vehicle: VehicleId, t: Seconds) -> Option<PathState> {
        let motions: Vec<&MotionAction> = self
            .actions(vehicle)
            .iter()
            .filter_map(Action::as_motion)
            .collect();
        let last = motions.len().checked_sub(1)?;
        motions
            .iter()
            .enumerate()
            .find(|(i, m)| {
                t >= m.start_time() && (t < m.end_time() || (*i == last && t <= m.end_time()))
            })
            .map(|(_, m)| m.path_state(t))
    }

    /// Light intensity of `vehicle` at `t`, from the first light action covering `t`.
    pub fn intensity_at(&self, vehicle: VehicleId, t: Seconds) -> Option<f64> {
        self.light_actions(vehicle)
            .iter()
            .find(|l| t >= l.start_time() && t <= l.end_time())
            .map(|l| l.intensity(t))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/routine/timeline.rs"]
mod tests;
