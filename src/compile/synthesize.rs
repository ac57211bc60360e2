//! Second compiler pass: replace transition placeholders with boundary-fit trajectories.

use crate::{
    compile::report::{Diagnostic, UnresolvedReason},
    foundation::core::{PathState, Point, VehicleId},
    foundation::error::ChorusResult,
    routine::action::{Action, ActionKind, EmptyAction, MotionAction},
    trajectory::polynomial::PolynomialTrajectory,
};

/// Stable sort by start time. Returns `true` if the order changed.
pub(crate) fn order_chronologically(actions: &mut [Action]) -> bool {
    let sorted = actions
        .windows(2)
        .all(|w| w[0].start_time() <= w[1].start_time());
    if sorted {
        return false;
    }
    actions.sort_by(|a, b| a.start_time().total_cmp(&b.start_time()));
    true
}

/// Resolve every placeholder of one vehicle in place, using its positional neighbours.
///
/// The first entry bridges from rest at `home`. A placeholder without a motion on both sides
/// cannot be fit; it is removed and reported.
#[tracing::instrument(skip(home, actions), fields(entries = actions.len()))]
pub(crate) fn synthesize_vehicle(
    vehicle: VehicleId,
    home: &Point,
    mut actions: Vec<Action>,
) -> ChorusResult<(Vec<Action>, Vec<Diagnostic>)> {
    let mut diagnostics = Vec::new();
    let mut resolved = 0usize;

    for j in 0..actions.len() {
        let Action::Empty(placeholder) = &actions[j] else {
            continue;
        };
        let placeholder = placeholder.clone();

        let end_state = match actions.get(j + 1) {
            None => Err(UnresolvedReason::NoSuccessor),
            Some(next) => boundary_state(next, Boundary::Start),
        };
        let start_state = if j == 0 {
            Ok(PathState::at_rest(*home))
        } else {
            boundary_state(&actions[j - 1], Boundary::End)
        };

        match (start_state, end_state) {
            (Ok(start), Ok(end)) => {
                let fit = PolynomialTrajectory::fit(
                    &start,
                    placeholder.start_time,
                    &end,
                    placeholder.end_time,
                )?;
                actions[j] = Action::Motion(MotionAction::new(vehicle, ActionKind::Transition, fit));
                resolved += 1;
            }
            (_, Err(reason)) | (Err(reason), _) => {
                diagnostics.push(unresolved(&placeholder, reason));
            }
        }
    }

    actions.retain(Action::is_resolved);
    tracing::debug!(resolved, unresolved = diagnostics.len(), "transitions synthesized");
    Ok((actions, diagnostics))
}

#[derive(Clone, Copy)]
enum Boundary {
    Start,
    End,
}

fn boundary_state(neighbour: &Action, at: Boundary) -> Result<PathState, UnresolvedReason> {
    match neighbour {
        Action::Motion(m) => Ok(match at {
            Boundary::Start => m.path_state(m.start_time()),
            Boundary::End => m.path_state(m.end_time()),
        }),
        // Light actions never enter the motion list; treat one like a gap if it does.
        Action::Empty(_) | Action::Light(_) => Err(UnresolvedReason::AdjacentPlaceholder),
    }
}

fn unresolved(placeholder: &EmptyAction, reason: UnresolvedReason) -> Diagnostic {
    Diagnostic::UnresolvedTransition {
        vehicle: placeholder.vehicle,
        start_time: placeholder.start_time,
        end_time: placeholder.end_time,
        reason,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/synthesize.rs"]
mod tests;
