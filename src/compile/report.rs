use std::fmt;

use serde::Serialize;

use crate::foundation::core::{Point, Seconds, VehicleId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
/// How bad a diagnostic is. Policy stays with the caller.
pub enum Severity {
    /// Output is usable as-is.
    Warning,
    /// Output is incomplete or discontinuous.
    Error,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// Which continuity rule failed, with the expected and observed values.
pub enum ViolationKind {
    /// Action starts at a different time than its predecessor ended.
    Temporal {
        /// Predecessor end time (or 0 for the first action).
        expected: Seconds,
        /// Declared start time.
        actual: Seconds,
    },
    /// Action starts somewhere other than where its predecessor ended.
    Spatial {
        /// Predecessor end point (or home for the first action).
        expected: Point,
        /// Declared start point.
        actual: Point,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
/// A temporal or spatial gap between two consecutive motion actions of one vehicle.
pub struct ContinuityViolation {
    /// Offending vehicle.
    pub vehicle: VehicleId,
    /// Start time of the offending action.
    pub time: Seconds,
    /// Rule and values.
    pub kind: ViolationKind,
}

impl ContinuityViolation {
    /// `true` for temporal gaps.
    pub fn is_temporal(&self) -> bool {
        matches!(self.kind, ViolationKind::Temporal { .. })
    }

    /// `true` for spatial jumps.
    pub fn is_spatial(&self) -> bool {
        matches!(self.kind, ViolationKind::Spatial { .. })
    }
}

impl fmt::Display for ContinuityViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationKind::Temporal { expected, actual } => write!(
                f,
                "time discontinuity for vehicle {}: action starts at {actual}, previous ended at {expected}",
                self.vehicle
            ),
            ViolationKind::Spatial { expected, actual } => write!(
                f,
                "spatial discontinuity for vehicle {} at t={}: jump from {} to {}",
                self.vehicle,
                self.time,
                fmt_point(expected),
                fmt_point(actual)
            ),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
/// Why a transition placeholder could not be synthesized.
pub enum UnresolvedReason {
    /// Last motion entry of the vehicle; there is no state to bridge towards.
    NoSuccessor,
    /// A neighbouring entry is itself an unresolved placeholder.
    AdjacentPlaceholder,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
/// A recoverable condition found while compiling.
pub enum Diagnostic {
    /// A sub-action with an unrecognized type tag was skipped.
    UnknownActionType {
        /// Index into `chor`.
        slot: usize,
        /// Index into the slot's `action` array.
        action: usize,
        /// The unrecognized tag.
        type_tag: String,
    },
    /// The vehicle's entries were not in chronological order and were sorted before synthesis.
    Reordered {
        /// Affected vehicle.
        vehicle: VehicleId,
    },
    /// A transition placeholder was dropped from the routine.
    UnresolvedTransition {
        /// Affected vehicle.
        vehicle: VehicleId,
        /// Placeholder start.
        start_time: Seconds,
        /// Placeholder end.
        end_time: Seconds,
        /// Why synthesis was not possible.
        reason: UnresolvedReason,
    },
    /// Consecutive motions do not join up.
    Continuity(ContinuityViolation),
    /// A vehicle leaves the declared theater volume.
    OutOfBounds {
        /// Affected vehicle.
        vehicle: VehicleId,
        /// First sampled time outside the volume.
        time: Seconds,
        /// Position at that time.
        point: Point,
    },
}

impl Diagnostic {
    /// Severity class.
    pub fn severity(&self) -> Severity {
        match self {
            Self::UnknownActionType { .. } | Self::Reordered { .. } | Self::OutOfBounds { .. } => {
                Severity::Warning
            }
            Self::UnresolvedTransition { .. } | Self::Continuity(_) => Severity::Error,
        }
    }

    /// Affected vehicle, when the diagnostic is vehicle-specific.
    pub fn vehicle(&self) -> Option<VehicleId> {
        match self {
            Self::UnknownActionType { .. } => None,
            Self::Reordered { vehicle }
            | Self::UnresolvedTransition { vehicle, .. }
            | Self::OutOfBounds { vehicle, .. } => Some(*vehicle),
            Self::Continuity(v) => Some(v.vehicle),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownActionType {
                slot,
                action,
                type_tag,
            } => write!(
                f,
                "unknown action type {type_tag:?} at $.chor[{slot}].action[{action}] skipped"
            ),
            Self::Reordered { vehicle } => write!(
                f,
                "actions for vehicle {vehicle} were not chronological and have been sorted"
            ),
            Self::UnresolvedTransition {
                vehicle,
                start_time,
                end_time,
                reason,
            } => {
                let why = match reason {
                    UnresolvedReason::NoSuccessor => "no following motion",
                    UnresolvedReason::AdjacentPlaceholder => "adjacent transition",
                };
                write!(
                    f,
                    "unresolved transition for vehicle {vehicle} over [{start_time}, {end_time}]: {why}"
                )
            }
            Self::Continuity(v) => write!(f, "{v}"),
            Self::OutOfBounds {
                vehicle,
                time,
                point,
            } => write!(
                f,
                "vehicle {vehicle} leaves the theater volume at t={time} ({})",
                fmt_point(point)
            ),
        }
    }
}

fn fmt_point(p: &Point) -> String {
    format!("[{} {} {}]", p.x, p.y, p.z)
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
/// Everything recoverable that happened during one compilation, in discovery order.
pub struct CompileReport {
    diagnostics: Vec<Diagnostic>,
}

impl CompileReport {
    /// Record a diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity() {
            Severity::Warning => tracing::warn!(%diagnostic, "compile warning"),
            Severity::Error => tracing::warn!(%diagnostic, "compile error"),
        }
        self.diagnostics.push(diagnostic);
    }

    pub(crate) fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        for d in diagnostics {
            self.push(d);
        }
    }

    /// All diagnostics in discovery order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// `true` when nothing was reported.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// `true` when any diagnostic has [`Severity::Error`].
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity() == Severity::Error)
    }

    /// Diagnostics with [`Severity::Error`].
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity() == Severity::Error)
    }

    /// Diagnostics with [`Severity::Warning`].
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity() == Severity::Warning)
    }

    /// Continuity violations only.
    pub fn violations(&self) -> impl Iterator<Item = &ContinuityViolation> {
        self.diagnostics.iter().filter_map(|d| match d {
            Diagnostic::Continuity(v) => Some(v),
            _ => None,
        })
    }

    /// One-line count summary, e.g. `2 error(s), 1 warning(s)`.
    pub fn summary(&self) -> String {
        format!(
            "{} error(s), {} warning(s)",
            self.errors().count(),
            self.warnings().count()
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/report.rs"]
mod tests;
