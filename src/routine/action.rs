use serde::{Deserialize, Serialize};

use crate::{
    foundation::core::{PathState, Point, Seconds, VehicleId},
    trajectory::light::LightTrajectory,
    trajectory::motion::{PathEval, Trajectory},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Discriminant shared by every action variant.
pub enum ActionKind {
    /// Straight segment between two authored points.
    Line,
    /// Circular arc.
    Circle,
    /// Hold (or drift between offsets) at one authored point.
    Hover,
    /// Synthesized bridge between two authored motions.
    Transition,
    /// Intensity ramp.
    Light,
    /// Blinking intensity ramp.
    Strobe,
}

impl ActionKind {
    /// Parse a document type tag. Unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "transition" => Some(Self::Transition),
            "line" => Some(Self::Line),
            "circle" => Some(Self::Circle),
            "hover" => Some(Self::Hover),
            "light" => Some(Self::Light),
            "strobe" => Some(Self::Strobe),
            _ => None,
        }
    }

    /// Document type tag.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Circle => "circle",
            Self::Hover => "hover",
            Self::Transition => "transition",
            Self::Light => "light",
            Self::Strobe => "strobe",
        }
    }

    /// `true` for kinds that live on the light timeline.
    pub fn is_light(self) -> bool {
        matches!(self, Self::Light | Self::Strobe)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// Authored transition waiting for synthesis. Never part of a finished routine.
pub struct EmptyAction {
    /// Owning vehicle.
    pub vehicle: VehicleId,
    /// Span start.
    pub start_time: Seconds,
    /// Span end.
    pub end_time: Seconds,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// A resolved motion primitive.
pub struct MotionAction {
    /// Owning vehicle.
    pub vehicle: VehicleId,
    /// Line, circle, hover or transition.
    pub kind: ActionKind,
    /// Path followed over the action's span.
    pub trajectory: Trajectory,
}

impl MotionAction {
    /// Wrap `trajectory` as a `kind` action for `vehicle`.
    pub fn new(vehicle: VehicleId, kind: ActionKind, trajectory: impl Into<Trajectory>) -> Self {
        Self {
            vehicle,
            kind,
            trajectory: trajectory.into(),
        }
    }

    /// Span start.
    pub fn start_time(&self) -> Seconds {
        self.trajectory.start_time()
    }

    /// Span end.
    pub fn end_time(&self) -> Seconds {
        self.trajectory.end_time()
    }

    /// Position at the span start.
    pub fn start_point(&self) -> Point {
        self.trajectory.start_point()
    }

    /// Position at the span end.
    pub fn end_point(&self) -> Point {
        self.trajectory.end_point()
    }

    /// State at `t`, clamped to the span.
    pub fn path_state(&self, t: Seconds) -> PathState {
        self.trajectory.state(t)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// A lighting primitive.
pub struct LightAction {
    /// Owning vehicle.
    pub vehicle: VehicleId,
    /// Intensity curve.
    pub trajectory: LightTrajectory,
}

impl LightAction {
    /// `Light` or `Strobe`, following the trajectory variant.
    pub fn kind(&self) -> ActionKind {
        match self.trajectory {
            LightTrajectory::Light(_) => ActionKind::Light,
            LightTrajectory::Strobe(_) => ActionKind::Strobe,
        }
    }

    /// Span start.
    pub fn start_time(&self) -> Seconds {
        self.trajectory.start_time()
    }

    /// Span end.
    pub fn end_time(&self) -> Seconds {
        self.trajectory.end_time()
    }

    /// Intensity at `t`.
    pub fn intensity(&self, t: Seconds) -> f64 {
        self.trajectory.intensity(t)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
/// One timeline entry.
pub enum Action {
    /// Unresolved transition placeholder.
    Empty(EmptyAction),
    /// Motion primitive.
    Motion(MotionAction),
    /// Light primitive.
    Light(LightAction),
}

impl Action {
    /// Owning vehicle.
    pub fn vehicle(&self) -> VehicleId {
        match self {
            Self::Empty(a) => a.vehicle,
            Self::Motion(a) => a.vehicle,
            Self::Light(a) => a.vehicle,
        }
    }

    /// Span start.
    pub fn start_time(&self) -> Seconds {
        match self {
            Self::Empty(a) => a.start_time,
            Self::Motion(a) => a.start_time(),
            Self::Light(a) => a.start_time(),
        }
    }

    /// Span end.
    pub fn end_time(&self) -> Seconds {
        match self {
            Self::Empty(a) => a.end_time,
            Self::Motion(a) => a.end_time(),
            Self::Light(a) => a.end_time(),
        }
    }

    /// Kind discriminant; placeholders report `Transition`.
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Empty(_) => ActionKind::Transition,
            Self::Motion(a) => a.kind,
            Self::Light(a) => a.kind(),
        }
    }

    /// `false` only for placeholders.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Empty(_))
    }

    /// The motion payload, if any.
    pub fn as_motion(&self) -> Option<&MotionAction> {
        match self {
            Self::Motion(m) => Some(m),
            _ => None,
        }
    }

    /// Start position for motions.
    pub fn start_point(&self) -> Option<Point> {
        self.as_motion().map(MotionAction::start_point)
    }

    /// End position for motions.
    pub fn end_point(&self) -> Option<Point> {
        self.as_motion().map(MotionAction::end_point)
    }
}

impl From<MotionAction> for Action {
    fn from(v: MotionAction) -> Self {
        Self::Motion(v)
    }
}

impl From<EmptyAction> for Action {
    fn from(v: EmptyAction) -> Self {
        Self::Empty(v)
    }
}

impl From<LightAction> for Action {
    fn from(v: LightAction) -> Self {
        Self::Light(v)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/routine/action.rs"]
mod tests;
