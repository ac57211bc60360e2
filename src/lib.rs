//! Chorus compiles declarative drone-swarm choreography documents into validated,
//! per-vehicle timelines of motion and lighting primitives.
//!
//! # Pipeline overview
//!
//! 1. **Load**: document tree -> raw per-vehicle action lists (units, scale and repeat passes
//!    applied once, here), light timelines, homes and breakpoints
//! 2. **Synthesize**: each transition placeholder becomes a quintic that matches position,
//!    velocity and acceleration of its neighbours exactly
//! 3. **Validate**: per-vehicle temporal and spatial continuity, every violation collected
//! 4. **Output**: an immutable [`Routine`] plus a [`CompileReport`]
//!
//! Fatal problems (a malformed document) return [`ChorusError`]. Everything recoverable is a
//! [`Diagnostic`] in the report; the caller decides whether it is acceptable, e.g. with
//! [`Compilation::into_clean`].
//!
//! ```no_run
//! use chorus::{CompileOptions, Routine, VehicleId};
//!
//! let compiled = Routine::load("show.jocs", &CompileOptions::default())?;
//! for d in compiled.report.diagnostics() {
//!     eprintln!("{d}");
//! }
//! let routine = compiled.into_clean()?;
//! let state = routine.state_at(VehicleId(0), 2.5);
//! # Ok::<(), chorus::ChorusError>(())
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod compile;
mod document;
mod foundation;
mod routine;
mod trajectory;

pub use compile::bounds::TheaterVolume;
pub use compile::compiler::{Compilation, Compiler};
pub use compile::options::{
    CompileOptions, DEFAULT_BOUNDS_SAMPLES, DEFAULT_SPACE_TOLERANCE, DEFAULT_TIME_TOLERANCE,
};
pub use compile::report::{
    CompileReport, ContinuityViolation, Diagnostic, Severity, UnresolvedReason, ViolationKind,
};
pub use compile::validate::ContinuityValidator;
pub use document::node::DocumentNode;
pub use foundation::core::{
    DEGREES_TO_RADIANS, FEET_TO_METERS, PathState, Point, Seconds, Units, VehicleId,
};
pub use foundation::error::{ChorusError, ChorusResult};
pub use routine::action::{Action, ActionKind, EmptyAction, LightAction, MotionAction};
pub use routine::breakpoint::{Breakpoint, Breakpoints};
pub use routine::timeline::{CHOREOGRAPHY_EXTENSION, Routine};
pub use trajectory::light::{IntensityRamp, LightTrajectory, StrobeTrajectory};
pub use trajectory::motion::{CircularTrajectory, LinearTrajectory, PathEval, Trajectory};
pub use trajectory::polynomial::PolynomialTrajectory;
