//! Trajectory algebra: motion paths evaluable to [`crate::PathState`] and light intensity curves.

pub(crate) mod light;
pub(crate) mod motion;
pub(crate) mod polynomial;
