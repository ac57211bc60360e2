//! Compiled output model: actions, breakpoints and the immutable [`crate::Routine`].

pub(crate) mod action;
pub(crate) mod breakpoint;
pub(crate) mod timeline;
