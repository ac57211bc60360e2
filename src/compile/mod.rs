//! The choreography compiler.
//!
//! Passes, in order:
//!
//! 1. [`loader`]: document tree to raw per-vehicle timelines (units, scale and repeat applied)
//! 2. [`synthesize`]: sort each vehicle chronologically, then fit transition placeholders
//! 3. [`validate`]: temporal and spatial continuity, accumulated into the report
//! 4. [`bounds`]: optional theater-volume check

pub(crate) mod bounds;
pub(crate) mod compiler;
pub(crate) mod loader;
pub(crate) mod options;
pub(crate) mod report;
pub(crate) mod synthesize;
pub(crate) mod validate;
