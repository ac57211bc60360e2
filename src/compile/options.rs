use serde::{Deserialize, Serialize};

use crate::foundation::error::{ChorusError, ChorusResult};

/// Default time tolerance for continuity checks, seconds.
pub const DEFAULT_TIME_TOLERANCE: f64 = 0.1;
/// Default distance tolerance for continuity checks, meters.
pub const DEFAULT_SPACE_TOLERANCE: f64 = 0.1;
/// Default samples per motion action for the theater-volume check.
pub const DEFAULT_BOUNDS_SAMPLES: usize = 16;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Compiler configuration.
pub struct CompileOptions {
    /// Uniform scale applied to every authored length (after unit conversion).
    pub scale: f64,
    /// Allowed gap between one action's end time and the next one's start time.
    pub time_tolerance: f64,
    /// Allowed gap between one action's end point and the next one's start point.
    pub space_tolerance: f64,
    /// Run per-vehicle stages on a rayon pool.
    pub parallel: bool,
    /// Worker threads for the pool (parallel mode only). `None` uses rayon's default.
    pub threads: Option<usize>,
    /// Samples per motion action for the theater-volume check.
    pub bounds_samples: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            time_tolerance: DEFAULT_TIME_TOLERANCE,
            space_tolerance: DEFAULT_SPACE_TOLERANCE,
            parallel: false,
            threads: None,
            bounds_samples: DEFAULT_BOUNDS_SAMPLES,
        }
    }
}

impl CompileOptions {
    /// Options with a custom scale and defaults elsewhere.
    pub fn with_scale(scale: f64) -> Self {
        Self {
            scale,
            ..Self::default()
        }
    }

    /// Reject values the compiler cannot work with.
    pub fn validate(&self) -> ChorusResult<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ChorusError::malformed(
                "$options.scale",
                format!("scale must be finite and > 0, got {}", self.scale),
            ));
        }
        for (name, value) in [
            ("time_tolerance", self.time_tolerance),
            ("space_tolerance", self.space_tolerance),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChorusError::malformed(
                    format!("$options.{name}"),
                    format!("{name} must be finite and > 0, got {value}"),
                ));
            }
        }
        if let Some(n) = self.threads
            && n == 0
        {
            return Err(ChorusError::malformed(
                "$options.threads",
                "threads must be >= 1 when set",
            ));
        }
        if self.bounds_samples == 0 {
            return Err(ChorusError::malformed(
                "$options.bounds_samples",
                "bounds_samples must be >= 1",
            ));
        }
        Ok(())
    }
}

pub(crate) fn build_thread_pool(threads: Option<usize>) -> ChorusResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ChorusError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/compile/options.rs"]
mod tests;
