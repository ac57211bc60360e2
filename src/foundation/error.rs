/// Convenience result type used across chorus.
pub type ChorusResult<T> = Result<T, ChorusError>;

/// Fatal error taxonomy used by compiler APIs.
///
/// Recoverable conditions (unknown action types, continuity violations, unresolved
/// transitions) are not errors; they are reported as [`crate::Diagnostic`] values.
#[derive(thiserror::Error, Debug)]
pub enum ChorusError {
    /// A required document field is missing or has the wrong type or value.
    #[error("malformed document at {path}: {message}")]
    MalformedDocument {
        /// JSON-path-like location of the offending field (`$.chor[0].time`).
        path: String,
        /// Human readable description of the problem.
        message: String,
    },

    /// A trajectory could not be constructed from its parameters.
    #[error("trajectory error: {0}")]
    Trajectory(String),

    /// The caller asked for a clean compile and the report carries errors.
    #[error("compilation rejected: {0}")]
    Rejected(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ChorusError {
    /// Build a [`ChorusError::MalformedDocument`] value.
    pub fn malformed(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedDocument {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Build a [`ChorusError::Trajectory`] value.
    pub fn trajectory(msg: impl Into<String>) -> Self {
        Self::Trajectory(msg.into())
    }

    /// Build a [`ChorusError::Rejected`] value.
    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected(msg.into())
    }

    /// Build a [`ChorusError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` for document-shape errors.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedDocument { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
