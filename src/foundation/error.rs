/// Convenience result type used across walltrace.
pub type WalltraceResult<T> = Result<T, WalltraceError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum WalltraceError {
    /// Non-positive or non-finite dimensions, scales or coverage width.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The upstream planner could not be reached or rejected the request.
    #[error("planning unavailable: {0}")]
    PlanningUnavailable(String),

    /// An obstacle record that was skipped during input parsing.
    ///
    /// Obstacle parsing collects these as warnings; it never returns one as a hard failure.
    #[error("malformed obstacle #{index}: {reason}")]
    MalformedObstacle {
        /// Position of the offending record in the input list.
        index: usize,
        /// Human readable cause.
        reason: String,
    },

    /// Rasterization failures (surface too large, empty surface).
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WalltraceError {
    /// Build a [`WalltraceError::InvalidConfiguration`] value.
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Build a [`WalltraceError::PlanningUnavailable`] value.
    pub fn planning_unavailable(msg: impl Into<String>) -> Self {
        Self::PlanningUnavailable(msg.into())
    }

    /// Build a [`WalltraceError::MalformedObstacle`] value.
    pub fn malformed_obstacle(index: usize, reason: impl Into<String>) -> Self {
        Self::MalformedObstacle {
            index,
            reason: reason.into(),
        }
    }

    /// Build a [`WalltraceError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`WalltraceError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for WalltraceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
