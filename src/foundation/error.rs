/// Convenience result type used across embedreplay.
pub type ReplayResult<T> = Result<T, ReplayError>;

/// Top-level error taxonomy used by the replay pipeline.
#[derive(thiserror::Error, Debug)]
pub enum ReplayError {
    /// Row count, label count, buffer length or dimensionality disagree.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// A point carries a label outside the declared label set.
    #[error("unknown label {label} at row {row}")]
    UnknownLabel {
        /// Offending label value.
        label: i64,
        /// Row index of the offending point.
        row: usize,
    },

    /// The external dimensionality reducer aborted the run.
    #[error("reducer failure: {0}")]
    ReducerFailure(anyhow::Error),

    /// The figure sink rejected the assembled figure.
    #[error("renderer failure: {0}")]
    RendererFailure(anyhow::Error),

    /// Invalid configuration, input data or lifecycle misuse.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing descriptors and trajectories.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReplayError {
    /// Build a [`ReplayError::ShapeMismatch`] value.
    pub fn shape(msg: impl Into<String>) -> Self {
        Self::ShapeMismatch(msg.into())
    }

    /// Build a [`ReplayError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReplayError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Wrap an error raised by the reducer.
    pub fn reducer(err: impl Into<anyhow::Error>) -> Self {
        Self::ReducerFailure(err.into())
    }

    /// Wrap an error raised by a figure sink.
    pub fn renderer(err: impl Into<anyhow::Error>) -> Self {
        Self::RendererFailure(err.into())
    }
}

impl From<serde_json::Error> for ReplayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
