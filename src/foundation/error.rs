/// Convenience result type used across reeltime.
pub type ReeltimeResult<T> = Result<T, ReeltimeError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Timing errors (`InvalidRange`, `InvalidTimeline`) are raised when curves, schedules and
/// sequencers are constructed, never while sampling a frame.
#[derive(thiserror::Error, Debug)]
pub enum ReeltimeError {
    /// Malformed interpolation breakpoints or spring parameters.
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// Non-positive durations, impossible transition overlaps or bad stagger settings.
    #[error("invalid timeline: {0}")]
    InvalidTimeline(String),

    /// Offline audio synthesis failed.
    #[error("audio generation error: {0}")]
    AudioGeneration(String),

    /// Invalid user-provided configuration values.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReeltimeError {
    /// Build a [`ReeltimeError::InvalidRange`] value.
    pub fn invalid_range(msg: impl Into<String>) -> Self {
        Self::InvalidRange(msg.into())
    }

    /// Build a [`ReeltimeError::InvalidTimeline`] value.
    pub fn invalid_timeline(msg: impl Into<String>) -> Self {
        Self::InvalidTimeline(msg.into())
    }

    /// Build a [`ReeltimeError::AudioGeneration`] value.
    pub fn audio(msg: impl Into<String>) -> Self {
        Self::AudioGeneration(msg.into())
    }

    /// Build a [`ReeltimeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReeltimeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether this error comes from a malformed curve or timeline configuration.
    pub fn is_timing(&self) -> bool {
        matches!(self, Self::InvalidRange(_) | Self::InvalidTimeline(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
