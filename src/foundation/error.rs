/// Convenience result type used across the crate.
pub type SunburstResult<T> = Result<T, SunburstError>;

/// Top-level error taxonomy used by the sunburst APIs.
#[derive(thiserror::Error, Debug)]
pub enum SunburstError {
    /// Malformed or cyclic input tree. Nothing renders when this is returned.
    #[error("invalid tree: {0}")]
    InvalidTree(String),

    /// Invalid configuration, or a node id/path that does not exist.
    #[error("validation error: {0}")]
    Validation(String),

    /// Failures while parsing or rasterizing the emitted scene.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SunburstError {
    /// Build a [`SunburstError::InvalidTree`] value.
    pub fn invalid_tree(msg: impl Into<String>) -> Self {
        Self::InvalidTree(msg.into())
    }

    /// Build a [`SunburstError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SunburstError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SunburstError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
