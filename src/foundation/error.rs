/// Convenience result type used across cliquenet.
pub type CliquenetResult<T> = Result<T, CliquenetError>;

/// Top-level error taxonomy used by the network engine.
#[derive(thiserror::Error, Debug)]
pub enum CliquenetError {
    /// Malformed topology: duplicate label, unknown node, empty clique, illegal cross-link.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Two edge endpoints coincide, so the edge has no direction.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// Invalid scalar configuration or out-of-range user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliquenetError {
    /// Build a [`CliquenetError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`CliquenetError::DegenerateGeometry`] value.
    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::DegenerateGeometry(msg.into())
    }

    /// Build a [`CliquenetError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CliquenetError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
