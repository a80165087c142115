/// Convenience result type used across DogView.
pub type DogViewResult<T> = Result<T, DogViewError>;

/// Top-level error taxonomy used by library APIs.
///
/// Remote failures are recovered inside the AI adapters and never reach callers of
/// [`crate::ai::breed::classify`] or [`crate::ai::thought::generate_thought`]; the
/// [`DogViewError::Remote`] variant only travels between a backend and those adapters.
#[derive(thiserror::Error, Debug)]
pub enum DogViewError {
    /// Invalid user-provided input or settings.
    #[error("validation error: {0}")]
    Validation(String),

    /// Media intake or sampling failed.
    #[error("media error: {0}")]
    Media(String),

    /// Rasterization or compositing failed.
    #[error("render error: {0}")]
    Render(String),

    /// A generative backend call failed or returned unusable output.
    #[error("remote error: {0}")]
    Remote(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DogViewError {
    /// Build a [`DogViewError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`DogViewError::Media`] value.
    pub fn media(msg: impl Into<String>) -> Self {
        Self::Media(msg.into())
    }

    /// Build a [`DogViewError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`DogViewError::Remote`] value.
    pub fn remote(msg: impl Into<String>) -> Self {
        Self::Remote(msg.into())
    }

    /// Build a [`DogViewError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for DogViewError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
