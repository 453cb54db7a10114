//! Generator abstraction for model invocation.
//!
//! The [`Generator`] trait decouples the step loop from the actual text
//! backend (the Gemini API or an external command). Tests use scripted
//! generators that return predetermined replies without network access.

use std::time::Duration;

/// Failure of a single generation call.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("api error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("generator returned an empty response")]
    Empty,

    #[error("command failed: {0}")]
    Command(String),

    #[error("command timed out after {0:?}")]
    TimedOut(Duration),
}

/// Abstraction over text generation backends.
///
/// Implementations make exactly one attempt per call.
pub trait Generator {
    /// Produce a continuation for `prompt`.
    fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

impl<G: Generator + ?Sized> Generator for &G {
    fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        (**self).generate(prompt)
    }
}

impl<G: Generator + ?Sized> Generator for Box<G> {
    fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        (**self).generate(prompt)
    }
}
