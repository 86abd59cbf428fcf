//! Error types for the web-to-deck pipeline.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while extracting, compiling, or rendering a deck.
///
/// Stage boundaries never let these escape: they are turned into an error
/// marker (`PageContent::error`) or an error-description string instead.
#[derive(Error, Debug)]
pub enum Error {
    /// Network failure, timeout, or non-2xx response while fetching a page.
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// A stage was fed input of an unexpected shape.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A URL that has no `scheme://host` part.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
