use thiserror::Error;

/// Errors from the Gemini API client.
#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("missing API key: environment variable {0} is not set")]
    MissingKey(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("model returned no text")]
    EmptyResponse,
}
