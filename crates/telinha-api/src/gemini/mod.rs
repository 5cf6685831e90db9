mod client;
mod error;
mod types;

pub use client::GeminiClient;
pub use error::GeminiError;
