//! Trait definitions for the generative assistant.
//!
//! The shell talks to the assistant through this trait, so ingest and chat
//! workflows stay agnostic of the concrete backend and tests can substitute
//! a canned implementation.

use std::future::Future;

use serde::{Deserialize, Serialize};

/// What kind of content an ingest request describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Movie,
    Series,
}

impl ContentKind {
    /// Label used inside the pt-BR prompt.
    pub fn prompt_label(self) -> &'static str {
        match self {
            Self::Movie => "um Filme",
            Self::Series => "uma Série de TV",
        }
    }
}

/// Inputs for metadata synthesis.
#[derive(Debug, Clone)]
pub struct MetadataRequest {
    /// Source filename or user-facing label.
    pub source_label: String,
    pub user_notes: String,
    pub kind: ContentKind,
}

/// Structured metadata produced by the assistant (or its fallback).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedMetadata {
    pub title: String,
    pub description: String,
    pub genre: String,
    /// Relevance score, 0-100.
    pub match_score: u8,
}

impl GeneratedMetadata {
    /// Deterministic substitute when the assistant fails: the source label
    /// as title, the notes (or a stock line) as description, a generic
    /// genre, a fixed score.
    pub fn fallback(source_label: &str, user_notes: &str) -> Self {
        Self {
            title: source_label.to_string(),
            description: if user_notes.trim().is_empty() {
                "Nenhuma descrição fornecida.".to_string()
            } else {
                user_notes.to_string()
            },
            genre: "Envio do Usuário".to_string(),
            match_score: 80,
        }
    }
}

/// Stock reply substituted when the chat backend fails.
pub const FALLBACK_REPLY: &str =
    "Desculpe, estou com problemas para me conectar agora. Tente de novo em instantes.";

/// A generative assistant able to synthesize catalog metadata and hold a
/// short free-text conversation.
pub trait AssistantService: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Synthesize title/description/genre/score for an ingest.
    fn generate_metadata(
        &self,
        request: &MetadataRequest,
    ) -> impl Future<Output = Result<GeneratedMetadata, Self::Error>> + Send;

    /// Answer a free-text message, optionally grounded in what the user is
    /// currently viewing.
    fn chat(
        &self,
        message: &str,
        context: Option<&str>,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_uses_label_and_notes() {
        let m = GeneratedMetadata::fallback("ferias_2024.mp4", "Viagem em família");
        assert_eq!(m.title, "ferias_2024.mp4");
        assert_eq!(m.description, "Viagem em família");
        assert_eq!(m.genre, "Envio do Usuário");
        assert_eq!(m.match_score, 80);
    }

    #[test]
    fn test_fallback_without_notes_is_deterministic() {
        let a = GeneratedMetadata::fallback("arquivo.mkv", "   ");
        let b = GeneratedMetadata::fallback("arquivo.mkv", "");
        assert_eq!(a.description, "Nenhuma descrição fornecida.");
        assert_eq!(a.description, b.description);
    }
}
