//! Wire types for the Generative Language `generateContent` endpoint.

use serde::{Deserialize, Serialize};

use crate::traits::GeneratedMetadata;

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

impl Content {
    pub fn text(text: &str) -> Self {
        Self {
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
}

impl GenerationConfig {
    /// Constrain the model to a JSON object with the metadata fields.
    pub fn metadata_json() -> Self {
        Self {
            response_mime_type: "application/json",
            response_schema: Some(serde_json::json!({
                "type": "OBJECT",
                "properties": {
                    "title": { "type": "STRING" },
                    "description": { "type": "STRING" },
                    "genre": { "type": "STRING" },
                    "matchScore": { "type": "INTEGER" }
                },
                "required": ["title", "description", "genre", "matchScore"]
            })),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if any.
    pub fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String = candidate
            .content
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: ResponseContent,
}

#[derive(Debug, Deserialize)]
pub struct ResponseContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: String,
}

/// Metadata payload as the model emits it, before clamping.
#[derive(Debug, Deserialize)]
pub struct RawMetadata {
    pub title: String,
    pub description: String,
    pub genre: String,
    #[serde(rename = "matchScore")]
    pub match_score: i64,
}

impl RawMetadata {
    pub fn into_metadata(self) -> GeneratedMetadata {
        GeneratedMetadata {
            title: self.title,
            description: self.description,
            genre: self.genre,
            match_score: self.match_score.clamp(0, 100) as u8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_text_extraction() {
        let raw = r#"{
            "candidates": [
                { "content": { "parts": [ { "text": "Olá" }, { "text": ", mundo" } ] } }
            ]
        }"#;
        let resp: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.text().as_deref(), Some("Olá, mundo"));
    }

    #[test]
    fn test_empty_response_has_no_text() {
        let resp: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.text().is_none());
    }

    #[test]
    fn test_raw_metadata_clamps_score() {
        let raw: RawMetadata = serde_json::from_str(
            r#"{"title":"T","description":"D","genre":"G","matchScore":140}"#,
        )
        .unwrap();
        assert_eq!(raw.into_metadata().match_score, 100);

        let raw: RawMetadata = serde_json::from_str(
            r#"{"title":"T","description":"D","genre":"G","matchScore":-3}"#,
        )
        .unwrap();
        assert_eq!(raw.into_metadata().match_score, 0);
    }
}
