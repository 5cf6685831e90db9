use reqwest::Client;
use tracing::debug;

use super::error::GeminiError;
use super::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, RawMetadata,
};
use crate::traits::{AssistantService, GeneratedMetadata, MetadataRequest};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Generative Language API client.
#[derive(Debug)]
pub struct GeminiClient {
    api_key: String,
    model: String,
    http: Client,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            http: Client::new(),
        }
    }

    /// Build a client reading the key from the named environment variable.
    pub fn from_env(var: &str, model: String) -> Result<Self, GeminiError> {
        let api_key =
            std::env::var(var).map_err(|_| GeminiError::MissingKey(var.to_string()))?;
        Ok(Self::new(api_key, model))
    }

    fn endpoint(&self) -> String {
        format!("{BASE_URL}/models/{}:generateContent", self.model)
    }

    /// Check the HTTP response for errors and return the body text on failure.
    async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, GeminiError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            Err(GeminiError::Api {
                status,
                message: body,
            })
        }
    }

    /// Send a request and extract the first candidate's text.
    async fn generate(&self, request: &GenerateContentRequest) -> Result<String, GeminiError> {
        let resp = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let resp = Self::check_response(resp).await?;
        let parsed: GenerateContentResponse = resp
            .json()
            .await
            .map_err(|e| GeminiError::Parse(e.to_string()))?;

        parsed.text().ok_or(GeminiError::EmptyResponse)
    }
}

impl AssistantService for GeminiClient {
    type Error = GeminiError;

    async fn generate_metadata(
        &self,
        request: &MetadataRequest,
    ) -> Result<GeneratedMetadata, GeminiError> {
        let prompt = format!(
            "Tenho um arquivo (ou arquivos) de vídeo com nome base: \"{}\".\n\
             Notas do usuário sobre o conteúdo: \"{}\".\n\n\
             Este conteúdo deve ser catalogado como: {}.\n\n\
             Gere:\n\
             1. Um título criativo (se for série, apenas o nome da série).\n\
             2. Uma sinopse curta e envolvente.\n\
             3. Um gênero.\n\
             4. Uma pontuação de relevância (matchScore) de 0 a 100.\n\n\
             Responda estritamente em Português do Brasil.",
            request.source_label,
            request.user_notes,
            request.kind.prompt_label(),
        );

        debug!(source = %request.source_label, "Requesting metadata synthesis");

        let req = GenerateContentRequest {
            contents: vec![Content::text(&prompt)],
            system_instruction: None,
            generation_config: Some(GenerationConfig::metadata_json()),
        };

        let text = self.generate(&req).await?;
        let raw: RawMetadata =
            serde_json::from_str(&text).map_err(|e| GeminiError::Parse(e.to_string()))?;
        Ok(raw.into_metadata())
    }

    async fn chat(&self, message: &str, context: Option<&str>) -> Result<String, GeminiError> {
        let mut instruction = String::from(
            "Você é o assistente da Telinha. Você é espirituoso, entende de \
             cinema e gosta de ajudar. Responda sempre em Português do Brasil. \
             Mantenha as respostas curtas (menos de 50 palavras), a menos que \
             uma análise detalhada seja pedida.",
        );
        if let Some(context) = context {
            instruction.push_str("\nContexto atual: ");
            instruction.push_str(context);
        }

        let req = GenerateContentRequest {
            contents: vec![Content::text(message)],
            system_instruction: Some(Content::text(&instruction)),
            generation_config: None,
        };

        self.generate(&req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_includes_model() {
        let client = GeminiClient::new("k".into(), "gemini-2.5-flash".into());
        assert_eq!(
            client.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_from_env_missing_key() {
        let err = GeminiClient::from_env("TELINHA_TEST_MISSING_KEY", "m".into()).unwrap_err();
        assert!(matches!(err, GeminiError::MissingKey(_)));
    }
}
