use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::traits::TextProvider;
use crate::errors::CoreError;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1";
const DEFAULT_MODEL: &str = "gemini-pro";
const PROVIDER_NAME: &str = "Gemini";

/// Google Gemini `generateContent` provider.
///
/// - **Auth**: API key sent as the `key` query parameter (never logged;
///   transport errors are sanitized in `CoreError::from(reqwest::Error)`).
/// - **Contract**: one POST per question, no retry, no streaming, no
///   client-side timeout; the reply is the first candidate's text.
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_model(api_key, DEFAULT_MODEL)
    }

    /// Provider bound to a specific Gemini model name.
    pub fn with_model(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }
}

// ── Gemini API request/response types ───────────────────────────────

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    error: Option<ErrorBody>,
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Deserialize)]
struct Candidate {
    // Absent when the provider blocks a candidate without producing text
    content: Option<Content>,
}

/// Parses a raw `generateContent` response body into the reply text.
///
/// The body carries either an error object or a candidate list; the error
/// takes precedence when both are present. Missing candidates, empty parts,
/// or unparseable JSON are all surfaced as assistant failures.
pub fn parse_generate_response(body: &str) -> Result<String, CoreError> {
    let resp: GenerateResponse =
        serde_json::from_str(body).map_err(|e| CoreError::Assistant {
            provider: PROVIDER_NAME.into(),
            message: format!("Failed to parse response: {e}"),
        })?;

    if let Some(err) = resp.error {
        return Err(CoreError::Assistant {
            provider: PROVIDER_NAME.into(),
            message: err.message,
        });
    }

    resp.candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .map(|part| part.text)
        .ok_or_else(|| CoreError::Assistant {
            provider: PROVIDER_NAME.into(),
            message: "Response contained no candidate text".to_string(),
        })
}

#[async_trait]
impl TextProvider for GeminiProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn generate(&self, prompt: &str) -> Result<String, CoreError> {
        let url = format!("{BASE_URL}/models/{}:generateContent", self.model);
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        tracing::debug!(model = %self.model, "sending generateContent request");

        let body = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?
            .text()
            .await?;

        parse_generate_response(&body)
    }
}
