//! Gemini REST client for deal commentary
//!
//! Thin async wrapper over the `generateContent` endpoint. Analysis is a
//! best-effort add-on: every failure path returns a displayable string
//! instead of an error, and the details go to the log.

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::prompt::{build_prompt, DealFacts};

/// Model used when `GEMINI_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const FAILURE_MESSAGE: &str = "Failed to generate analysis. Please try again.";
const EMPTY_MESSAGE: &str = "No analysis generated.";
const MISSING_KEY_MESSAGE: &str =
    "API key not found. Please set the GEMINI_API_KEY environment variable.";

/// Async Gemini client bound to one API key and model.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Build a client from `GEMINI_API_KEY` (or legacy `API_KEY`) and
    /// `GEMINI_MODEL`. `None` when no key is configured.
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("API_KEY"))
            .ok()?;
        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Some(Self::new(api_key).with_model(model))
    }

    /// Request commentary on a simulated trade.
    ///
    /// Always returns displayable text: the model's commentary on success,
    /// a failure string otherwise.
    pub async fn analyze(&self, facts: &DealFacts) -> String {
        let prompt = build_prompt(facts);
        match self.generate(&prompt).await {
            Ok(Some(text)) => text,
            Ok(None) => EMPTY_MESSAGE.to_string(),
            Err(err) => {
                log::warn!("Gemini request failed: {}", err);
                FAILURE_MESSAGE.to_string()
            }
        }
    }

    async fn generate(&self, prompt: &str) -> Result<Option<String>, reqwest::Error> {
        let url = format!("{}/models/{}:generateContent", API_BASE, self.model);
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .http
            .post(&url)
            .timeout(REQUEST_TIMEOUT)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<GenerateContentResponse>()
            .await?;

        Ok(response.first_text())
    }
}

/// Run the analysis with client configuration taken from the environment.
/// Returns the missing-key message when no API key is set.
pub async fn analyze_from_env(facts: &DealFacts) -> String {
    match GeminiClient::from_env() {
        Some(client) => client.analyze(facts).await,
        None => {
            log::warn!("no Gemini API key configured");
            MISSING_KEY_MESSAGE.to_string()
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if any non-blank text came
    /// back.
    fn first_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .map(|part| part.text.as_str())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
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
                {
                    "content": {
                        "parts": [
                            {"text": "**Verdict:** "},
                            {"text": "Sell."}
                        ],
                        "role": "model"
                    },
                    "finishReason": "STOP"
                }
            ]
        }"#;

        let response: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.first_text().unwrap(), "**Verdict:** Sell.");
    }

    #[test]
    fn test_empty_response_yields_none() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(response.first_text().is_none());

        let blank = r#"{"candidates": [{"content": {"parts": [{"text": "  "}]}}]}"#;
        let response: GenerateContentResponse = serde_json::from_str(blank).unwrap();
        assert!(response.first_text().is_none());
    }

    #[test]
    fn test_request_wire_shape() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "analyze this".to_string(),
                }],
            }],
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "analyze this");
    }
}
