//! Gemini API client — the hosted-model strategist.
//!
//! Thin blocking wrapper over the `generateContent` endpoint. Callers hold
//! the fallback policy; this client only reports errors.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("analysis request failed: {0}")]
    Request(String),

    #[error("analysis provider returned HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("analysis response was empty or malformed")]
    EmptyResponse,
}

// ── Wire types ────────────────────────────────────────────────────────

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Blocking Gemini client.
pub struct GeminiClient {
    client: reqwest::blocking::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");
        Self {
            client,
            api_key: api_key.into(),
            model: DEFAULT_MODEL.into(),
        }
    }

    /// Build a client from the environment, or `None` when the key is
    /// missing/blank — the caller then runs in simulation mode.
    pub fn from_env() -> Option<Self> {
        let key = std::env::var(API_KEY_VAR).ok()?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        Some(Self::new(key))
    }

    /// Send a prompt and return the raw model text.
    ///
    /// With `json_output` set, the request asks for an `application/json`
    /// response body, which the structured-verdict path parses directly.
    pub fn generate(&self, prompt: &str, json_output: bool) -> Result<String, AnalysisError> {
        let url = format!(
            "{API_BASE}/{model}:generateContent?key={key}",
            model = self.model,
            key = self.api_key
        );
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: json_output.then_some(GenerationConfig {
                response_mime_type: "application/json",
            }),
        };

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .map_err(|e| AnalysisError::Request(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AnalysisError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let data: GenerateResponse = resp.json().map_err(|_| AnalysisError::EmptyResponse)?;
        data.candidates
            .and_then(|c| c.into_iter().next())
            .and_then(|c| c.content.parts)
            .and_then(|p| p.into_iter().next())
            .and_then(|p| p.text)
            .filter(|t| !t.is_empty())
            .ok_or(AnalysisError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_shape() {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: "hello" }],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json",
            }),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains(r#""parts":[{"text":"hello"}]"#));
        assert!(json.contains(r#""responseMimeType":"application/json""#));
    }

    #[test]
    fn request_body_omits_config_for_free_text() {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: "hello" }],
            }],
            generation_config: None,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(!json.contains("generationConfig"));
    }

    #[test]
    fn response_text_extraction() {
        let json = r#"{"candidates":[{"content":{"parts":[{"text":"{\"verdict\":\"BUY\"}"}]}}]}"#;
        let resp: GenerateResponse = serde_json::from_str(json).unwrap();
        let text = resp
            .candidates
            .and_then(|c| c.into_iter().next())
            .and_then(|c| c.content.parts)
            .and_then(|p| p.into_iter().next())
            .and_then(|p| p.text);
        assert_eq!(text.as_deref(), Some("{\"verdict\":\"BUY\"}"));
    }

    #[test]
    fn empty_candidates_handled() {
        let json = r#"{"candidates":[]}"#;
        let resp: GenerateResponse = serde_json::from_str(json).unwrap();
        assert!(resp.candidates.unwrap().is_empty());
    }
}
