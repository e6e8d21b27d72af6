use crate::config::{ApiConfig, KEY_ENV_VAR};
use crate::error::AppError;
use anyhow::Result;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Thin wrapper around the Gemini `generateContent` endpoint. One outbound
/// request per `generate` call; no retry, no post-processing.
pub struct GenClient {
    http: Client,
    api: ApiConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<TextPart>,
}

#[derive(Deserialize)]
struct TextPart {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: Option<ApiErrorDetail>,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl GenClient {
    pub fn new(api: ApiConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(api.timeout_secs))
            .build()?;
        Ok(Self { http, api })
    }

    /// Sends one generation request and returns the generated text verbatim.
    /// The key is checked before anything touches the network.
    pub fn generate(&self, system: Option<&str>, prompt: &str) -> Result<String, AppError> {
        let key = self.api.resolved_key().ok_or_else(|| {
            AppError::Configuration(format!(
                "Set {} in your environment or in a .env file, then try again. \
                 Keys are issued at https://aistudio.google.com/apikey",
                KEY_ENV_VAR
            ))
        })?;

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.api.endpoint.trim_end_matches('/'),
            self.api.model,
            key
        );

        let body = GenerateRequest {
            system_instruction: system.map(|text| Content {
                role: None,
                parts: vec![Part { text }],
            }),
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self.http.post(&url).json(&body).send().map_err(|e| {
            if e.is_timeout() {
                AppError::Generation("Request timeout - the API took too long to respond".to_string())
            } else if e.is_connect() {
                AppError::Generation("Connection error - unable to reach the API".to_string())
            } else {
                AppError::Generation(format!("Network error: {}", e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Generation(status_message(
                status.as_u16(),
                &error_text,
            )));
        }

        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| AppError::Generation(format!("Failed to parse API response: {}", e)))?;

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(AppError::Generation(
                "API returned no text for this request".to_string(),
            ));
        }

        Ok(text)
    }
}

/// Folds an HTTP failure status and raw body into a user-facing message,
/// preferring the provider's own error message when the body parses.
fn status_message(status: u16, body: &str) -> String {
    let detail = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .map(|e| e.message)
        .unwrap_or_else(|| body.to_string());

    match status {
        401 | 403 => "Authentication failed - check your API key".to_string(),
        429 => "Rate limit exceeded - too many requests".to_string(),
        500..=599 => format!("Server error ({}): {}", status, detail),
        _ => format!("HTTP error {}: {}", status, detail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_fails_before_any_request() {
        // an unroutable endpoint proves no network attempt is made
        let api = ApiConfig {
            endpoint: "http://127.0.0.1:1".to_string(),
            api_key: None,
            ..ApiConfig::default()
        };
        let client = GenClient::new(api).unwrap();
        let err = client.generate(None, "hello").unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
        assert!(err.to_string().contains(KEY_ENV_VAR));
    }

    #[test]
    fn test_placeholder_key_counts_as_missing() {
        let api = ApiConfig {
            endpoint: "http://127.0.0.1:1".to_string(),
            api_key: Some(crate::config::KEY_PLACEHOLDER.to_string()),
            ..ApiConfig::default()
        };
        let client = GenClient::new(api).unwrap();
        assert!(matches!(
            client.generate(Some("system"), "hello"),
            Err(AppError::Configuration(_))
        ));
    }

    #[test]
    fn test_status_message_prefers_provider_detail() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}}"#;
        assert_eq!(
            status_message(400, body),
            "HTTP error 400: API key not valid"
        );
    }

    #[test]
    fn test_status_message_for_auth_and_rate_limits() {
        assert_eq!(
            status_message(401, "{}"),
            "Authentication failed - check your API key"
        );
        assert_eq!(
            status_message(429, "{}"),
            "Rate limit exceeded - too many requests"
        );
        assert!(status_message(503, "overloaded").starts_with("Server error (503)"));
    }

    #[test]
    fn test_request_body_shape() {
        let body = GenerateRequest {
            system_instruction: Some(Content {
                role: None,
                parts: vec![Part { text: "be brief" }],
            }),
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: "hi" }],
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "be brief");
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
    }

    #[test]
    fn test_response_parsing_joins_parts() {
        let raw = r#"{"candidates": [{"content": {"parts": [{"text": "Hello"}, {"text": " world"}]}}]}"#;
        let parsed: GenerateResponse = serde_json::from_str(raw).unwrap();
        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().map(|p| p.text).collect())
            .unwrap();
        assert_eq!(text, "Hello world");
    }
}
