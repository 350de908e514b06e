//! Short text generation for package notices and access-log summaries.
//!
//! [`NotificationWriter`] calls a `generateContent`-style text API. It never
//! fails from the caller's point of view: without an API key, or on any
//! request or decoding error, it returns a fixed fallback text.

use std::time::Duration;

use condo_core::models::AccessLog;
use serde::{Deserialize, Serialize};

/// Default model name.
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default API base URL.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// HTTP request timeout for one generation call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Fallback returned by [`NotificationWriter::analyze_access_logs`].
pub const ANALYSIS_UNAVAILABLE: &str = "AI analysis unavailable. Please review the logs manually.";

/// Most recent logs sent for analysis.
const MAX_LOGS_FOR_ANALYSIS: usize = 20;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct NotifierConfig {
    /// API key; `None` disables remote generation.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl NotifierConfig {
    /// Load from environment variables.
    ///
    /// | Env Var             | Default                                      |
    /// |---------------------|----------------------------------------------|
    /// | `NOTIFIER_API_KEY`  | -- (fallback texts only)                     |
    /// | `NOTIFIER_MODEL`    | `gemini-2.5-flash`                           |
    /// | `NOTIFIER_BASE_URL` | `https://generativelanguage.googleapis.com`  |
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("NOTIFIER_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            model: std::env::var("NOTIFIER_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into()),
            base_url: std::env::var("NOTIFIER_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
        }
    }

    /// Configuration with no key: every call returns its fallback.
    pub fn disabled() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.into(),
            base_url: DEFAULT_BASE_URL.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum NotifierError {
    #[error("No API key configured")]
    NotConfigured,

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Text API returned HTTP {0}")]
    HttpStatus(u16),

    #[error("Text API returned no text")]
    EmptyResponse,
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
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
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate, if any.
    fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

// ---------------------------------------------------------------------------
// NotificationWriter
// ---------------------------------------------------------------------------

pub struct NotificationWriter {
    client: reqwest::Client,
    config: NotifierConfig,
}

impl NotificationWriter {
    pub fn new(config: NotifierConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { client, config }
    }

    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    /// Short notice telling a resident a package is waiting.
    pub async fn package_notice(&self, recipient: &str, item: &str, location: &str) -> String {
        let prompt = format!(
            "Write a short, polite and professional notification for a resident named {recipient}. \
             Say that a package described as \"{item}\" has arrived and is ready for pickup at \
             \"{location}\". Keep it under 50 words. Do not include a subject line."
        );
        match self.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                if self.is_configured() {
                    tracing::warn!(error = %e, "Package notice generation failed, using template");
                }
                fallback_notice(recipient, item, location)
            }
        }
    }

    /// Brief summary of anomalies, peak hours and security concerns.
    pub async fn analyze_access_logs(&self, logs: &[AccessLog]) -> String {
        let prompt = match analysis_prompt(logs) {
            Ok(prompt) => prompt,
            Err(e) => {
                tracing::warn!(error = %e, "Could not encode access logs for analysis");
                return ANALYSIS_UNAVAILABLE.to_string();
            }
        };
        match self.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                if self.is_configured() {
                    tracing::warn!(error = %e, "Access log analysis failed");
                }
                ANALYSIS_UNAVAILABLE.to_string()
            }
        }
    }

    async fn generate(&self, prompt: &str) -> Result<String, NotifierError> {
        let Some(key) = self.config.api_key.as_deref() else {
            return Err(NotifierError::NotConfigured);
        };
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        );
        let body = GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", key)
            .json(&body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(NotifierError::HttpStatus(response.status().as_u16()));
        }
        response
            .json::<GenerateResponse>()
            .await?
            .text()
            .ok_or(NotifierError::EmptyResponse)
    }
}

/// Prompt for [`NotificationWriter::analyze_access_logs`]. Only the newest
/// [`MAX_LOGS_FOR_ANALYSIS`] entries are included; `logs` is newest first.
fn analysis_prompt(logs: &[AccessLog]) -> serde_json::Result<String> {
    let recent = &logs[..logs.len().min(MAX_LOGS_FOR_ANALYSIS)];
    let logs_json = serde_json::to_string(recent)?;
    Ok(format!(
        "Analyze the following vehicle access logs (JSON) and give a brief bullet-point \
         summary of any anomalies, peak hours or security concerns.\n\nLogs:\n{logs_json}"
    ))
}

/// Fixed notice used whenever generation is unavailable.
pub fn fallback_notice(recipient: &str, item: &str, location: &str) -> String {
    format!(
        "Hello {recipient}, a package ({item}) has arrived for you. Please pick it up at: {location}."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_template() {
        assert_eq!(
            fallback_notice("Roberto Santos", "AMZ-999", "Front desk"),
            "Hello Roberto Santos, a package (AMZ-999) has arrived for you. Please pick it up at: Front desk."
        );
    }

    #[tokio::test]
    async fn unconfigured_writer_uses_fallbacks() {
        let writer = NotificationWriter::new(NotifierConfig::disabled());
        assert!(!writer.is_configured());

        let notice = writer.package_notice("Ana", "Box", "Shelf A").await;
        assert_eq!(notice, fallback_notice("Ana", "Box", "Shelf A"));
        assert_eq!(writer.analyze_access_logs(&[]).await, ANALYSIS_UNAVAILABLE);
    }

    #[tokio::test]
    async fn unreachable_api_falls_back() {
        let writer = NotificationWriter::new(NotifierConfig {
            api_key: Some("key".into()),
            model: DEFAULT_MODEL.into(),
            base_url: "http://127.0.0.1:9".into(),
        });
        let notice = writer.package_notice("Ana", "Box", "Shelf A").await;
        assert_eq!(notice, fallback_notice("Ana", "Box", "Shelf A"));
    }

    #[test]
    fn analysis_prompt_keeps_newest_twenty_logs() {
        use chrono::{Duration as Age, Utc};
        use condo_core::models::AccessType;

        let now = Utc::now();
        let logs: Vec<AccessLog> = (0..30)
            .map(|i| AccessLog {
                id: format!("log-{i:02}"),
                timestamp: now - Age::minutes(i),
                access_type: AccessType::Entry,
                vehicle_plate: format!("PLT-{i:04}"),
                is_registered: false,
                spot_id: None,
                notes: None,
            })
            .collect();

        let prompt = analysis_prompt(&logs).unwrap();
        assert!(prompt.contains("\"log-00\""));
        assert!(prompt.contains("\"log-19\""));
        assert!(!prompt.contains("\"log-20\""));
        assert_eq!(prompt.matches("\"vehiclePlate\"").count(), 20);
    }

    #[test]
    fn response_text_joins_parts_of_first_candidate() {
        let response: GenerateResponse = serde_json::from_value(serde_json::json!({
            "candidates": [
                { "content": { "parts": [{ "text": "Hello " }, { "text": "Ana." }] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        }))
        .unwrap();
        assert_eq!(response.text().as_deref(), Some("Hello Ana."));
    }

    #[test]
    fn empty_response_has_no_text() {
        let response: GenerateResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(response.text().is_none());
    }
}
