//! Gemini `generateContent` relay for MisBot

use crate::{ApiConfig, ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Reply used when Gemini answers without any text
pub const NO_RESPONSE_TEXT: &str = "No response from Gemini.";

/// Reply used when no API key is configured
pub const NOT_CONFIGURED_TEXT: &str =
    "MisBot is not connected to a language model. Set GEMINI_API_KEY to enable fact-checking replies.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub text: String,
    pub sender: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

impl GenerateResponse {
    /// Text of the first part of the first candidate
    pub fn reply(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .unwrap_or_else(|| NO_RESPONSE_TEXT.to_string())
    }
}

fn content(role: &str, text: String) -> Content {
    Content {
        role: Some(role.to_string()),
        parts: vec![Part { text: Some(text) }],
    }
}

/// Prior turns become `user`/`model` contents; the new message is framed
/// as a fact-check request
pub fn build_request(message: &str, history: &[Turn]) -> GenerateRequest {
    let mut contents: Vec<Content> = history
        .iter()
        .map(|turn| {
            let role = if turn.sender == "user" { "user" } else { "model" };
            content(role, turn.text.clone())
        })
        .collect();

    contents.push(content(
        "user",
        format!(
            "Check the accuracy and authenticity of this statement:\n\n{}",
            message
        ),
    ));

    GenerateRequest { contents }
}

pub async fn generate(
    http: &reqwest::Client,
    config: &ApiConfig,
    message: &str,
    history: &[Turn],
) -> ApiResult<String> {
    let Some(key) = config.gemini_api_key.as_deref() else {
        return Ok(NOT_CONFIGURED_TEXT.to_string());
    };

    let url = format!("{}/{}:generateContent", GEMINI_BASE_URL, config.gemini_model);
    let body = build_request(message, history);
    debug!("Relaying {} turns to {}", body.contents.len(), config.gemini_model);

    let response = http
        .post(&url)
        .query(&[("key", key)])
        .json(&body)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Upstream(format!("Gemini answered {}", status)));
    }

    let data: GenerateResponse = response.json().await?;
    Ok(data.reply())
}
