//! Request payloads and verification results exchanged with the service

use crate::Modality;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use thiserror::Error;

/// Fallback bot text when the service answers without a reply
pub const EMPTY_REPLY_TEXT: &str =
    "I'm having trouble processing your request. Please try again.";

/// AI models offered for fact-check testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiModel {
    #[serde(rename = "gpt-3.5-turbo")]
    Gpt35Turbo,
    #[serde(rename = "gpt-4")]
    Gpt4,
    #[serde(rename = "claude-3-opus")]
    Claude3Opus,
    #[serde(rename = "claude-3-sonnet")]
    Claude3Sonnet,
    #[serde(rename = "llama-3")]
    Llama3,
}

impl AiModel {
    pub const ALL: [AiModel; 5] = [
        AiModel::Gpt35Turbo,
        AiModel::Gpt4,
        AiModel::Claude3Opus,
        AiModel::Claude3Sonnet,
        AiModel::Llama3,
    ];

    /// Identifier used in the request path and the model picker
    pub fn as_str(&self) -> &'static str {
        match self {
            AiModel::Gpt35Turbo => "gpt-3.5-turbo",
            AiModel::Gpt4 => "gpt-4",
            AiModel::Claude3Opus => "claude-3-opus",
            AiModel::Claude3Sonnet => "claude-3-sonnet",
            AiModel::Llama3 => "llama-3",
        }
    }
}

impl std::fmt::Display for AiModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown model: {0}")]
pub struct UnknownModel(pub String);

impl std::str::FromStr for AiModel {
    type Err = UnknownModel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AiModel::ALL
            .into_iter()
            .find(|m| m.as_str() == s.trim())
            .ok_or_else(|| UnknownModel(s.to_string()))
    }
}

/// A user-selected file, read fully into memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl MediaUpload {
    pub fn new(file_name: impl Into<String>, content_type: Option<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            data,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Author of a conversation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

/// Prior message as sent to the service: timestamps and flags stripped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub text: String,
    pub sender: Sender,
}

/// Immutable snapshot of one submission
#[derive(Debug, Clone, PartialEq)]
pub enum VerificationRequest {
    Text {
        model: AiModel,
        text: String,
    },
    Image(MediaUpload),
    Video(MediaUpload),
    Chat {
        message: String,
        conversation_history: Vec<HistoryEntry>,
    },
}

/// How a request body goes over the wire
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody<'a> {
    Json(serde_json::Value),
    Multipart {
        field: &'static str,
        upload: &'a MediaUpload,
    },
}

impl VerificationRequest {
    pub fn modality(&self) -> Modality {
        match self {
            VerificationRequest::Text { .. } => Modality::Text,
            VerificationRequest::Image(_) => Modality::Image,
            VerificationRequest::Video(_) => Modality::Video,
            VerificationRequest::Chat { .. } => Modality::Chat,
        }
    }

    /// Endpoint path relative to the configured host
    pub fn path(&self) -> String {
        match self {
            VerificationRequest::Text { model, .. } => format!("/testai/{}", model.as_str()),
            VerificationRequest::Image(_) => "/testimage".to_string(),
            VerificationRequest::Video(_) => "/testvideo".to_string(),
            VerificationRequest::Chat { .. } => "/misbot".to_string(),
        }
    }

    pub fn body(&self) -> RequestBody<'_> {
        match self {
            VerificationRequest::Text { text, .. } => RequestBody::Json(json!({ "text": text })),
            VerificationRequest::Image(upload) => RequestBody::Multipart {
                field: "image",
                upload,
            },
            VerificationRequest::Video(upload) => RequestBody::Multipart {
                field: "video",
                upload,
            },
            VerificationRequest::Chat {
                message,
                conversation_history,
            } => RequestBody::Json(json!({
                "message": message,
                "conversation_history": conversation_history,
            })),
        }
    }
}

/// Value of a single text-test metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

/// Result of an AI fact-check test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextResult {
    pub hallucination_score: f64,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metrics: BTreeMap<String, MetricValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManipulatedRegion {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManipulatedSegment {
    #[serde(rename = "type")]
    pub kind: String,
    pub start_time: f64,
    pub end_time: f64,
    #[serde(default)]
    pub confidence: f64,
}

/// Result of an image authenticity check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageResult {
    pub authentic: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manipulated_regions: Option<Vec<ManipulatedRegion>>,
}

impl ImageResult {
    /// Missing confidence counts as zero
    pub fn confidence(&self) -> f64 {
        self.confidence_score.unwrap_or(0.0)
    }
}

/// Result of a video authenticity check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoResult {
    pub authentic: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manipulated_segments: Option<Vec<ManipulatedSegment>>,
}

impl VideoResult {
    pub fn confidence(&self) -> f64 {
        self.confidence_score.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Fact-check verdict attached to a bot reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactCheck {
    pub verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<Source>,
}

/// Reply from MisBot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResult {
    #[serde(rename = "result", default, skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fact_check: Option<FactCheck>,
}

impl ChatResult {
    /// Reply text, or the fallback notice when the service sent none
    pub fn reply_text(&self) -> &str {
        match self.reply.as_deref() {
            Some(reply) if !reply.is_empty() => reply,
            _ => EMPTY_REPLY_TEXT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_round_trips_through_identifier() {
        for model in AiModel::ALL {
            assert_eq!(model.as_str().parse::<AiModel>().unwrap(), model);
        }
        assert!("gpt-5".parse::<AiModel>().is_err());
    }

    #[test]
    fn test_text_request_keys_model_into_path() {
        let request = VerificationRequest::Text {
            model: AiModel::Gpt4,
            text: "The moon is made of cheese".to_string(),
        };
        assert_eq!(request.path(), "/testai/gpt-4");
        assert_eq!(
            request.body(),
            RequestBody::Json(json!({ "text": "The moon is made of cheese" }))
        );
    }

    #[test]
    fn test_chat_body_carries_history() {
        let request = VerificationRequest::Chat {
            message: "Is the earth flat?".to_string(),
            conversation_history: vec![HistoryEntry {
                text: "Hello".to_string(),
                sender: Sender::Bot,
            }],
        };
        let RequestBody::Json(body) = request.body() else {
            panic!("chat must be sent as JSON");
        };
        assert_eq!(body["message"], "Is the earth flat?");
        assert_eq!(body["conversation_history"][0]["sender"], "bot");
        assert_eq!(body["conversation_history"][0]["text"], "Hello");
    }

    #[test]
    fn test_media_requests_use_multipart_fields() {
        let upload = MediaUpload::new("clip.mp4", None, vec![1, 2, 3]);
        let request = VerificationRequest::Video(upload);
        assert_eq!(request.path(), "/testvideo");
        assert!(matches!(
            request.body(),
            RequestBody::Multipart { field: "video", .. }
        ));
    }

    #[test]
    fn test_image_result_defaults_missing_fields() {
        let result: ImageResult = serde_json::from_str(r#"{"authentic": true}"#).unwrap();
        assert_eq!(result.confidence(), 0.0);
        assert!(result.analysis.is_none());
        assert!(result.manipulated_regions.is_none());
    }

    #[test]
    fn test_metric_values_accept_numbers_and_strings() {
        let result: TextResult = serde_json::from_str(
            r#"{"hallucination_score": 0.4, "metrics": {"accuracy": 0.9, "verdict": "mixed"}}"#,
        )
        .unwrap();
        assert_eq!(result.metrics["accuracy"], MetricValue::Number(0.9));
        assert_eq!(result.metrics["verdict"], MetricValue::Text("mixed".to_string()));
    }

    #[test]
    fn test_chat_reply_falls_back_when_missing() {
        let result: ChatResult = serde_json::from_str(r#"{"error": "boom"}"#).unwrap();
        assert_eq!(result.reply_text(), EMPTY_REPLY_TEXT);
    }
}
