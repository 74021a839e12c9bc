//! MISAI Client Core
//!
//! This crate drives the client side of a verification request: capturing
//! input, submitting it to the verification service, and turning the
//! response into a human-readable judgment. Every page of the web client
//! (and the CLI) owns one [`SubmissionMachine`] specialised by a
//! [`ModalityAdapter`].

pub mod adapters;
pub mod backend;
pub mod conversation;
pub mod machine;
pub mod model;
pub mod preview;
pub mod render;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use adapters::{ChatAdapter, ChatSession, ImageAdapter, ModalityAdapter, TextAdapter, VideoAdapter};
pub use backend::{ClientConfig, HttpBackend, VerificationBackend};
pub use conversation::{ConversationLog, ConversationMessage};
pub use machine::{Completion, SubmissionMachine, SubmissionState, Ticket};
pub use model::{
    AiModel, ChatResult, FactCheck, ImageResult, MediaUpload, TextResult, VerificationRequest,
    VideoResult,
};
pub use render::{Panel, Render, Severity};

/// Errors raised while talking to the verification service
///
/// Transport and status failures are kept apart from decode failures so they
/// can be logged separately, but all of them end in the same Failure state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    #[error("could not connect to the verification service: {0}")]
    Transport(String),

    #[error("Error: {status} {reason}")]
    Status { status: u16, reason: String },

    #[error("unexpected response from the verification service: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn is_decode(&self) -> bool {
        matches!(self, ClientError::Decode(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => ClientError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            },
            None => ClientError::Transport(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Local input that fails a modality's validity predicate
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select a model and enter text to test")]
    MissingModelOrText,

    #[error("Please select an image to verify")]
    MissingImage,

    #[error("Please select a video to verify")]
    MissingVideo,

    #[error("Please enter a message")]
    EmptyMessage,
}

/// Reasons a submit (or input edit) is refused by the state machine
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    #[error("a verification request is already in flight")]
    InFlight,

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Content type being verified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Text,
    Image,
    Video,
    Chat,
}

impl Modality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Modality::Text => "text",
            Modality::Image => "image",
            Modality::Video => "video",
            Modality::Chat => "chat",
        }
    }
}

impl std::fmt::Display for Modality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
