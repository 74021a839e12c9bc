//! Modality adapters
//!
//! One adapter per content type. Each supplies the validity predicate,
//! the request constructor and the response decoder that specialise the
//! generic [`SubmissionMachine`](crate::SubmissionMachine).

pub mod chat;
pub mod image;
pub mod text;
pub mod video;

pub use chat::{ChatAdapter, ChatInput, ChatSession};
pub use image::ImageAdapter;
pub use text::{TextAdapter, TextInput};
pub use video::VideoAdapter;

use crate::model::VerificationRequest;
use crate::{ClientResult, Modality, ValidationError};
use serde::de::DeserializeOwned;
use std::fmt::Debug;

/// Per-modality specialisation of the submission lifecycle
pub trait ModalityAdapter {
    /// Local input edited by the user
    type Input: Clone + Debug + Default;
    /// Decoded verification result
    type Output: Clone + Debug + DeserializeOwned;

    fn modality(&self) -> Modality;

    /// Validity predicate over the current input
    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError>;

    /// Build the request snapshot from valid input
    fn build_request(&self, input: &Self::Input) -> Result<VerificationRequest, ValidationError>;

    /// Prefix of the human-readable failure message
    fn failure_context(&self) -> &'static str;

    /// Decode a successful response body
    fn decode(&self, body: &[u8]) -> ClientResult<Self::Output> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Whether the input is emptied once it has been snapshotted
    fn clears_input_on_submit(&self) -> bool {
        false
    }
}
