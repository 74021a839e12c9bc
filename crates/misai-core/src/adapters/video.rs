//! Video authenticity checks

use super::ModalityAdapter;
use crate::model::{MediaUpload, VerificationRequest, VideoResult};
use crate::{Modality, ValidationError};

#[derive(Debug, Clone, Copy, Default)]
pub struct VideoAdapter;

impl ModalityAdapter for VideoAdapter {
    type Input = Option<MediaUpload>;
    type Output = VideoResult;

    fn modality(&self) -> Modality {
        Modality::Video
    }

    fn validate(&self, input: &Option<MediaUpload>) -> Result<(), ValidationError> {
        match input {
            Some(_) => Ok(()),
            None => Err(ValidationError::MissingVideo),
        }
    }

    fn build_request(&self, input: &Option<MediaUpload>) -> Result<VerificationRequest, ValidationError> {
        input
            .clone()
            .map(VerificationRequest::Video)
            .ok_or(ValidationError::MissingVideo)
    }

    fn failure_context(&self) -> &'static str {
        "Failed to verify video"
    }
}
