//! Image authenticity checks

use super::ModalityAdapter;
use crate::model::{ImageResult, MediaUpload, VerificationRequest};
use crate::{Modality, ValidationError};

#[derive(Debug, Clone, Copy, Default)]
pub struct ImageAdapter;

impl ModalityAdapter for ImageAdapter {
    type Input = Option<MediaUpload>;
    type Output = ImageResult;

    fn modality(&self) -> Modality {
        Modality::Image
    }

    fn validate(&self, input: &Option<MediaUpload>) -> Result<(), ValidationError> {
        match input {
            Some(_) => Ok(()),
            None => Err(ValidationError::MissingImage),
        }
    }

    fn build_request(&self, input: &Option<MediaUpload>) -> Result<VerificationRequest, ValidationError> {
        input
            .clone()
            .map(VerificationRequest::Image)
            .ok_or(ValidationError::MissingImage)
    }

    fn failure_context(&self) -> &'static str {
        "Failed to verify image"
    }
}
