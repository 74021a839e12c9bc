//! AI fact-check testing: a model picked from the fixed list plus free text

use super::ModalityAdapter;
use crate::model::{AiModel, TextResult, VerificationRequest};
use crate::{Modality, ValidationError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    pub model: Option<AiModel>,
    pub text: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TextAdapter;

impl ModalityAdapter for TextAdapter {
    type Input = TextInput;
    type Output = TextResult;

    fn modality(&self) -> Modality {
        Modality::Text
    }

    fn validate(&self, input: &TextInput) -> Result<(), ValidationError> {
        if input.model.is_none() || input.text.trim().is_empty() {
            return Err(ValidationError::MissingModelOrText);
        }
        Ok(())
    }

    fn build_request(&self, input: &TextInput) -> Result<VerificationRequest, ValidationError> {
        self.validate(input)?;
        let model = input.model.ok_or(ValidationError::MissingModelOrText)?;
        Ok(VerificationRequest::Text {
            model,
            text: input.text.clone(),
        })
    }

    fn failure_context(&self) -> &'static str {
        "Failed to test AI"
    }
}
