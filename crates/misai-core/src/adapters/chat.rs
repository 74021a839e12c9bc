//! MisBot chat: message plus the prior conversation as context

use super::ModalityAdapter;
use crate::backend::VerificationBackend;
use crate::conversation::{ConversationLog, MessageDraft, CONNECTION_ERROR_TEXT};
use crate::machine::{execute, Completion, SubmissionMachine, SubmissionState, Ticket};
use crate::model::{ChatResult, HistoryEntry, VerificationRequest};
use crate::{ClientResult, Modality, SubmitError, ValidationError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatInput {
    pub message: String,
    /// Filled from the conversation log right before submitting
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ChatAdapter;

impl ModalityAdapter for ChatAdapter {
    type Input = ChatInput;
    type Output = ChatResult;

    fn modality(&self) -> Modality {
        Modality::Chat
    }

    fn validate(&self, input: &ChatInput) -> Result<(), ValidationError> {
        if input.message.trim().is_empty() {
            return Err(ValidationError::EmptyMessage);
        }
        Ok(())
    }

    fn build_request(&self, input: &ChatInput) -> Result<VerificationRequest, ValidationError> {
        self.validate(input)?;
        Ok(VerificationRequest::Chat {
            message: input.message.clone(),
            conversation_history: input.history.clone(),
        })
    }

    fn failure_context(&self) -> &'static str {
        "Failed to reach MisBot"
    }

    fn clears_input_on_submit(&self) -> bool {
        true
    }
}

/// Chat page state: a submission machine feeding a conversation log
///
/// The user's message is echoed into the log as soon as it is submitted;
/// the bot reply (or an error-flagged bot message) follows when the request
/// settles.
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    machine: SubmissionMachine<ChatAdapter>,
    log: ConversationLog,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    pub fn machine(&self) -> &SubmissionMachine<ChatAdapter> {
        &self.machine
    }

    pub fn draft(&self) -> &str {
        &self.machine.input().message
    }

    pub fn is_sending(&self) -> bool {
        self.machine.is_submitting()
    }

    pub fn can_send(&self) -> bool {
        self.machine.can_submit()
    }

    pub fn set_draft(&mut self, text: impl Into<String>) -> Result<(), SubmitError> {
        let text = text.into();
        self.machine.edit_input(|input| input.message = text)
    }

    /// Snapshot the log as context, submit, and echo the user message
    pub fn submit(&mut self) -> Result<Ticket, SubmitError> {
        if self.machine.is_submitting() {
            return Err(SubmitError::InFlight);
        }
        self.machine.adapter().validate(self.machine.input())?;

        let history = self.log.snapshot_for_request();
        self.machine.edit_input(|input| input.history = history)?;

        let text = self.machine.input().message.clone();
        let ticket = self.machine.submit()?;
        self.log.append(MessageDraft::user(text));
        Ok(ticket)
    }

    /// Settle the request and append the bot's answer
    pub fn complete(&mut self, generation: u64, outcome: ClientResult<ChatResult>) -> Completion {
        let completion = self.machine.complete(generation, outcome);
        if completion == Completion::Applied {
            match self.machine.state() {
                SubmissionState::Success { result } => {
                    let draft = MessageDraft::bot(result.reply_text(), result.fact_check.clone());
                    self.log.append(draft);
                }
                SubmissionState::Failure { .. } => {
                    self.log.append(MessageDraft::error(CONNECTION_ERROR_TEXT));
                }
                _ => {}
            }
        }
        completion
    }

    /// Send the current draft and wait for the reply
    pub async fn run<B>(&mut self, backend: &B) -> Result<Completion, SubmitError>
    where
        B: VerificationBackend + ?Sized,
    {
        let ticket = self.submit()?;
        let outcome = execute(&ChatAdapter, backend, ticket.request()).await;
        Ok(self.complete(ticket.generation(), outcome))
    }
}
