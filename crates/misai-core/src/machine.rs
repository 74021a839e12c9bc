//! Submission state machine shared by every verification page
//!
//! ```text
//! Idle <-> Ready --submit--> Submitting --ok--> Success
//!                                 |                 |
//!                                 +--err--> Failure |
//!                  Success/Failure --submit--> Submitting
//! ```
//!
//! The machine never awaits anything itself. `submit` hands out a [`Ticket`]
//! carrying the request snapshot; whoever runs the request reports back with
//! `complete`, and a completion whose ticket no longer matches is dropped.

use crate::adapters::ModalityAdapter;
use crate::backend::VerificationBackend;
use crate::model::VerificationRequest;
use crate::{ClientResult, SubmitError};
use std::sync::Arc;
use tracing::{debug, warn};

/// Lifecycle state of one page
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionState<R> {
    Idle,
    Ready,
    Submitting { request: Arc<VerificationRequest> },
    Success { result: R },
    Failure { error: String },
}

impl<R> SubmissionState<R> {
    pub fn name(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Ready => "ready",
            SubmissionState::Submitting { .. } => "submitting",
            SubmissionState::Success { .. } => "success",
            SubmissionState::Failure { .. } => "failure",
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionState::Submitting { .. })
    }

    pub fn pending_request(&self) -> Option<&VerificationRequest> {
        match self {
            SubmissionState::Submitting { request } => Some(request.as_ref()),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&R> {
        match self {
            SubmissionState::Success { result } => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SubmissionState::Failure { error } => Some(error),
            _ => None,
        }
    }
}

/// Claim on the single outstanding request of a machine
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    generation: u64,
    request: Arc<VerificationRequest>,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn request(&self) -> &VerificationRequest {
        &self.request
    }
}

/// What happened to a reported outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Stale,
}

/// Generic per-page lifecycle, specialised by a modality adapter
#[derive(Debug, Clone)]
pub struct SubmissionMachine<A: ModalityAdapter> {
    adapter: A,
    input: A::Input,
    state: SubmissionState<A::Output>,
    generation: u64,
}

impl<A: ModalityAdapter> SubmissionMachine<A> {
    pub fn new(adapter: A) -> Self {
        let mut machine = Self {
            adapter,
            input: A::Input::default(),
            state: SubmissionState::Idle,
            generation: 0,
        };
        machine.refresh_readiness();
        machine
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn input(&self) -> &A::Input {
        &self.input
    }

    pub fn state(&self) -> &SubmissionState<A::Output> {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_submitting(&self) -> bool {
        self.state.is_submitting()
    }

    /// Whether the submit control should be enabled
    pub fn can_submit(&self) -> bool {
        !self.is_submitting() && self.adapter.validate(&self.input).is_ok()
    }

    /// Mutate the local input. Refused while a request is in flight.
    pub fn edit_input(&mut self, edit: impl FnOnce(&mut A::Input)) -> Result<(), SubmitError> {
        if self.is_submitting() {
            return Err(SubmitError::InFlight);
        }
        edit(&mut self.input);
        self.refresh_readiness();
        Ok(())
    }

    pub fn set_input(&mut self, input: A::Input) -> Result<(), SubmitError> {
        self.edit_input(|current| *current = input)
    }

    /// Install a new input and drop any result or error tied to the old one
    pub fn replace_input(&mut self, input: A::Input) -> Result<(), SubmitError> {
        self.reset()?;
        self.set_input(input)
    }

    /// Drop any result or error and fall back to Idle/Ready
    pub fn reset(&mut self) -> Result<(), SubmitError> {
        if self.is_submitting() {
            return Err(SubmitError::InFlight);
        }
        self.state = SubmissionState::Idle;
        self.refresh_readiness();
        Ok(())
    }

    /// Snapshot the input into a request and enter Submitting
    pub fn submit(&mut self) -> Result<Ticket, SubmitError> {
        if self.is_submitting() {
            debug!(
                modality = %self.adapter.modality(),
                "Ignoring submit while a request is in flight"
            );
            return Err(SubmitError::InFlight);
        }
        self.adapter.validate(&self.input)?;

        let request = Arc::new(self.adapter.build_request(&self.input)?);
        if self.adapter.clears_input_on_submit() {
            self.input = A::Input::default();
        }

        self.generation += 1;
        debug!(
            modality = %self.adapter.modality(),
            generation = self.generation,
            from = self.state.name(),
            "Submitting verification request"
        );
        self.state = SubmissionState::Submitting {
            request: Arc::clone(&request),
        };

        Ok(Ticket {
            generation: self.generation,
            request,
        })
    }

    /// Apply the outcome of the request identified by `generation`
    pub fn complete(&mut self, generation: u64, outcome: ClientResult<A::Output>) -> Completion {
        if !self.is_submitting() || generation != self.generation {
            debug!(
                modality = %self.adapter.modality(),
                generation,
                current = self.generation,
                "Discarding stale completion"
            );
            return Completion::Stale;
        }

        self.state = match outcome {
            Ok(result) => {
                debug!(modality = %self.adapter.modality(), generation, "Verification succeeded");
                SubmissionState::Success { result }
            }
            Err(err) => {
                if err.is_decode() {
                    warn!(modality = %self.adapter.modality(), "Undecodable response: {}", err);
                } else {
                    warn!(modality = %self.adapter.modality(), "Request failed: {}", err);
                }
                SubmissionState::Failure {
                    error: format!("{}: {}", self.adapter.failure_context(), err),
                }
            }
        };

        Completion::Applied
    }

    /// Run the submission to completion against `backend`
    pub async fn run<B>(&mut self, backend: &B) -> Result<Completion, SubmitError>
    where
        B: VerificationBackend + ?Sized,
    {
        let ticket = self.submit()?;
        let outcome = execute(&self.adapter, backend, ticket.request()).await;
        Ok(self.complete(ticket.generation(), outcome))
    }

    fn refresh_readiness(&mut self) {
        if matches!(self.state, SubmissionState::Idle | SubmissionState::Ready) {
            self.state = if self.adapter.validate(&self.input).is_ok() {
                SubmissionState::Ready
            } else {
                SubmissionState::Idle
            };
        }
    }
}

impl<A: ModalityAdapter + Default> Default for SubmissionMachine<A> {
    fn default() -> Self {
        Self::new(A::default())
    }
}

/// Send `request` and decode the response with the adapter's decoder
pub async fn execute<A, B>(
    adapter: &A,
    backend: &B,
    request: &VerificationRequest,
) -> ClientResult<A::Output>
where
    A: ModalityAdapter + ?Sized,
    B: VerificationBackend + ?Sized,
{
    let body = backend.dispatch(request).await?;
    adapter.decode(&body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{TextAdapter, TextInput};
    use crate::model::{AiModel, TextResult};
    use crate::{ClientError, ValidationError};

    fn ready_machine() -> SubmissionMachine<TextAdapter> {
        let mut machine = SubmissionMachine::new(TextAdapter);
        machine
            .set_input(TextInput {
                model: Some(AiModel::Gpt4),
                text: "The moon is made of cheese".to_string(),
            })
            .unwrap();
        machine
    }

    fn text_result(score: f64) -> TextResult {
        TextResult {
            hallucination_score: score,
            metrics: Default::default(),
            analysis: None,
        }
    }

    #[test]
    fn test_starts_idle_and_tracks_readiness() {
        let mut machine = SubmissionMachine::new(TextAdapter);
        assert_eq!(machine.state(), &SubmissionState::Idle);

        machine.edit_input(|i| i.model = Some(AiModel::Llama3)).unwrap();
        assert_eq!(machine.state(), &SubmissionState::Idle);

        machine.edit_input(|i| i.text = "claim".to_string()).unwrap();
        assert_eq!(machine.state(), &SubmissionState::Ready);

        machine.edit_input(|i| i.text = "   ".to_string()).unwrap();
        assert_eq!(machine.state(), &SubmissionState::Idle);
    }

    #[test]
    fn test_invalid_submit_never_leaves_idle() {
        let mut machine = SubmissionMachine::new(TextAdapter);
        let err = machine.submit().unwrap_err();
        assert_eq!(err, SubmitError::Invalid(ValidationError::MissingModelOrText));
        assert_eq!(machine.state(), &SubmissionState::Idle);
        assert_eq!(machine.generation(), 0);
    }

    #[test]
    fn test_second_submit_is_a_noop() {
        let mut machine = ready_machine();
        let ticket = machine.submit().unwrap();
        let before = machine.state().clone();

        assert_eq!(machine.submit(), Err(SubmitError::InFlight));
        assert_eq!(machine.state(), &before);
        assert_eq!(machine.generation(), ticket.generation());
        assert!(!machine.can_submit());
    }

    #[test]
    fn test_input_is_locked_while_submitting() {
        let mut machine = ready_machine();
        machine.submit().unwrap();
        assert_eq!(
            machine.edit_input(|i| i.text.clear()),
            Err(SubmitError::InFlight)
        );
        assert_eq!(machine.reset(), Err(SubmitError::InFlight));
        assert_eq!(machine.input().text, "The moon is made of cheese");
    }

    #[test]
    fn test_failure_records_error_without_result() {
        let mut machine = ready_machine();
        let ticket = machine.submit().unwrap();
        let outcome = Err(ClientError::Status {
            status: 500,
            reason: "Internal Server Error".to_string(),
        });

        assert_eq!(machine.complete(ticket.generation(), outcome), Completion::Applied);
        assert_eq!(
            machine.state().error(),
            Some("Failed to test AI: Error: 500 Internal Server Error")
        );
        assert!(machine.state().result().is_none());
        // input survives so the user can retry
        assert_eq!(machine.input().text, "The moon is made of cheese");
        assert!(machine.can_submit());
    }

    #[test]
    fn test_success_clears_previous_error() {
        let mut machine = ready_machine();
        let ticket = machine.submit().unwrap();
        machine.complete(
            ticket.generation(),
            Err(ClientError::Transport("connection refused".to_string())),
        );

        let ticket = machine.submit().unwrap();
        assert!(machine.state().error().is_none());
        machine.complete(ticket.generation(), Ok(text_result(0.2)));
        assert!(machine.state().error().is_none());
        assert_eq!(machine.state().result(), Some(&text_result(0.2)));
    }

    #[test]
    fn test_resubmit_replaces_result() {
        let mut machine = ready_machine();
        let first = machine.submit().unwrap();
        machine.complete(first.generation(), Ok(text_result(0.9)));

        let second = machine.submit().unwrap();
        assert_eq!(second.request(), first.request());
        assert_ne!(second.generation(), first.generation());
        assert!(machine.state().result().is_none());

        machine.complete(second.generation(), Ok(text_result(0.1)));
        assert_eq!(machine.state().result(), Some(&text_result(0.1)));
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut machine = ready_machine();
        let first = machine.submit().unwrap();
        machine.complete(first.generation(), Ok(text_result(0.5)));

        // late duplicate of an already settled request
        assert_eq!(
            machine.complete(first.generation(), Ok(text_result(0.99))),
            Completion::Stale
        );
        assert_eq!(machine.state().result(), Some(&text_result(0.5)));

        let second = machine.submit().unwrap();
        assert_eq!(
            machine.complete(first.generation(), Ok(text_result(0.99))),
            Completion::Stale
        );
        assert!(machine.state().is_submitting());
        assert_eq!(machine.state().pending_request(), Some(second.request()));
    }

    #[test]
    fn test_reset_returns_to_ready() {
        let mut machine = ready_machine();
        let ticket = machine.submit().unwrap();
        machine.complete(ticket.generation(), Ok(text_result(0.3)));

        machine.reset().unwrap();
        assert_eq!(machine.state(), &SubmissionState::Ready);
    }

    #[test]
    fn test_new_input_drops_previous_result() {
        let mut machine = ready_machine();
        let ticket = machine.submit().unwrap();
        machine.complete(ticket.generation(), Ok(text_result(0.92)));

        machine
            .replace_input(TextInput {
                model: Some(AiModel::Gpt4),
                text: "Water boils at 50C".to_string(),
            })
            .unwrap();
        assert_eq!(machine.state(), &SubmissionState::Ready);
        assert!(machine.state().result().is_none());
        assert_eq!(machine.input().text, "Water boils at 50C");

        machine.replace_input(TextInput::default()).unwrap();
        assert_eq!(machine.state(), &SubmissionState::Idle);
    }

    #[test]
    fn test_replace_input_refused_while_submitting() {
        let mut machine = ready_machine();
        machine.submit().unwrap();
        assert_eq!(
            machine.replace_input(TextInput::default()),
            Err(SubmitError::InFlight)
        );
        assert_eq!(machine.input().text, "The moon is made of cheese");
    }
}
