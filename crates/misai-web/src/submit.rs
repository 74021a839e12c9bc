//! Bridges a page's state machine to the verification service

use leptos::*;
use misai_core::machine::execute;
use misai_core::{Completion, HttpBackend, ModalityAdapter, SubmissionMachine, SubmitError};

/// Submit the page's current input and apply the outcome when it arrives
///
/// Validation failures are written to `notice`. A completion that arrives
/// after the page was torn down finds its signal disposed and is dropped.
pub fn launch<A>(
    machine: RwSignal<SubmissionMachine<A>>,
    backend: HttpBackend,
    notice: WriteSignal<Option<String>>,
) where
    A: ModalityAdapter + Clone + 'static,
{
    let Some(submitted) = machine.try_update(|m| m.submit()) else {
        return;
    };

    let ticket = match submitted {
        Ok(ticket) => ticket,
        Err(SubmitError::Invalid(err)) => {
            notice.set(Some(err.to_string()));
            return;
        }
        Err(SubmitError::InFlight) => return,
    };
    notice.set(None);

    let adapter = machine.with_untracked(|m| m.adapter().clone());
    spawn_local(async move {
        let outcome = execute(&adapter, &backend, ticket.request()).await;
        match machine.try_update(|m| m.complete(ticket.generation(), outcome)) {
            Some(Completion::Applied) => {}
            Some(Completion::Stale) | None => {
                tracing::debug!("Dropped completion of request {}", ticket.generation());
            }
        }
    });
}
