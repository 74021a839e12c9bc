use async_trait::async_trait;
use misai_core::adapters::TextInput;
use misai_core::model::{AiModel, MediaUpload, VerificationRequest};
use misai_core::render::{render_state, Panel, Severity};
use misai_core::{
    ChatSession, ClientError, ClientResult, Completion, ImageAdapter, SubmissionMachine,
    SubmissionState, TextAdapter, VerificationBackend, VideoAdapter,
};
use std::cell::RefCell;

/// Backend answering every request with a canned response
struct FakeBackend {
    response: ClientResult<&'static str>,
    seen: RefCell<Vec<VerificationRequest>>,
}

impl FakeBackend {
    fn ok(body: &'static str) -> Self {
        Self {
            response: Ok(body),
            seen: RefCell::new(Vec::new()),
        }
    }

    fn status(status: u16) -> Self {
        Self {
            response: Err(ClientError::Status {
                status,
                reason: "Internal Server Error".to_string(),
            }),
            seen: RefCell::new(Vec::new()),
        }
    }
}

#[async_trait(?Send)]
impl VerificationBackend for FakeBackend {
    async fn dispatch(&self, request: &VerificationRequest) -> ClientResult<Vec<u8>> {
        self.seen.borrow_mut().push(request.clone());
        self.response.clone().map(|body| body.as_bytes().to_vec())
    }
}

fn text_machine() -> SubmissionMachine<TextAdapter> {
    let mut machine = SubmissionMachine::new(TextAdapter);
    machine
        .set_input(TextInput {
            model: Some(AiModel::Gpt4),
            text: "The moon is made of cheese".to_string(),
        })
        .unwrap();
    machine
}

#[tokio::test]
async fn test_text_scenario_end_to_end() {
    let backend = FakeBackend::ok(r#"{"hallucination_score": 0.92, "metrics": {"fluency": 0.8}}"#);
    let mut machine = text_machine();

    assert_eq!(machine.run(&backend).await, Ok(Completion::Applied));

    let seen = backend.seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].path(), "/testai/gpt-4");

    let Panel::Result(report) = render_state(machine.state()) else {
        panic!("expected a rendered result");
    };
    assert_eq!(report.hallucination.label, "92.0%");
    assert_eq!(report.hallucination.severity, Severity::High);
    assert_eq!(report.metrics[0].to_string(), "fluency: 0.80");
}

#[tokio::test]
async fn test_server_error_leaves_input_and_hides_result() {
    let backend = FakeBackend::status(500);
    let mut machine = text_machine();
    machine.run(&backend).await.unwrap();

    assert!(matches!(machine.state(), SubmissionState::Failure { .. }));
    assert!(machine.state().error().unwrap().contains("500"));
    assert!(machine.state().result().is_none());
    assert_eq!(machine.input().text, "The moon is made of cheese");
    assert!(machine.can_submit());
    assert!(render_state(machine.state()).report().is_none());
}

#[tokio::test]
async fn test_undecodable_body_is_a_failure() {
    let backend = FakeBackend::ok("<html>gateway timeout</html>");
    let mut machine = SubmissionMachine::new(ImageAdapter);
    machine
        .set_input(Some(MediaUpload::new("cat.png", None, vec![1, 2, 3])))
        .unwrap();
    machine.run(&backend).await.unwrap();

    let error = machine.state().error().unwrap();
    assert!(error.starts_with("Failed to verify image: unexpected response"));
}

#[tokio::test]
async fn test_new_selection_clears_previous_verdict() {
    let backend = FakeBackend::ok(
        r#"{"authentic": false, "confidence_score": 0.81,
            "manipulated_regions": [{"type": "splice", "confidence": 0.77}]}"#,
    );
    let mut machine = SubmissionMachine::new(ImageAdapter);
    machine
        .set_input(Some(MediaUpload::new("a.png", None, vec![1])))
        .unwrap();
    machine.run(&backend).await.unwrap();
    assert!(machine.state().result().is_some());

    machine
        .replace_input(Some(MediaUpload::new("b.png", None, vec![2])))
        .unwrap();
    assert_eq!(machine.state().name(), "ready");
    assert!(machine.state().result().is_none());
    assert!(render_state(machine.state()).is_hidden());
    assert_eq!(machine.input().as_ref().unwrap().file_name, "b.png");
}

#[tokio::test]
async fn test_identical_resubmit_is_an_independent_cycle() {
    let backend = FakeBackend::ok(
        r#"{"authentic": false, "confidence_score": 0.6,
            "manipulated_segments": [{"type": "face-swap", "start_time": 125, "end_time": 140, "confidence": 0.6}]}"#,
    );
    let mut machine = SubmissionMachine::new(VideoAdapter);
    machine
        .set_input(Some(MediaUpload::new("clip.mp4", None, vec![0; 16])))
        .unwrap();

    machine.run(&backend).await.unwrap();
    let first_generation = machine.generation();
    machine.run(&backend).await.unwrap();

    assert_eq!(backend.seen.borrow().len(), 2);
    assert_eq!(machine.generation(), first_generation + 1);
    let Panel::Result(report) = render_state(machine.state()) else {
        panic!("expected a rendered result");
    };
    assert_eq!(report.findings.len(), 1);
    assert_eq!(report.findings[0].time_range.as_deref(), Some("2:05 - 2:20"));
}

#[tokio::test]
async fn test_chat_scenario_appends_echo_then_reply() {
    let backend = FakeBackend::ok(
        r#"{"result": "No, the earth is an oblate spheroid.",
            "fact_check": {"verified": true, "confidence": 0.95, "sources": [{"url": "https://example.org"}]}}"#,
    );
    let mut session = ChatSession::new();
    session.set_draft("Is the earth flat?").unwrap();

    assert_eq!(session.run(&backend).await, Ok(Completion::Applied));

    let messages = session.log().messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].text, "Is the earth flat?");
    assert_eq!(messages[2].text, "No, the earth is an oblate spheroid.");
    assert!(messages[0].id < messages[1].id && messages[1].id < messages[2].id);
    assert!(messages[2].fact_check.as_ref().unwrap().verified);
}

#[tokio::test]
async fn test_chat_failure_keeps_history_and_ids_monotonic() {
    let failing = FakeBackend::status(503);
    let mut session = ChatSession::new();
    session.set_draft("first").unwrap();
    session.run(&failing).await.unwrap();

    let ok = FakeBackend::ok(r#"{"result": "second answer"}"#);
    session.set_draft("second").unwrap();
    session.run(&ok).await.unwrap();

    let messages = session.log().messages();
    assert_eq!(messages.len(), 5);
    assert!(messages[2].is_error);
    let ids: Vec<u64> = messages.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);

    // the failed exchange is still part of the context for the retry
    let seen = ok.seen.borrow();
    match &seen[0] {
        VerificationRequest::Chat {
            conversation_history,
            ..
        } => assert_eq!(conversation_history.len(), 3),
        other => panic!("unexpected request: {:?}", other),
    }
}
