//! End-to-end user journeys driven purely through messages.
use std::sync::Once;

use ragchat_core::{
    update, AppState, AskOutcome, Effect, Msg, SelectedFile, TranscriptEntry, UploadOutcome,
    ASK_FAILED_TEXT, DOCUMENT_READY_BANNER, PLACEHOLDER_NO_DOCUMENT, PLACEHOLDER_READY,
};
use serde_json::json;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(ragchat_logging::initialize_for_tests);
}

fn status(has_document: bool) -> Msg {
    Msg::StatusReceived {
        has_document,
        supported_formats: vec![".txt".to_string()],
    }
}

fn ask_request_id(effects: &[Effect]) -> u64 {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::Ask { request_id, .. } => Some(*request_id),
            _ => None,
        })
        .expect("ask effect")
}

#[test]
fn mount_requests_status() {
    init_logging();
    let (_state, effects) = update(AppState::new(), Msg::Mounted);
    assert_eq!(effects, vec![Effect::CheckStatus]);
}

#[test]
fn no_document_disables_input() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Mounted);
    let (state, _) = update(state, status(false));
    let view = state.view();

    assert!(!view.input_enabled);
    assert!(!view.send_enabled);
    assert_eq!(view.placeholder, PLACEHOLDER_NO_DOCUMENT);
    assert_eq!(view.document_banner(), None);
}

#[test]
fn failed_status_query_keeps_prior_value() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::StatusFailed {
            reason: "connection refused".to_string(),
        },
    );
    assert!(!state.document_available());
    assert!(state.view().upload_status.is_none());

    let (state, _) = update(state, status(true));
    let (state, _) = update(
        state,
        Msg::StatusFailed {
            reason: "timeout".to_string(),
        },
    );
    assert!(state.document_available());
}

#[test]
fn upload_enables_questions() {
    init_logging();
    let (state, _) = update(AppState::new(), status(false));
    let (state, _) = update(
        state,
        Msg::FileSelected(SelectedFile::new("notes.txt", b"deadline: March 3rd".to_vec())),
    );
    assert_eq!(state.view().selected_file_name.as_deref(), Some("notes.txt"));
    assert!(state.view().upload_enabled);

    let (state, effects) = update(state, Msg::UploadClicked);
    assert_eq!(effects.len(), 1);

    let (state, _) = update(
        state,
        Msg::UploadFinished(UploadOutcome::Succeeded {
            message: Some("Indexed 10 chunks".to_string()),
        }),
    );
    let view = state.view();

    let status = view.upload_status.as_ref().expect("upload status");
    assert!(status.succeeded);
    assert_eq!(status.message, "Indexed 10 chunks");
    assert!(view.input_enabled);
    assert_eq!(view.placeholder, PLACEHOLDER_READY);
    assert_eq!(view.selected_file_name, None);
    assert!(!view.upload_enabled);
    assert_eq!(view.document_banner(), Some(DOCUMENT_READY_BANNER));
}

#[test]
fn question_then_answer() {
    init_logging();
    let (state, _) = update(AppState::new(), status(true));
    let (state, _) = update(state, Msg::QuestionChanged("What is the deadline?".to_string()));
    assert!(state.view().send_enabled);

    let (state, effects) = update(
        state,
        Msg::EnterPressed {
            newline_modifier: false,
        },
    );
    let (state, _) = update(
        state,
        Msg::AskFinished {
            request_id: ask_request_id(&effects),
            outcome: AskOutcome::Answered(json!({"result": "March 3rd"})),
        },
    );

    assert_eq!(
        state.view().transcript,
        vec![
            TranscriptEntry::question("What is the deadline?"),
            TranscriptEntry::answer("March 3rd"),
        ]
    );
}

#[test]
fn transport_error_answer_text() {
    init_logging();
    let (state, _) = update(AppState::new(), status(true));
    let (state, _) = update(state, Msg::QuestionChanged("Hello?".to_string()));
    let (state, effects) = update(state, Msg::SubmitClicked);
    let (state, _) = update(
        state,
        Msg::AskFinished {
            request_id: ask_request_id(&effects),
            outcome: AskOutcome::TransportFailed {
                reason: "error sending request".to_string(),
            },
        },
    );

    let view = state.view();
    assert_eq!(view.transcript[1], TranscriptEntry::answer(ASK_FAILED_TEXT));
    assert_eq!(
        view.transcript[1].text(),
        "❌ Failed to get response from server."
    );
}

#[test]
fn status_reports_supported_formats() {
    init_logging();
    let (state, _) = update(AppState::new(), status(false));
    assert_eq!(state.view().supported_formats, vec![".txt".to_string()]);

    let (state, _) = update(
        state,
        Msg::StatusReceived {
            has_document: true,
            supported_formats: Vec::new(),
        },
    );
    assert!(state.document_available());
    assert_eq!(state.supported_formats(), [".txt".to_string()]);
}
