use ragchat_logging::{rc_debug, rc_info, rc_warn};

use crate::{
    normalize_answer, AppState, AskOutcome, Effect, Msg, RequestId, TranscriptEntry,
    UploadOutcome, UploadStatus,
};

pub const NO_FILE_SELECTED_TEXT: &str = "Please select a file.";
pub const UPLOAD_ERROR_TEXT: &str = "Upload error";
pub const UPLOAD_FAILED_TEXT: &str = "Upload failed";
pub const UPLOAD_SUCCEEDED_FALLBACK_TEXT: &str = "Document uploaded.";
pub const ASK_FAILED_TEXT: &str = "❌ Failed to get response from server.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Mounted => vec![Effect::CheckStatus],
        Msg::StatusReceived {
            has_document,
            supported_formats,
        } => {
            rc_info!("Status query: has_document={}", has_document);
            state.set_document_available(has_document);
            // Older services omit the list; keep the formats we already know.
            if !supported_formats.is_empty() {
                state.set_supported_formats(supported_formats);
            }
            Vec::new()
        }
        Msg::StatusFailed { reason } => {
            // Soft failure: keep whatever we believed before.
            rc_warn!("Status query failed: {}", reason);
            Vec::new()
        }
        Msg::FileSelected(file) => {
            rc_debug!("File selected name={} len={}", file.name, file.bytes.len());
            state.select_file(file);
            Vec::new()
        }
        Msg::FileSelectionFailed { path, reason } => {
            rc_warn!("Could not read {}: {}", path, reason);
            state.set_upload_status(UploadStatus::failure(format!(
                "Could not read {path}: {reason}"
            )));
            Vec::new()
        }
        Msg::UploadClicked => start_upload(&mut state),
        Msg::UploadFinished(outcome) => {
            finish_upload(&mut state, outcome);
            Vec::new()
        }
        Msg::QuestionChanged(text) => {
            if state.document_available() {
                state.set_pending_question(text);
            }
            Vec::new()
        }
        Msg::SubmitClicked => ask(&mut state),
        Msg::EnterPressed { newline_modifier } => {
            if newline_modifier {
                if state.document_available() {
                    let mut text = state.pending_question().to_owned();
                    text.push('\n');
                    state.set_pending_question(text);
                }
                Vec::new()
            } else {
                ask(&mut state)
            }
        }
        Msg::AskFinished {
            request_id,
            outcome,
        } => finish_ask(&mut state, request_id, outcome),
    };

    (state, effects)
}

fn start_upload(state: &mut AppState) -> Vec<Effect> {
    if state.is_uploading() {
        return Vec::new();
    }
    let Some(file) = state.selected_file().cloned() else {
        state.set_upload_status(UploadStatus::failure(NO_FILE_SELECTED_TEXT));
        return Vec::new();
    };
    state.set_uploading(true);
    vec![Effect::Upload { file }]
}

fn finish_upload(state: &mut AppState, outcome: UploadOutcome) {
    if !state.is_uploading() {
        rc_warn!("Ignoring upload completion with no upload in flight");
        return;
    }
    state.set_uploading(false);

    let status = match outcome {
        UploadOutcome::Succeeded { message } => {
            state.set_document_available(true);
            state.clear_selected_file();
            UploadStatus::success(
                message.unwrap_or_else(|| UPLOAD_SUCCEEDED_FALLBACK_TEXT.to_owned()),
            )
        }
        UploadOutcome::Rejected { detail } => {
            UploadStatus::failure(detail.unwrap_or_else(|| UPLOAD_FAILED_TEXT.to_owned()))
        }
        UploadOutcome::TransportFailed { reason } => {
            rc_warn!("Upload transport failure: {}", reason);
            UploadStatus::failure(UPLOAD_ERROR_TEXT)
        }
    };
    state.set_upload_status(status);
}

fn ask(state: &mut AppState) -> Vec<Effect> {
    if !state.document_available() {
        return Vec::new();
    }
    let question = state.pending_question().trim().to_owned();
    if question.is_empty() {
        return Vec::new();
    }

    state.append_entry(TranscriptEntry::question(question.clone()));
    state.take_pending_question();
    let request_id = state.begin_ask();
    rc_debug!("Ask issued request_id={} len={}", request_id, question.len());

    vec![
        Effect::ScrollToLatest,
        Effect::Ask {
            request_id,
            question,
        },
    ]
}

fn finish_ask(state: &mut AppState, request_id: RequestId, outcome: AskOutcome) -> Vec<Effect> {
    if !state.settle_ask(request_id) {
        rc_warn!("Ignoring completion for unknown request_id={}", request_id);
        return Vec::new();
    }

    // Answers land in completion order; questions were already placed in issue order.
    let text = match outcome {
        AskOutcome::Answered(answer) => normalize_answer(&answer),
        AskOutcome::Rejected {
            detail: Some(detail),
        } => format!("❌ {detail}"),
        AskOutcome::Rejected { detail: None } => ASK_FAILED_TEXT.to_owned(),
        AskOutcome::TransportFailed { reason } => {
            rc_warn!("Ask request_id={} failed: {}", request_id, reason);
            ASK_FAILED_TEXT.to_owned()
        }
    };
    state.append_entry(TranscriptEntry::answer(text));
    vec![Effect::ScrollToLatest]
}
