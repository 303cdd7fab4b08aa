//! Ragchat core: pure state machine, transcript and view-model helpers.
mod effect;
mod msg;
mod normalize;
mod state;
mod transcript;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::{AskOutcome, Msg, UploadOutcome};
pub use normalize::{normalize_answer, AnswerShape};
pub use state::{AppState, RequestId, SelectedFile, UploadStatus};
pub use transcript::{EntryKind, Transcript, TranscriptEntry};
pub use update::{
    update, ASK_FAILED_TEXT, NO_FILE_SELECTED_TEXT, UPLOAD_ERROR_TEXT, UPLOAD_FAILED_TEXT,
    UPLOAD_SUCCEEDED_FALLBACK_TEXT,
};
pub use view_model::{
    AppViewModel, DOCUMENT_READY_BANNER, PLACEHOLDER_NO_DOCUMENT, PLACEHOLDER_READY,
};
