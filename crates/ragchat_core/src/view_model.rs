use crate::{TranscriptEntry, UploadStatus};

pub const PLACEHOLDER_READY: &str = "Type your question...";
pub const PLACEHOLDER_NO_DOCUMENT: &str = "Upload a document first...";
pub const DOCUMENT_READY_BANNER: &str = "✅ Document ready. Ask your question below.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub document_available: bool,
    /// File extensions the service reported, empty until `/status` lists them.
    pub supported_formats: Vec<String>,
    pub selected_file_name: Option<String>,
    pub upload_status: Option<UploadStatus>,
    pub uploading: bool,
    /// Upload button: disabled while in flight or with no file selected.
    pub upload_enabled: bool,
    pub upload_label: &'static str,
    /// Question input: disabled until a document is available.
    pub input_enabled: bool,
    pub placeholder: &'static str,
    pub pending_question: String,
    /// Send button: disabled without a document or with a blank question.
    pub send_enabled: bool,
    pub transcript: Vec<TranscriptEntry>,
    /// Questions still waiting for their answer.
    pub awaiting_answers: usize,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn document_banner(&self) -> Option<&'static str> {
        self.document_available.then_some(DOCUMENT_READY_BANNER)
    }
}
