use std::collections::BTreeSet;
use std::fmt;

use crate::view_model::{AppViewModel, PLACEHOLDER_NO_DOCUMENT, PLACEHOLDER_READY};
use crate::{Transcript, TranscriptEntry};

pub type RequestId = u64;

/// A file chosen by the user, held until it is uploaded or replaced.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

// Contents can be large; keep them out of debug output and logs.
impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Outcome of the most recent upload attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadStatus {
    pub succeeded: bool,
    pub message: String,
}

impl UploadStatus {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            succeeded: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    document_available: bool,
    supported_formats: Vec<String>,
    selected_file: Option<SelectedFile>,
    upload_status: Option<UploadStatus>,
    uploading: bool,
    transcript: Transcript,
    pending_question: String,
    awaiting_answers: BTreeSet<RequestId>,
    next_request_id: RequestId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let has_question = !self.pending_question.trim().is_empty();
        AppViewModel {
            document_available: self.document_available,
            supported_formats: self.supported_formats.clone(),
            selected_file_name: self.selected_file.as_ref().map(|file| file.name.clone()),
            upload_status: self.upload_status.clone(),
            uploading: self.uploading,
            upload_enabled: !self.uploading && self.selected_file.is_some(),
            upload_label: if self.uploading { "Uploading..." } else { "Upload" },
            input_enabled: self.document_available,
            placeholder: if self.document_available {
                PLACEHOLDER_READY
            } else {
                PLACEHOLDER_NO_DOCUMENT
            },
            pending_question: self.pending_question.clone(),
            send_enabled: self.document_available && has_question,
            transcript: self.transcript.entries().to_vec(),
            awaiting_answers: self.awaiting_answers.len(),
            dirty: self.dirty,
        }
    }

    pub fn document_available(&self) -> bool {
        self.document_available
    }

    pub fn supported_formats(&self) -> &[String] {
        &self.supported_formats
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected_file.as_ref()
    }

    pub fn upload_status(&self) -> Option<&UploadStatus> {
        self.upload_status.as_ref()
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn pending_question(&self) -> &str {
        &self.pending_question
    }

    /// Returns whether the state changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_document_available(&mut self, available: bool) {
        if self.document_available != available {
            self.document_available = available;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_supported_formats(&mut self, formats: Vec<String>) {
        if self.supported_formats != formats {
            self.supported_formats = formats;
            self.mark_dirty();
        }
    }

    pub(crate) fn select_file(&mut self, file: SelectedFile) {
        self.selected_file = Some(file);
        self.upload_status = None;
        self.mark_dirty();
    }

    pub(crate) fn clear_selected_file(&mut self) {
        self.selected_file = None;
        self.mark_dirty();
    }

    pub(crate) fn set_upload_status(&mut self, status: UploadStatus) {
        self.upload_status = Some(status);
        self.mark_dirty();
    }

    pub(crate) fn set_uploading(&mut self, uploading: bool) {
        self.uploading = uploading;
        self.mark_dirty();
    }

    pub(crate) fn set_pending_question(&mut self, text: String) {
        if self.pending_question != text {
            self.pending_question = text;
            self.mark_dirty();
        }
    }

    pub(crate) fn take_pending_question(&mut self) -> String {
        self.mark_dirty();
        std::mem::take(&mut self.pending_question)
    }

    pub(crate) fn append_entry(&mut self, entry: TranscriptEntry) {
        self.transcript.append(entry);
        self.mark_dirty();
    }

    /// Registers a new outstanding ask and returns its id.
    pub(crate) fn begin_ask(&mut self) -> RequestId {
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.awaiting_answers.insert(request_id);
        request_id
    }

    /// Returns `false` if the request was unknown or already answered.
    pub(crate) fn settle_ask(&mut self, request_id: RequestId) -> bool {
        self.awaiting_answers.remove(&request_id)
    }
}
