use crate::{RequestId, SelectedFile};

/// IO requested by [`crate::update`]; executed by the app, never by the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Query `GET /status` for document availability.
    CheckStatus,
    /// Send the file to `POST /upload`.
    Upload { file: SelectedFile },
    /// Send the question to `POST /ask`.
    Ask {
        request_id: RequestId,
        question: String,
    },
    /// Move the transcript viewport to the end-of-log marker after the next render.
    ScrollToLatest,
}
