use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// The root view was shown for the first time.
    Mounted,
    /// `GET /status` answered.
    StatusReceived {
        has_document: bool,
        supported_formats: Vec<String>,
    },
    /// `GET /status` failed; soft failure.
    StatusFailed { reason: String },
    /// User picked (or dropped) a file.
    FileSelected(crate::SelectedFile),
    /// The platform could not read the file the user pointed at.
    FileSelectionFailed { path: String, reason: String },
    /// User clicked Upload.
    UploadClicked,
    /// Upload request settled.
    UploadFinished(UploadOutcome),
    /// User edited the question input.
    QuestionChanged(String),
    /// User clicked Send.
    SubmitClicked,
    /// Enter pressed in the question input. With the modifier held it inserts a newline.
    EnterPressed { newline_modifier: bool },
    /// Ask request settled.
    AskFinished {
        request_id: crate::RequestId,
        outcome: AskOutcome,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// 2xx with `success: true`.
    Succeeded { message: Option<String> },
    /// Non-2xx, or 2xx with `success: false`.
    Rejected { detail: Option<String> },
    /// Network failure or undecodable body.
    TransportFailed { reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum AskOutcome {
    /// The `answer` field of a 2xx response (`null` when absent).
    Answered(Value),
    /// Non-2xx response.
    Rejected { detail: Option<String> },
    /// Network failure or undecodable body.
    TransportFailed { reason: String },
}
