use std::fmt;

use serde::Deserialize;
use serde_json::Value;

pub type RequestId = u64;

/// Body of `GET /status`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceStatus {
    #[serde(default)]
    pub has_document: bool,
    #[serde(default)]
    pub supported_formats: Vec<String>,
}

/// Body of a successful `POST /upload`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    pub message: Option<String>,
}

/// File contents handed to the engine for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadFile")
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    StatusChecked(Result<ServiceStatus, ServiceError>),
    UploadCompleted(Result<UploadReceipt, ServiceError>),
    AskCompleted {
        request_id: RequestId,
        result: Result<Value, ServiceError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error("invalid service url: {0}")]
    InvalidUrl(String),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("malformed response body: {0}")]
    Decode(String),
    #[error("service rejected request (http {status})")]
    Rejected { status: u16, detail: Option<String> },
}

impl ServiceError {
    /// Service-provided failure text, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ServiceError::Rejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}
