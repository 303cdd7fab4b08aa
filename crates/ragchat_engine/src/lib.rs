//! Ragchat engine: HTTP client for the question-answering service and effect execution.
mod client;
mod engine;
mod settings;
mod types;

pub use client::{QaService, ReqwestQaClient};
pub use engine::EngineHandle;
pub use settings::{ServiceSettings, DEFAULT_SERVER_URL};
pub use types::{
    EngineEvent, RequestId, ServiceError, ServiceStatus, UploadFile, UploadReceipt,
};
