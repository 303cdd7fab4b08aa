use ragchat_core::{AskOutcome, Effect, Msg, UploadOutcome};
use ragchat_engine::{EngineEvent, EngineHandle, ServiceError, UploadFile};
use ragchat_logging::{rc_info, rc_warn};

use super::ui::view_state::UiState;

/// Bridges core effects to the engine and engine completions back to messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn run(&self, effects: Vec<Effect>, ui: &mut UiState) {
        for effect in effects {
            match effect {
                Effect::CheckStatus => {
                    rc_info!("CheckStatus");
                    self.engine.check_status();
                }
                Effect::Upload { file } => {
                    rc_info!("Upload name={} len={}", file.name, file.bytes.len());
                    self.engine.upload(UploadFile {
                        name: file.name,
                        bytes: file.bytes,
                    });
                }
                Effect::Ask {
                    request_id,
                    question,
                } => {
                    rc_info!("Ask request_id={} question_len={}", request_id, question.len());
                    self.engine.ask(request_id, question);
                }
                Effect::ScrollToLatest => ui.scroll_to_latest(),
            }
        }
    }

    pub fn try_recv(&self) -> Option<Msg> {
        self.engine.try_recv().map(map_event)
    }

    #[cfg(test)]
    pub fn recv_timeout(&self, timeout: std::time::Duration) -> Option<Msg> {
        self.engine.recv_timeout(timeout).map(map_event)
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::StatusChecked(Ok(status)) => Msg::StatusReceived {
            has_document: status.has_document,
            supported_formats: status.supported_formats,
        },
        EngineEvent::StatusChecked(Err(err)) => Msg::StatusFailed {
            reason: err.to_string(),
        },
        EngineEvent::UploadCompleted(result) => Msg::UploadFinished(map_upload(result)),
        EngineEvent::AskCompleted { request_id, result } => Msg::AskFinished {
            request_id,
            outcome: map_ask(result),
        },
    }
}

fn map_upload(result: Result<ragchat_engine::UploadReceipt, ServiceError>) -> UploadOutcome {
    match result {
        Ok(receipt) => UploadOutcome::Succeeded {
            message: receipt.message,
        },
        Err(ServiceError::Rejected { status, detail }) => {
            rc_warn!("Upload rejected with http {}", status);
            UploadOutcome::Rejected { detail }
        }
        Err(err) => UploadOutcome::TransportFailed {
            reason: err.to_string(),
        },
    }
}

fn map_ask(result: Result<serde_json::Value, ServiceError>) -> AskOutcome {
    match result {
        Ok(answer) => AskOutcome::Answered(answer),
        Err(ServiceError::Rejected { status, detail }) => {
            rc_warn!("Ask rejected with http {}", status);
            AskOutcome::Rejected { detail }
        }
        Err(err) => AskOutcome::TransportFailed {
            reason: err.to_string(),
        },
    }
}
