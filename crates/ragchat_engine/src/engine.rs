use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use ragchat_logging::{rc_debug, rc_warn};

use crate::client::{QaService, ReqwestQaClient};
use crate::{EngineEvent, RequestId, ServiceError, ServiceSettings, UploadFile};

enum EngineCommand {
    CheckStatus,
    Upload { file: UploadFile },
    Ask { request_id: RequestId, question: String },
}

/// Runs service calls on a background tokio runtime and reports completions.
///
/// Every command is spawned as its own task, so completions arrive in whatever
/// order the requests finish. Nothing is cancelled once issued.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ServiceSettings) -> Result<Self, ServiceError> {
        let client = ReqwestQaClient::new(settings)?;
        Ok(Self::with_service(Arc::new(client)))
    }

    pub fn with_service(service: Arc<dyn QaService>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let service = service.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(service.as_ref(), command, event_tx).await;
                });
            }
            // Let requests already in flight deliver their completions.
            runtime.shutdown_timeout(Duration::from_secs(1));
        });

        Self { cmd_tx, event_rx }
    }

    pub fn check_status(&self) {
        self.send(EngineCommand::CheckStatus);
    }

    pub fn upload(&self, file: UploadFile) {
        self.send(EngineCommand::Upload { file });
    }

    pub fn ask(&self, request_id: RequestId, question: impl Into<String>) {
        self.send(EngineCommand::Ask {
            request_id,
            question: question.into(),
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            rc_warn!("Engine thread is gone; dropping command");
        }
    }
}

async fn handle_command(
    service: &dyn QaService,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::CheckStatus => EngineEvent::StatusChecked(service.status().await),
        EngineCommand::Upload { file } => EngineEvent::UploadCompleted(service.upload(file).await),
        EngineCommand::Ask {
            request_id,
            question,
        } => {
            let result = service.ask(&question).await;
            rc_debug!("Ask request_id={} settled ok={}", request_id, result.is_ok());
            EngineEvent::AskCompleted { request_id, result }
        }
    };
    let _ = event_tx.send(event);
}
