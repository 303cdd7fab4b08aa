use std::path::Path;

use anyhow::Context;
use crossterm::event::{self, Event};
use log::LevelFilter;
use ragchat_core::{update, AppState, AppViewModel, Msg, SelectedFile};
use ragchat_engine::EngineHandle;
use ragchat_logging::{rc_error, rc_info, rc_warn};

use super::config::{load_config, ClientConfig, CONFIG_FILENAME};
use super::effects::EffectRunner;
use super::terminal::{install_panic_hook, restore_terminal, setup_terminal, Tui};
use super::ui;
use super::ui::input::{clean_dropped_path, map_key, InputAction};
use super::ui::view_state::{Focus, UiState};

pub fn run_app() -> anyhow::Result<()> {
    let loaded = load_config(Path::new(CONFIG_FILENAME));
    let config = loaded.as_ref().cloned().unwrap_or_default();
    if let Err(err) = ragchat_logging::initialize(&config.log_file, LevelFilter::Info) {
        eprintln!("ragchat: file logging disabled: {err}");
    }
    if let Err(err) = &loaded {
        rc_warn!("Using default config: {}", err);
    }
    rc_info!("ragchat starting, server={}", config.server_url);

    let engine = start_engine(&config)?;
    let mut app = App::new(EffectRunner::new(engine));

    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let result = app.run(&mut terminal);
    drop(terminal);
    finish(result, restore_terminal())
}

/// Combines the loop result with the terminal restore result. The loop error
/// wins; a restore failure is attached as context.
fn finish(run: anyhow::Result<()>, restore: anyhow::Result<()>) -> anyhow::Result<()> {
    if let Err(err) = &run {
        rc_error!("ragchat stopped with error: {:#}", err);
    }
    match (run, restore) {
        (Ok(()), restore) => restore,
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(restore_err)) => {
            rc_error!("terminal restore also failed: {:#}", restore_err);
            Err(err.context(format!("terminal restore also failed: {restore_err:#}")))
        }
    }
}

fn start_engine(config: &ClientConfig) -> anyhow::Result<EngineHandle> {
    let settings = config
        .service_settings()
        .with_context(|| format!("invalid server_url {:?}", config.server_url))?;
    EngineHandle::new(settings).context("failed to create HTTP client")
}

/// Owns all session state. Only this struct calls `update`, one message at a time.
struct App {
    state: AppState,
    view: AppViewModel,
    ui: UiState,
    effects: EffectRunner,
}

impl App {
    fn new(effects: EffectRunner) -> Self {
        let state = AppState::new();
        let view = state.view();
        Self {
            state,
            view,
            ui: UiState::default(),
            effects,
        }
    }

    fn run(&mut self, terminal: &mut Tui) -> anyhow::Result<()> {
        self.dispatch(Msg::Mounted);

        while !self.ui.quit {
            terminal.draw(|frame| ui::render::render(frame, &self.view, &mut self.ui))?;

            if event::poll(ui::constants::POLL_INTERVAL)? {
                self.handle_terminal_event(event::read()?);
            }
            self.drain_engine();
        }

        rc_info!("ragchat exiting");
        Ok(())
    }

    fn drain_engine(&mut self) {
        while let Some(msg) = self.effects.try_recv() {
            self.dispatch(msg);
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            self.view = state.view();
        }
        self.state = state;
        self.effects.run(effects, &mut self.ui);
    }

    fn handle_terminal_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                let action = map_key(key, self.ui.focus, &self.view, &self.ui.file_path);
                self.apply(action);
            }
            Event::Paste(text) => self.handle_paste(&text),
            _ => {}
        }
    }

    fn apply(&mut self, action: InputAction) {
        match action {
            InputAction::Dispatch(msg) => self.dispatch(msg),
            InputAction::EditFilePath(path) => self.ui.file_path = path,
            InputAction::SubmitFilePath => self.select_path(),
            InputAction::Focus(focus) => self.ui.focus = focus,
            InputAction::ScrollUp(lines) => self.ui.scroll_up(lines),
            InputAction::ScrollDown(lines) => self.ui.scroll_down(lines),
            InputAction::Quit => self.ui.quit = true,
            InputAction::Ignore => {}
        }
    }

    /// A paste outside the question box is treated as a dropped file.
    fn handle_paste(&mut self, text: &str) {
        if self.ui.focus == Focus::Question {
            if self.view.input_enabled {
                let combined = format!("{}{}", self.view.pending_question, text);
                self.dispatch(Msg::QuestionChanged(combined));
            }
            return;
        }
        self.ui.file_path = clean_dropped_path(text);
        self.select_path();
    }

    fn select_path(&mut self) {
        let path = self.ui.file_path.trim().to_owned();
        if path.is_empty() {
            return;
        }
        let msg = read_selected_file(Path::new(&path));
        if matches!(msg, Msg::FileSelected(_)) {
            self.ui.focus = Focus::UploadButton;
        }
        self.dispatch(msg);
    }
}

fn read_selected_file(path: &Path) -> Msg {
    match std::fs::read(path) {
        Ok(bytes) => {
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            Msg::FileSelected(SelectedFile::new(name, bytes))
        }
        Err(err) => Msg::FileSelectionFailed {
            path: path.display().to_string(),
            reason: err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use crossterm::event::{KeyCode, KeyEvent};
    use ragchat_core::{EntryKind, TranscriptEntry};
    use ragchat_engine::{QaService, ServiceError, ServiceStatus, UploadFile, UploadReceipt};
    use serde_json::{json, Value};

    use super::*;

    /// In-memory stand-in for the remote service.
    #[derive(Default)]
    struct FakeService {
        has_document: Mutex<bool>,
        questions: Mutex<Vec<String>>,
    }

    #[async_trait::async_trait]
    impl QaService for FakeService {
        async fn status(&self) -> Result<ServiceStatus, ServiceError> {
            Ok(ServiceStatus {
                has_document: *self.has_document.lock().unwrap(),
                supported_formats: vec![".txt".to_string()],
            })
        }

        async fn upload(&self, file: UploadFile) -> Result<UploadReceipt, ServiceError> {
            if file.bytes.is_empty() {
                return Err(ServiceError::Rejected {
                    status: 400,
                    detail: Some("Uploaded file is empty".to_string()),
                });
            }
            *self.has_document.lock().unwrap() = true;
            Ok(UploadReceipt {
                message: Some("Indexed 10 chunks".to_string()),
            })
        }

        async fn ask(&self, question: &str) -> Result<Value, ServiceError> {
            self.questions.lock().unwrap().push(question.to_string());
            if question.contains("offline") {
                return Err(ServiceError::Transport("connection reset".to_string()));
            }
            Ok(json!({"query": question, "result": "March 3rd"}))
        }
    }

    fn app_with(service: Arc<FakeService>) -> App {
        App::new(EffectRunner::new(EngineHandle::with_service(service)))
    }

    /// Waits for one engine completion and dispatches it.
    fn settle(app: &mut App) {
        let msg = app
            .effects
            .recv_timeout(Duration::from_secs(5))
            .expect("engine completion");
        app.dispatch(msg);
    }

    #[test]
    fn mount_queries_status_and_keeps_input_disabled() {
        let mut app = app_with(Arc::new(FakeService::default()));
        app.dispatch(Msg::Mounted);
        settle(&mut app);

        assert!(!app.view.input_enabled);
        assert_eq!(app.view.placeholder, ragchat_core::PLACEHOLDER_NO_DOCUMENT);
    }

    #[test]
    fn select_upload_and_ask_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "The deadline is March 3rd.").unwrap();

        let service = Arc::new(FakeService::default());
        let mut app = app_with(service.clone());
        app.dispatch(Msg::Mounted);
        settle(&mut app);

        app.handle_terminal_event(Event::Paste(format!("'{}'", path.display())));
        assert_eq!(app.view.selected_file_name.as_deref(), Some("notes.txt"));
        assert_eq!(app.ui.focus, Focus::UploadButton);

        app.dispatch(Msg::UploadClicked);
        assert!(app.view.uploading);
        settle(&mut app);
        assert!(!app.view.uploading);
        assert!(app.view.input_enabled);
        assert_eq!(app.view.selected_file_name, None);
        assert_eq!(
            app.view.upload_status.as_ref().map(|s| s.message.as_str()),
            Some("Indexed 10 chunks")
        );

        app.ui.focus = Focus::Question;
        app.handle_terminal_event(Event::Paste("What is the deadline?".to_string()));
        app.ui.scroll_up(3);
        app.dispatch(Msg::EnterPressed {
            newline_modifier: false,
        });
        assert!(app.ui.follow_latest);
        assert_eq!(app.view.pending_question, "");
        assert_eq!(
            app.view.transcript,
            vec![TranscriptEntry::question("What is the deadline?")]
        );

        settle(&mut app);
        assert_eq!(
            app.view.transcript,
            vec![
                TranscriptEntry::question("What is the deadline?"),
                TranscriptEntry::answer("March 3rd"),
            ]
        );
        assert_eq!(
            *service.questions.lock().unwrap(),
            vec!["What is the deadline?".to_string()]
        );
    }

    #[test]
    fn transport_failure_becomes_answer_text() {
        let service = Arc::new(FakeService::default());
        *service.has_document.lock().unwrap() = true;
        let mut app = app_with(service);
        app.dispatch(Msg::Mounted);
        settle(&mut app);

        app.dispatch(Msg::QuestionChanged("are you offline?".to_string()));
        app.dispatch(Msg::SubmitClicked);
        settle(&mut app);

        let last = app.view.transcript.last().expect("answer");
        assert_eq!(last.kind(), EntryKind::Answer);
        assert_eq!(last.text(), ragchat_core::ASK_FAILED_TEXT);
    }

    #[test]
    fn empty_file_upload_shows_service_detail() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        std::fs::write(&path, "").unwrap();

        let mut app = app_with(Arc::new(FakeService::default()));
        app.ui.file_path = path.display().to_string();
        app.apply(InputAction::SubmitFilePath);
        app.dispatch(Msg::UploadClicked);
        settle(&mut app);

        let status = app.view.upload_status.as_ref().expect("status");
        assert!(!status.succeeded);
        assert_eq!(status.message, "Uploaded file is empty");
        assert!(app.view.upload_enabled);
    }

    #[test]
    fn send_button_asks_pending_question() {
        let service = Arc::new(FakeService::default());
        *service.has_document.lock().unwrap() = true;
        let mut app = app_with(service.clone());
        app.dispatch(Msg::Mounted);
        settle(&mut app);

        app.ui.focus = Focus::Question;
        app.handle_terminal_event(Event::Paste("When is it due?".to_string()));
        app.handle_terminal_event(Event::Key(KeyEvent::from(KeyCode::Tab)));
        assert_eq!(app.ui.focus, Focus::SendButton);

        app.handle_terminal_event(Event::Key(KeyEvent::from(KeyCode::Enter)));
        assert_eq!(
            app.view.transcript,
            vec![TranscriptEntry::question("When is it due?")]
        );
        settle(&mut app);
        assert_eq!(app.view.transcript.len(), 2);
        assert_eq!(
            *service.questions.lock().unwrap(),
            vec!["When is it due?".to_string()]
        );
    }

    #[test]
    fn loop_error_survives_restore_failure() {
        let err = finish(
            Err(anyhow::anyhow!("event stream closed")),
            Err(anyhow::anyhow!("failed to leave alternate screen")),
        )
        .unwrap_err();
        let chain = format!("{err:#}");
        assert!(chain.contains("event stream closed"));
        assert!(chain.contains("failed to leave alternate screen"));

        let err = finish(Ok(()), Err(anyhow::anyhow!("failed to disable raw mode"))).unwrap_err();
        assert_eq!(err.to_string(), "failed to disable raw mode");
        assert!(finish(Ok(()), Ok(())).is_ok());
    }

    #[test]
    fn missing_file_reports_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let msg = read_selected_file(&dir.path().join("nope.txt"));
        assert!(matches!(msg, Msg::FileSelectionFailed { .. }));
    }
}
