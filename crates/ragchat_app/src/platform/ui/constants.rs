use std::time::Duration;

pub const APP_TITLE: &str = " 🧠 RAG QA Bot ";
pub const APP_SUBTITLE: &str = "Your personalized document assistant";
pub const UPLOAD_TITLE: &str = " 📁 Upload .txt Document ";
pub const DROP_HINT: &str = "📄 Type or drop your .txt file path here, then press Enter";
pub const FORMAT_INFO: &str = "Supported format: .txt";
pub const TRANSCRIPT_TITLE: &str = " Conversation ";
pub const INPUT_TITLE: &str = " Question ";
pub const KEY_HINTS: &str =
    "Tab focus · Enter send/activate · Shift/Alt+Enter newline · Ctrl+U upload · PgUp/PgDn scroll · Esc quit";

/// How long the loop waits for terminal input before draining engine events.
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);
pub const PAGE_LINES: usize = 10;
