use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ragchat_core::{AppViewModel, Msg};

use super::constants::PAGE_LINES;
use super::view_state::Focus;

/// What a key press means for the app.
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    Dispatch(Msg),
    EditFilePath(String),
    SubmitFilePath,
    Focus(Focus),
    ScrollUp(usize),
    ScrollDown(usize),
    Quit,
    Ignore,
}

pub fn map_key(key: KeyEvent, focus: Focus, view: &AppViewModel, file_path: &str) -> InputAction {
    if key.kind == KeyEventKind::Release {
        return InputAction::Ignore;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => return InputAction::Quit,
        KeyCode::Char('c') if ctrl => return InputAction::Quit,
        // The shortcut bypasses the button so validation can report a missing file.
        KeyCode::Char('u') if ctrl => return InputAction::Dispatch(Msg::UploadClicked),
        KeyCode::Tab => return InputAction::Focus(focus.next()),
        KeyCode::BackTab => return InputAction::Focus(focus.prev()),
        KeyCode::PageUp => return InputAction::ScrollUp(PAGE_LINES),
        KeyCode::PageDown => return InputAction::ScrollDown(PAGE_LINES),
        _ => {}
    }

    match focus {
        Focus::FilePath => map_file_path_key(key, file_path),
        Focus::UploadButton => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') if view.upload_enabled => {
                InputAction::Dispatch(Msg::UploadClicked)
            }
            _ => InputAction::Ignore,
        },
        Focus::Question => map_question_key(key, view),
        Focus::SendButton => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') if view.send_enabled => {
                InputAction::Dispatch(Msg::SubmitClicked)
            }
            _ => InputAction::Ignore,
        },
        Focus::Transcript => match key.code {
            KeyCode::Up => InputAction::ScrollUp(1),
            KeyCode::Down => InputAction::ScrollDown(1),
            _ => InputAction::Ignore,
        },
    }
}

fn map_file_path_key(key: KeyEvent, file_path: &str) -> InputAction {
    match key.code {
        KeyCode::Enter => InputAction::SubmitFilePath,
        KeyCode::Backspace => {
            let mut path = file_path.to_owned();
            path.pop();
            InputAction::EditFilePath(path)
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            InputAction::EditFilePath(format!("{file_path}{ch}"))
        }
        _ => InputAction::Ignore,
    }
}

fn map_question_key(key: KeyEvent, view: &AppViewModel) -> InputAction {
    if !view.input_enabled {
        return InputAction::Ignore;
    }
    match key.code {
        KeyCode::Enter => {
            let newline_modifier = key
                .modifiers
                .intersects(KeyModifiers::SHIFT | KeyModifiers::ALT);
            InputAction::Dispatch(Msg::EnterPressed { newline_modifier })
        }
        KeyCode::Backspace => {
            let mut text = view.pending_question.clone();
            text.pop();
            InputAction::Dispatch(Msg::QuestionChanged(text))
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            InputAction::Dispatch(Msg::QuestionChanged(format!(
                "{}{ch}",
                view.pending_question
            )))
        }
        _ => InputAction::Ignore,
    }
}

/// Terminals deliver a dropped file as a pasted, possibly quoted, path.
pub fn clean_dropped_path(pasted: &str) -> String {
    let trimmed = pasted.trim();
    let unquoted = ['\'', '"']
        .iter()
        .find_map(|quote| {
            trimmed
                .strip_prefix(*quote)
                .and_then(|rest| rest.strip_suffix(*quote))
        })
        .unwrap_or(trimmed);
    unquoted.strip_prefix("file://").unwrap_or(unquoted).to_owned()
}
