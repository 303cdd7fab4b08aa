use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use ragchat_core::{AppViewModel, EntryKind, TranscriptEntry};
use unicode_width::UnicodeWidthChar;

use super::constants::*;
use super::layout::AppLayout;
use super::view_state::{Focus, UiState};

const QUESTION_LABEL: &str = "You: ";
const ANSWER_LABEL: &str = "Bot: ";

pub fn render(frame: &mut Frame, view: &AppViewModel, ui: &mut UiState) {
    let layout = AppLayout::new(frame.area());

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(
                APP_TITLE,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(APP_SUBTITLE),
        ])),
        layout.header,
    );

    render_upload(frame, layout.upload, view, ui);
    render_status(frame, layout.status, view);
    render_transcript(frame, layout.transcript, view, ui);
    render_input(frame, layout.input, view, ui);

    frame.render_widget(
        Paragraph::new(KEY_HINTS).style(Style::default().fg(Color::DarkGray)),
        layout.hints,
    );
}

fn focus_border(focused: bool, enabled: bool) -> Style {
    match (focused, enabled) {
        (_, false) => Style::default().fg(Color::DarkGray),
        (true, true) => Style::default().fg(Color::Cyan),
        (false, true) => Style::default(),
    }
}

fn render_upload(frame: &mut Frame, area: Rect, view: &AppViewModel, ui: &UiState) {
    let path_focused = ui.focus == Focus::FilePath;
    let path_line = if ui.file_path.is_empty() && !path_focused {
        Line::styled(DROP_HINT, Style::default().fg(Color::DarkGray))
    } else {
        let cursor = if path_focused { "▏" } else { "" };
        Line::from(vec![
            Span::styled("Path: ", Style::default().fg(Color::Gray)),
            Span::raw(format!("{}{cursor}", ui.file_path)),
        ])
    };

    let selected_line = match &view.selected_file_name {
        Some(name) => Line::from(vec![
            Span::raw("Selected file: "),
            Span::styled(name.clone(), Style::default().add_modifier(Modifier::BOLD)),
        ]),
        None => Line::raw(""),
    };

    let button_style = if !view.upload_enabled {
        Style::default().fg(Color::DarkGray)
    } else if ui.focus == Focus::UploadButton {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let button_line = Line::from(vec![
        Span::styled(format!("[ {} ]", view.upload_label), button_style),
        Span::raw("  "),
        Span::styled(
            format_info(&view.supported_formats),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let block = Block::default()
        .title(UPLOAD_TITLE)
        .borders(Borders::ALL)
        .border_style(focus_border(
            matches!(ui.focus, Focus::FilePath | Focus::UploadButton),
            true,
        ));
    frame.render_widget(
        Paragraph::new(vec![path_line, selected_line, button_line]).block(block),
        area,
    );
}

fn format_info(formats: &[String]) -> String {
    if formats.is_empty() {
        FORMAT_INFO.to_string()
    } else {
        format!("Supported format: {}", formats.join(", "))
    }
}

fn render_status(frame: &mut Frame, area: Rect, view: &AppViewModel) {
    let mut lines = Vec::with_capacity(2);
    if let Some(status) = &view.upload_status {
        let color = if status.succeeded {
            Color::Green
        } else {
            Color::Red
        };
        lines.push(Line::styled(
            status.message.clone(),
            Style::default().fg(color),
        ));
    }
    if let Some(banner) = view.document_banner() {
        lines.push(Line::styled(banner, Style::default().fg(Color::Green)));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_transcript(frame: &mut Frame, area: Rect, view: &AppViewModel, ui: &mut UiState) {
    let inner_width = usize::from(area.width.saturating_sub(2));
    let inner_height = usize::from(area.height.saturating_sub(2));
    let lines = transcript_lines(&view.transcript, inner_width);

    // Scrolling happens after layout so the end-of-log marker is known.
    ui.settle_scroll(lines.len(), inner_height);

    let title = match view.awaiting_answers {
        0 => TRANSCRIPT_TITLE.to_string(),
        1 => format!("{TRANSCRIPT_TITLE}· waiting for 1 answer "),
        n => format!("{TRANSCRIPT_TITLE}· waiting for {n} answers "),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(focus_border(ui.focus == Focus::Transcript, true));

    let scroll = u16::try_from(ui.scroll).unwrap_or(u16::MAX);
    frame.render_widget(
        Paragraph::new(lines).block(block).scroll((scroll, 0)),
        area,
    );
}

fn render_input(frame: &mut Frame, area: Rect, view: &AppViewModel, ui: &UiState) {
    let focused = ui.focus == Focus::Question;
    let send_style = if !view.send_enabled {
        Style::default().fg(Color::DarkGray)
    } else if ui.focus == Focus::SendButton {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    };
    let block = Block::default()
        .title(INPUT_TITLE)
        .title_bottom(Line::styled(" [Send] ", send_style).alignment(Alignment::Right))
        .borders(Borders::ALL)
        .border_style(focus_border(
            focused || ui.focus == Focus::SendButton,
            view.input_enabled,
        ));

    let inner_width = usize::from(area.width.saturating_sub(2));
    let body: Vec<Line> = if view.pending_question.is_empty() {
        vec![Line::styled(
            view.placeholder,
            Style::default().fg(Color::DarkGray),
        )]
    } else {
        let cursor = if focused { "▏" } else { "" };
        let text = format!("{}{cursor}", view.pending_question);
        wrap_text(&text, inner_width)
            .into_iter()
            .map(Line::raw)
            .collect()
    };

    // Keep the end of a long question visible.
    let visible = usize::from(area.height.saturating_sub(2));
    let scroll = u16::try_from(body.len().saturating_sub(visible)).unwrap_or(u16::MAX);
    frame.render_widget(Paragraph::new(body).block(block).scroll((scroll, 0)), area);
}

fn transcript_lines(entries: &[TranscriptEntry], width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        if index > 0 {
            lines.push(Line::raw(""));
        }
        let (label, style) = match entry.kind() {
            EntryKind::Question => (
                QUESTION_LABEL,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            EntryKind::Answer => (ANSWER_LABEL, Style::default().fg(Color::Green)),
        };
        let body_width = width.saturating_sub(label.len());
        for (row, text) in wrap_text(entry.text(), body_width).into_iter().enumerate() {
            let prefix = if row == 0 {
                Span::styled(label, style)
            } else {
                Span::raw(" ".repeat(label.len()))
            };
            lines.push(Line::from(vec![prefix, Span::raw(text)]));
        }
    }
    lines
}

/// Hard-wraps text to `width` display columns, honouring embedded newlines.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    for raw_line in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0;
        for ch in raw_line.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if current_width + ch_width > width && !current.is_empty() {
                rows.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push(ch);
            current_width += ch_width;
        }
        rows.push(current);
    }
    rows
}
