use ratatui::layout::{Constraint, Layout, Rect};

/// Screen regions, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub header: Rect,
    pub upload: Rect,
    pub status: Rect,
    pub transcript: Rect,
    pub input: Rect,
    pub hints: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::vertical([
            // Title line
            Constraint::Length(1),
            // Upload panel: path field, selected file, button row
            Constraint::Length(5),
            // Upload status and document banner
            Constraint::Length(2),
            // Transcript takes what is left
            Constraint::Min(3),
            // Question box
            Constraint::Length(5),
            // Key hints
            Constraint::Length(1),
        ])
        .split(area);

        Self {
            header: chunks[0],
            upload: chunks[1],
            status: chunks[2],
            transcript: chunks[3],
            input: chunks[4],
            hints: chunks[5],
        }
    }
}
