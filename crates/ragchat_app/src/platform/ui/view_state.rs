//! Presentation-only state: focus, the file path field and transcript scrolling.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    FilePath,
    UploadButton,
    Question,
    SendButton,
    Transcript,
}

impl Focus {
    const ORDER: [Focus; 5] = [
        Focus::FilePath,
        Focus::UploadButton,
        Focus::Question,
        Focus::SendButton,
        Focus::Transcript,
    ];

    pub fn next(self) -> Self {
        let index = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(index + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let index = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(index + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    pub focus: Focus,
    pub file_path: String,
    /// First visible transcript line.
    pub scroll: usize,
    /// Largest valid `scroll` as of the last render.
    pub max_scroll: usize,
    /// Pin the viewport to the end-of-log marker on the next render.
    pub follow_latest: bool,
    pub quit: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            focus: Focus::FilePath,
            file_path: String::new(),
            scroll: 0,
            max_scroll: 0,
            follow_latest: true,
            quit: false,
        }
    }
}

impl UiState {
    pub fn scroll_to_latest(&mut self) {
        self.follow_latest = true;
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.follow_latest = false;
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll = (self.scroll + lines).min(self.max_scroll);
        if self.scroll >= self.max_scroll {
            self.follow_latest = true;
        }
    }

    /// Called by the renderer once the transcript height is known.
    pub fn settle_scroll(&mut self, total_lines: usize, viewport_lines: usize) {
        self.max_scroll = total_lines.saturating_sub(viewport_lines);
        self.scroll = if self.follow_latest {
            self.max_scroll
        } else {
            self.scroll.min(self.max_scroll)
        };
    }
}
