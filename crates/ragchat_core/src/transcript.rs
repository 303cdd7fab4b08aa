#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Question,
    Answer,
}

/// One transcript bubble. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    kind: EntryKind,
    text: String,
}

impl TranscriptEntry {
    pub fn question(text: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Question,
            text: text.into(),
        }
    }

    pub fn answer(text: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Answer,
            text: text.into(),
        }
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Append-only conversation log. Order of entries is append order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn append(&mut self, entry: TranscriptEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
