//! Input history: a bounded, newest-first list of submitted commands with
//! cursor-based up/down navigation.

/// Ring of previously entered commands.
///
/// Entries are stored newest first. The cursor is `None` while the user is
/// typing fresh input and `Some(i)` while browsing; `up` moves toward the
/// oldest entry (clamped), `down` moves back toward fresh input.
#[derive(Debug)]
pub struct InputHistory {
    entries: Vec<String>,
    cursor: Option<usize>,
    capacity: usize,
}

impl InputHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
            capacity,
        }
    }

    /// Record a submitted command and reset the cursor.
    ///
    /// Consecutive identical submissions are stored once.
    pub fn submit(&mut self, cmd: &str) {
        if self.entries.first().is_none_or(|head| head != cmd) {
            self.entries.insert(0, cmd.to_string());
            self.entries.truncate(self.capacity);
        }
        self.cursor = None;
    }

    /// Move toward the oldest entry and return the entry at the cursor, or
    /// an empty string when there is no history.
    pub fn up(&mut self) -> String {
        if self.entries.is_empty() {
            return String::new();
        }
        let next = match self.cursor {
            None => 0,
            Some(i) => (i + 1).min(self.entries.len() - 1),
        };
        self.cursor = Some(next);
        self.entries[next].clone()
    }

    /// Move back toward fresh input; returns the entry at the cursor, or an
    /// empty string once the cursor leaves history.
    pub fn down(&mut self) -> String {
        match self.cursor {
            None | Some(0) => {
                self.cursor = None;
                String::new()
            },
            Some(i) => {
                self.cursor = Some(i - 1);
                self.entries[i - 1].clone()
            },
        }
    }

    /// Stop browsing without returning anything.
    pub fn reset_cursor(&mut self) {
        self.cursor = None;
    }

    /// Entries, newest first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for InputHistory {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_HISTORY_LIMIT)
    }
}
