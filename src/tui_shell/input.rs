/// Single-line editor used for the command line and the form fields.
///
/// `cursor` counts characters, not bytes.
#[derive(Debug, Default)]
pub(super) struct Input {
    pub(super) buf: String,
    pub(super) cursor: usize,
    history: Vec<String>,
    history_pos: Option<usize>,
}

impl Input {
    fn byte_at(&self, cursor: usize) -> usize {
        self.buf
            .char_indices()
            .nth(cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.buf.len())
    }

    fn char_len(&self) -> usize {
        self.buf.chars().count()
    }

    pub(super) fn clear(&mut self) {
        self.buf.clear();
        self.cursor = 0;
        self.history_pos = None;
    }

    pub(super) fn insert_char(&mut self, c: char) {
        let at = self.byte_at(self.cursor);
        self.buf.insert(at, c);
        self.cursor += 1;
    }

    pub(super) fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_at(self.cursor);
        self.buf.remove(at);
    }

    pub(super) fn delete(&mut self) {
        if self.cursor >= self.char_len() {
            return;
        }
        let at = self.byte_at(self.cursor);
        self.buf.remove(at);
    }

    pub(super) fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub(super) fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_len());
    }

    pub(super) fn set(&mut self, s: &str) {
        self.buf = s.to_string();
        self.cursor = self.char_len();
    }

    pub(super) fn push_history(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() || self.history.last().map(|s| s.as_str()) == Some(line) {
            return;
        }
        self.history.push(line.to_string());
        self.history_pos = None;
    }

    pub(super) fn history_up(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let next = match self.history_pos {
            None => self.history.len() - 1,
            Some(i) => i.saturating_sub(1),
        };
        self.history_pos = Some(next);
        let line = self.history[next].clone();
        self.set(&line);
    }

    pub(super) fn history_down(&mut self) {
        let Some(i) = self.history_pos else {
            return;
        };
        if i + 1 >= self.history.len() {
            self.clear();
            return;
        }
        self.history_pos = Some(i + 1);
        let line = self.history[i + 1].clone();
        self.set(&line);
    }
}

#[cfg(test)]
#[path = "../tests/tui_shell/input_tests.rs"]
mod tests;
