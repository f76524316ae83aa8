/// Multi-line text buffer shared by the add and edit flows. `cursor` is a
/// byte offset that always sits on a char boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    value: String,
    cursor: usize,
}

impl InputBuffer {
    pub fn value(&self) -> &str {
        &self.value
    }

    #[cfg(test)]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    /// Replaces the content and parks the caret at the end.
    pub fn set(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor = self.value.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn move_left(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor = prev_boundary(self.cursor, &self.value);
    }

    pub fn move_right(&mut self) {
        if self.cursor >= self.value.len() {
            return;
        }
        self.cursor = next_boundary(self.cursor, &self.value);
    }

    pub fn move_up(&mut self) {
        let (line_starts, line_idx, col) = line_state(&self.value, self.cursor);
        if line_idx == 0 {
            return;
        }
        let target_start = line_starts[line_idx - 1];
        self.cursor = index_at_col(&self.value, target_start, col);
    }

    pub fn move_down(&mut self) {
        let (line_starts, line_idx, col) = line_state(&self.value, self.cursor);
        if line_idx + 1 >= line_starts.len() {
            return;
        }
        let target_start = line_starts[line_idx + 1];
        self.cursor = index_at_col(&self.value, target_start, col);
    }

    pub fn home(&mut self) {
        let (line_starts, line_idx, _) = line_state(&self.value, self.cursor);
        self.cursor = line_starts[line_idx];
    }

    pub fn end(&mut self) {
        let rest = &self.value[self.cursor..];
        self.cursor += rest.find('\n').unwrap_or(rest.len());
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev = prev_boundary(self.cursor, &self.value);
        self.value.drain(prev..self.cursor);
        self.cursor = prev;
    }

    pub fn delete(&mut self) {
        if self.cursor >= self.value.len() {
            return;
        }
        let next = next_boundary(self.cursor, &self.value);
        self.value.drain(self.cursor..next);
    }

    pub fn insert_char(&mut self, ch: char) {
        self.value.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    pub fn with_caret(&self) -> String {
        let mut text = self.value.clone();
        text.insert_str(self.cursor, "▌");
        text
    }
}

fn prev_boundary(cursor: usize, text: &str) -> usize {
    text[..cursor]
        .char_indices()
        .next_back()
        .map(|(idx, _)| idx)
        .unwrap_or(0)
}

fn next_boundary(cursor: usize, text: &str) -> usize {
    text[cursor..]
        .chars()
        .next()
        .map(|ch| cursor + ch.len_utf8())
        .unwrap_or(text.len())
}

/// Line start offsets, the line holding `cursor`, and the cursor's column in
/// chars.
fn line_state(text: &str, cursor: usize) -> (Vec<usize>, usize, usize) {
    let mut starts = vec![0];
    for (idx, ch) in text.char_indices() {
        if ch == '\n' {
            starts.push(idx + 1);
        }
    }
    let line_idx = starts
        .iter()
        .rposition(|start| *start <= cursor)
        .unwrap_or(0);
    let col = text[starts[line_idx]..cursor].chars().count();
    (starts, line_idx, col)
}

fn index_at_col(text: &str, start: usize, target_col: usize) -> usize {
    let slice = &text[start..];
    let limit = slice.find('\n').unwrap_or(slice.len());
    slice[..limit]
        .char_indices()
        .nth(target_col)
        .map(|(idx, _)| start + idx)
        .unwrap_or(start + limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(text: &str) -> InputBuffer {
        let mut buf = InputBuffer::default();
        buf.set(text);
        buf
    }

    fn typed(text: &str) -> InputBuffer {
        let mut buf = InputBuffer::default();
        for ch in text.chars() {
            buf.insert_char(ch);
        }
        buf
    }

    #[test]
    fn typing_appends_at_caret() {
        let buf = typed("milk");
        assert_eq!(buf.value(), "milk");
        assert_eq!(buf.cursor(), 4);
        assert_eq!(buf.with_caret(), "milk▌");
    }

    #[test]
    fn editing_in_the_middle() {
        let mut buf = typed("mlk");
        buf.move_left();
        buf.move_left();
        buf.insert_char('i');
        assert_eq!(buf.value(), "milk");
        buf.backspace();
        buf.backspace();
        assert_eq!(buf.value(), "lk");
        buf.backspace();
        assert_eq!(buf.value(), "lk");
        buf.delete();
        assert_eq!(buf.value(), "k");
    }

    #[test]
    fn multibyte_text_keeps_char_boundaries() {
        let mut buf = filled("할 일");
        buf.move_left();
        buf.backspace();
        assert_eq!(buf.value(), "할일");
        buf.move_left();
        buf.insert_char('!');
        assert_eq!(buf.value(), "!할일");
        buf.move_right();
        buf.move_right();
        buf.move_right();
        assert_eq!(buf.cursor(), buf.value().len());
    }

    #[test]
    fn vertical_moves_keep_column() {
        let mut buf = filled("abcd\nxy\nlonger");
        buf.move_up();
        assert_eq!(buf.cursor(), "abcd\n".len() + 2);
        buf.move_up();
        assert_eq!(buf.cursor(), 2);
        buf.move_up();
        assert_eq!(buf.cursor(), 2);
        buf.move_down();
        buf.move_down();
        assert_eq!(buf.cursor(), "abcd\nxy\n".len() + 2);
    }

    #[test]
    fn home_and_end_stay_on_the_line() {
        let mut buf = filled("one\ntwo");
        buf.move_up();
        buf.home();
        assert_eq!(buf.cursor(), 0);
        buf.end();
        assert_eq!(buf.cursor(), 3);
    }

    #[test]
    fn blank_detection_trims() {
        assert!(filled("  \n ").is_blank());
        assert!(!filled(" a ").is_blank());
        let mut buf = filled("x");
        buf.clear();
        assert!(buf.is_blank());
        assert_eq!(buf.cursor(), 0);
    }
}
