use crate::keys::{Key, SpecialKey};
use serde::{Deserialize, Serialize};

/// What applying a key did to the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edit {
    Inserted(char),
    Deleted(char),
    Cleared,
    /// Backspace on an empty buffer.
    Unchanged,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBuffer {
    text: String,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn append(&mut self, c: char) {
        self.text.push(c);
    }

    pub fn space(&mut self) {
        self.text.push(' ');
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn backspace(&mut self) -> Option<char> {
        self.text.pop()
    }

    pub fn apply(&mut self, key: Key) -> Edit {
        match key {
            Key::Letter(c) => {
                self.append(c);
                Edit::Inserted(c)
            }
            Key::Special(SpecialKey::Space) => {
                self.space();
                Edit::Inserted(' ')
            }
            Key::Special(SpecialKey::Clear) => {
                self.clear();
                Edit::Cleared
            }
            Key::Special(SpecialKey::Backspace) => match self.backspace() {
                Some(c) => Edit::Deleted(c),
                None => Edit::Unchanged,
            },
        }
    }

    /// Trailing window of at most `max_chars` characters for display.
    /// Truncated text is prefixed with `...`, which counts toward the width.
    pub fn display_tail(&self, max_chars: usize) -> String {
        let count = self.char_count();
        if count <= max_chars {
            return self.text.clone();
        }
        let keep = max_chars.saturating_sub(3);
        let tail: String = self.text.chars().skip(count - keep).collect();
        format!("...{}", tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_tail_truncates_without_mutating() {
        let mut buf = TextBuffer::new();
        for c in "HELLOWORLD".chars() {
            buf.append(c);
        }
        assert_eq!(buf.display_tail(20), "HELLOWORLD");
        assert_eq!(buf.display_tail(7), "...ORLD");
        assert_eq!(buf.as_str(), "HELLOWORLD");
    }

    #[test]
    fn test_display_tail_tiny_width() {
        let mut buf = TextBuffer::new();
        buf.append('A');
        buf.append('B');
        assert_eq!(buf.display_tail(1), "...");
    }
}
