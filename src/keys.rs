use serde::{Deserialize, Serialize};
use std::fmt;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum SpecialKey {
    Space,
    Clear,
    Backspace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Letter(char),
    Special(SpecialKey),
}

pub const LETTER_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];

/// Row index of the special keys, below the three letter rows.
pub const SPECIAL_ROW: usize = 3;

pub const ROW_COUNT: usize = 4;

impl Key {
    pub const SPACE: Key = Key::Special(SpecialKey::Space);
    pub const CLEAR: Key = Key::Special(SpecialKey::Clear);
    pub const BACKSPACE: Key = Key::Special(SpecialKey::Backspace);

    /// Maps a typed character to the key that produces it.
    /// Letters are case-folded; a space maps to SPACE.
    pub fn for_char(c: char) -> Option<Key> {
        if c == ' ' {
            return Some(Key::SPACE);
        }
        let upper = c.to_ascii_uppercase();
        LETTER_ROWS
            .iter()
            .any(|row| row.contains(upper))
            .then_some(Key::Letter(upper))
    }

    pub fn label(&self) -> String {
        match self {
            Key::Letter(c) => c.to_string(),
            Key::Special(s) => s.to_string(),
        }
    }

    pub fn is_special(&self) -> bool {
        matches!(self, Key::Special(_))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl std::str::FromStr for Key {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(special) = s.parse::<SpecialKey>() {
            return Ok(Key::Special(special));
        }
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c != ' ' => {
                Key::for_char(c).ok_or_else(|| format!("'{}' is not on the keyboard", s))
            }
            _ => Err(format!("Unknown key '{}'", s)),
        }
    }
}

/// The logical layout, one entry per row, top to bottom.
pub fn logical_rows() -> Vec<Vec<Key>> {
    let mut rows: Vec<Vec<Key>> = LETTER_ROWS
        .iter()
        .map(|row| row.chars().map(Key::Letter).collect())
        .collect();
    rows.push(SpecialKey::iter().map(Key::Special).collect());
    rows
}

/// Widest letter row; drives the responsive key size.
pub fn max_row_keys() -> usize {
    LETTER_ROWS.iter().map(|r| r.len()).max().unwrap_or(1)
}
