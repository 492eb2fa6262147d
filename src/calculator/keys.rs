//! Key scripts: a line of text standing in for keypad presses.
//!
//! Each character is one key. Digits, `.` and the operators map to their
//! keypad keys; `%` is percent, `=` evaluates, `c`/`C` clears and `<` is
//! backspace. Whitespace is ignored.

use super::session::Key;
use super::token::Operator;
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    /// Matches strings made only of keypad characters.
    static ref KEY_SCRIPT_CHARS: Regex = Regex::new(
        r"^[0-9\s\.\+\-−\*x×/÷%=cC<]+$"
    ).unwrap();
}

/// A character with no keypad equivalent.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown key {key:?} at position {position}")]
pub struct KeyError {
    pub key: char,
    pub position: usize,
}

/// Check whether `input` could be a key script.
///
/// A fast pre-check before [`parse_keys`]; blank input is rejected.
pub fn looks_like_key_script(input: &str) -> bool {
    let trimmed = input.trim();
    !trimmed.is_empty() && KEY_SCRIPT_CHARS.is_match(trimmed)
}

/// Map a single character to its key.
pub fn key_for(c: char) -> Option<Key> {
    match c {
        '0'..='9' => Some(Key::Digit(c)),
        '.' => Some(Key::Dot),
        '%' => Some(Key::Percent),
        '=' => Some(Key::Evaluate),
        '<' => Some(Key::Backspace),
        'c' | 'C' => Some(Key::Clear),
        c => Operator::from_char(c).map(Key::Operator),
    }
}

/// Parse a key script into key presses.
pub fn parse_keys(input: &str) -> Result<Vec<Key>, KeyError> {
    input
        .chars()
        .enumerate()
        .filter(|(_, c)| !c.is_whitespace())
        .map(|(position, key)| key_for(key).ok_or(KeyError { key, position }))
        .collect()
}
