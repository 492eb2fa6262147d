//! Calculator core: key-by-key expression entry and evaluation.
//!
//! This module provides functionality to:
//! - Hold the expression typed so far as tokens
//! - Evaluate it with operator precedence
//! - Format results for a fixed-width display
//! - Copy the display to the clipboard

mod buffer;
mod clipboard;
mod evaluation;
mod format;
mod keys;
mod session;
mod token;

pub use buffer::TokenBuffer;
pub use clipboard::{ClipboardError, copy_display};
pub use evaluation::{CalcResult, EvalError, evaluate};
pub use format::{MAX_DISPLAY_WIDTH, format_carried, format_display, round_to};
pub use keys::{KeyError, key_for, looks_like_key_script, parse_keys};
pub use session::{ERROR_MARKER, Key, Phase, Session};
pub use token::{Operator, Token};
