//! Calculation session: the state behind the calculator display.
//!
//! Every key press goes through one of the `on_*` handlers, which update the
//! buffer and flags and return the text the display should show.

use super::buffer::TokenBuffer;
use super::evaluation::CalcResult;
use super::format::{format_carried, format_display};
use super::token::Operator;
use tracing::{debug, trace};

/// Text shown after an evaluation fails.
pub const ERROR_MARKER: &str = "Error";

/// Whether a new expression is starting or one is being entered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// Nothing pending; the next digit starts a new number.
    #[default]
    Fresh,
    /// At least one key entered, or a carried result is in play.
    Building,
}

/// What the display currently shows.
#[derive(Clone, Debug, Default, PartialEq)]
enum Shown {
    /// The expression in the buffer.
    #[default]
    Expression,
    /// A formatted result, cut to display width.
    Result(String),
    Error,
}

/// A key on the calculator keypad.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Digit(char),
    Dot,
    Operator(Operator),
    Percent,
    Backspace,
    Evaluate,
    Clear,
}

/// State of one calculator.
#[derive(Clone, Debug, Default)]
pub struct Session {
    buffer: TokenBuffer,
    last_result: Option<f64>,
    phase: Phase,
    shown: Shown,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self) -> &TokenBuffer {
        &self.buffer
    }

    pub fn last_result(&self) -> Option<f64> {
        self.last_result
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The text the display shows right now.
    pub fn display(&self) -> String {
        match &self.shown {
            Shown::Result(text) => text.clone(),
            Shown::Error => ERROR_MARKER.to_string(),
            Shown::Expression if self.buffer.is_empty() => "0".to_string(),
            Shown::Expression => self.buffer.text(),
        }
    }

    /// The value the display stands for, if it is a single number.
    ///
    /// Used by currency conversion.
    pub fn current_value(&self) -> Option<f64> {
        match &self.shown {
            Shown::Error => None,
            _ if self.buffer.is_empty() => Some(0.0),
            _ if self.buffer.is_single_number() => self.buffer.current_number().parse().ok(),
            _ => None,
        }
    }

    /// Dispatch a key press.
    ///
    /// Returns the evaluation outcome when the key triggered one.
    pub fn press(&mut self, key: Key) -> Option<CalcResult> {
        trace!(?key, phase = ?self.phase, "key pressed");
        match key {
            Key::Digit(digit) => {
                self.on_digit(digit);
            }
            Key::Dot => {
                self.on_dot();
            }
            Key::Operator(op) => {
                self.on_operator(op);
            }
            Key::Percent => {
                self.on_percent();
            }
            Key::Backspace => {
                self.on_backspace();
            }
            Key::Clear => {
                self.on_clear();
            }
            Key::Evaluate => return self.on_evaluate(),
        }
        None
    }

    /// Seed an empty buffer with the carried result, if there is one.
    ///
    /// Shared by every handler that continues from a previous result.
    /// Operators continue from the full value; keys that edit the number
    /// start from the text the display would show.
    fn seed_from_carried(&mut self, full_precision: bool) {
        if self.buffer.is_empty()
            && let Some(value) = self.last_result
        {
            let text = if full_precision {
                format_carried(value)
            } else {
                format_display(value)
            };
            debug!(value, %text, "seeding expression with carried result");
            self.buffer.seed(text);
        }
    }

    /// Replace the buffer with a shown result's display text before editing it.
    fn edit_shown_result(&mut self) {
        if let Shown::Result(text) = &self.shown {
            let text = text.clone();
            self.buffer.seed(text);
            self.shown = Shown::Expression;
        }
    }

    /// Get the buffer ready for a digit or point.
    ///
    /// A fresh session drops a shown result or error so a new number starts.
    fn prepare_number_entry(&mut self) {
        if self.phase == Phase::Fresh && self.shown != Shown::Expression {
            self.buffer.reset();
            return;
        }

        self.edit_shown_result();
        if self.phase == Phase::Building {
            self.seed_from_carried(false);
        }
    }

    pub fn on_digit(&mut self, digit: char) -> String {
        if !digit.is_ascii_digit() {
            return self.display();
        }

        self.prepare_number_entry();
        if !self.buffer.push_digit(digit) {
            debug!(digit = %digit, "display full, digit dropped");
        }

        self.phase = Phase::Building;
        self.shown = Shown::Expression;
        self.display()
    }

    pub fn on_dot(&mut self) -> String {
        self.prepare_number_entry();
        if !self.buffer.push_dot() {
            debug!("decimal point rejected");
        }

        self.phase = Phase::Building;
        self.shown = Shown::Expression;
        self.display()
    }

    pub fn on_operator(&mut self, op: Operator) -> String {
        if self.phase == Phase::Fresh && self.last_result.is_none() {
            debug!(%op, "no operand yet, operator ignored");
            return self.display();
        }

        self.seed_from_carried(true);
        if self.buffer.push_operator(op) {
            self.phase = Phase::Building;
            self.shown = Shown::Expression;
        }
        self.display()
    }

    /// Replace the current single value with one hundredth of it.
    ///
    /// The buffer keeps the full value; only the display is cut to width.
    pub fn on_percent(&mut self) -> String {
        if self.shown == Shown::Error {
            return self.display();
        }

        self.seed_from_carried(true);
        let value = match self.current_value() {
            Some(value) if !self.buffer.is_empty() => value / 100.0,
            _ => return self.display(),
        };

        let shown = format_display(value);
        debug!(value, %shown, "applied percent");
        self.buffer.seed(format_carried(value));
        self.phase = Phase::Building;
        self.shown = Shown::Result(shown);
        self.display()
    }

    pub fn on_backspace(&mut self) -> String {
        if self.shown == Shown::Error {
            return self.display();
        }

        self.edit_shown_result();
        self.seed_from_carried(false);
        if let Some(removed) = self.buffer.pop_char() {
            trace!(%removed, "removed character");
        }

        if self.buffer.is_empty() && self.last_result.is_none() {
            self.phase = Phase::Fresh;
        }
        self.display()
    }

    /// Evaluate the pending expression.
    ///
    /// Returns `None` when there is nothing to evaluate: the session is
    /// fresh or the buffer is empty.
    pub fn on_evaluate(&mut self) -> Option<CalcResult> {
        if self.phase == Phase::Fresh || self.buffer.is_empty() {
            return None;
        }

        let result = CalcResult::from_tokens(self.buffer.text(), self.buffer.tokens());
        match &result {
            CalcResult::Success {
                expression,
                value,
                display_result,
            } => {
                debug!(expression = %expression, value, "evaluated");
                self.last_result = Some(*value);
                self.buffer.seed(format_carried(*value));
                self.shown = Shown::Result(display_result.clone());
            }
            CalcResult::Error { expression, error } => {
                debug!(expression = %expression, %error, "evaluation failed");
                self.last_result = None;
                self.buffer.reset();
                self.shown = Shown::Error;
            }
        }

        self.phase = Phase::Fresh;
        Some(result)
    }

    pub fn on_clear(&mut self) -> String {
        *self = Self::default();
        self.display()
    }
}
