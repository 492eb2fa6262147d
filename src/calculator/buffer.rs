//! The expression typed so far, kept as a sequence of tokens.

use super::format::MAX_DISPLAY_WIDTH;
use super::token::{Operator, Token};

/// Ordered tokens of the expression being entered.
///
/// Only grows or shrinks at the end. Never holds two operators in a row and
/// never starts with an operator.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TokenBuffer {
    tokens: Vec<Token>,
}

impl TokenBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The composite display text, e.g. `12+3.5×`.
    pub fn text(&self) -> String {
        self.tokens.iter().map(Token::to_string).collect()
    }

    /// Replace the contents with a single literal.
    pub fn seed(&mut self, text: impl Into<String>) {
        self.tokens.clear();
        self.tokens.push(Token::Literal(text.into()));
    }

    pub fn reset(&mut self) {
        self.tokens.clear();
    }

    /// Tokens of the number at the end of the buffer (after the last operator).
    fn trailing_number(&self) -> &[Token] {
        let start = self
            .tokens
            .iter()
            .rposition(Token::is_operator)
            .map_or(0, |i| i + 1);
        &self.tokens[start..]
    }

    /// Text of the number currently being entered.
    pub fn current_number(&self) -> String {
        self.trailing_number().iter().map(Token::to_string).collect()
    }

    /// Whether the number currently being entered already has a decimal point.
    pub fn dot_used(&self) -> bool {
        self.trailing_number().iter().any(|t| match t {
            Token::Dot => true,
            Token::Literal(text) => text.contains('.'),
            Token::Operator(_) => false,
        })
    }

    /// Whether the buffer holds a single number and no operator.
    pub fn is_single_number(&self) -> bool {
        !self.tokens.is_empty() && !self.tokens.iter().any(Token::is_operator)
    }

    fn current_width(&self) -> usize {
        self.trailing_number().iter().map(Token::width).sum()
    }

    /// Append one digit to the current number.
    ///
    /// Returns `false` when the digit was dropped because the number is
    /// already as wide as the display allows.
    pub fn push_digit(&mut self, digit: char) -> bool {
        debug_assert!(digit.is_ascii_digit());

        if self.current_width() >= MAX_DISPLAY_WIDTH {
            return false;
        }

        // A lone zero is replaced rather than extended
        let lone_zero = matches!(self.trailing_number(), [Token::Literal(text)] if text == "0");
        if lone_zero {
            self.tokens.pop();
        }

        match self.tokens.last_mut() {
            Some(Token::Literal(text)) => text.push(digit),
            _ => self.tokens.push(Token::Literal(digit.to_string())),
        }
        true
    }

    /// Append a decimal point to the current number.
    ///
    /// A point on an empty number enters `0.`. Returns `false` when the
    /// number already has a point or no room is left.
    pub fn push_dot(&mut self) -> bool {
        if self.dot_used() {
            return false;
        }

        let width = self.current_width();
        let needs_zero = width == 0;
        let needed = if needs_zero { 2 } else { 1 };
        if width + needed > MAX_DISPLAY_WIDTH {
            return false;
        }

        if needs_zero {
            self.tokens.push(Token::Literal("0".to_string()));
        }
        self.tokens.push(Token::Dot);
        true
    }

    /// Append an operator after the current number.
    ///
    /// An operator typed right after another one replaces it. Returns `false`
    /// when there is no operand to attach to.
    pub fn push_operator(&mut self, op: Operator) -> bool {
        match self.tokens.last_mut() {
            None => false,
            Some(Token::Operator(previous)) => {
                *previous = op;
                true
            }
            Some(_) => {
                self.tokens.push(Token::Operator(op));
                true
            }
        }
    }

    /// Remove the last displayed character.
    ///
    /// Multi-character literals lose their trailing character; a token whose
    /// text would become empty is dropped entirely.
    pub fn pop_char(&mut self) -> Option<char> {
        let last = self.tokens.last_mut()?;

        if let Token::Literal(text) = last
            && text.chars().count() > 1
        {
            return text.pop();
        }

        self.tokens.pop().and_then(|token| match token {
            Token::Literal(text) => text.chars().next(),
            Token::Dot => Some('.'),
            Token::Operator(op) => Some(op.symbol()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(keys: &str) -> TokenBuffer {
        let mut buffer = TokenBuffer::new();
        for c in keys.chars() {
            if c == '.' {
                buffer.push_dot();
            } else if let Some(op) = Operator::from_char(c) {
                buffer.push_operator(op);
            } else {
                buffer.push_digit(c);
            }
        }
        buffer
    }

    #[test]
    fn test_digits_merge_into_one_literal() {
        let buffer = typed("123");
        assert_eq!(buffer.tokens(), &[Token::Literal("123".into())]);
        assert_eq!(buffer.text(), "123");
    }

    #[test]
    fn test_width_limit_drops_extra_digits() {
        let mut buffer = typed("123456789");
        assert!(!buffer.push_digit('0'));
        assert_eq!(buffer.text(), "123456789");

        // The limit applies per number, not to the whole expression
        assert!(buffer.push_operator(Operator::Add));
        assert!(buffer.push_digit('1'));
        assert_eq!(buffer.text(), "123456789+1");
    }

    #[test]
    fn test_second_dot_rejected() {
        let mut buffer = typed("1.5");
        assert!(buffer.dot_used());
        assert!(!buffer.push_dot());
        assert_eq!(buffer.text(), "1.5");
    }

    #[test]
    fn test_operator_reenables_dot() {
        let mut buffer = typed("1.5+2");
        assert!(!buffer.dot_used());
        assert!(buffer.push_dot());
        assert_eq!(buffer.text(), "1.5+2.");
    }

    #[test]
    fn test_dot_on_empty_number_enters_zero() {
        assert_eq!(typed(".5").text(), "0.5");
        assert_eq!(typed("3×.5").text(), "3×0.5");
    }

    #[test]
    fn test_leading_zero_replaced() {
        assert_eq!(typed("05").text(), "5");
        assert_eq!(typed("00").text(), "0");
        assert_eq!(typed("0.05").text(), "0.05");
        assert_eq!(typed("1+07").text(), "1+7");
    }

    #[test]
    fn test_operator_needs_operand() {
        let mut buffer = TokenBuffer::new();
        assert!(!buffer.push_operator(Operator::Add));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_consecutive_operators_overwrite() {
        let buffer = typed("4+×2");
        assert_eq!(buffer.text(), "4×2");
        assert_eq!(buffer.tokens().len(), 3);
    }

    #[test]
    fn test_pop_is_inverse_of_push() {
        for (before, key) in [("12", '3'), ("12", '+'), ("12+3", '×'), ("1.2", '5'), ("7", '.')] {
            let mut buffer = typed(&format!("{}{}", before, key));
            buffer.pop_char();
            assert_eq!(buffer, typed(before), "backspace after {:?} on {:?}", key, before);
        }
    }

    #[test]
    fn test_pop_trims_carried_literal() {
        let mut buffer = TokenBuffer::new();
        buffer.seed("-5.25");
        assert!(buffer.dot_used());
        assert_eq!(buffer.pop_char(), Some('5'));
        assert_eq!(buffer.pop_char(), Some('2'));
        assert_eq!(buffer.pop_char(), Some('.'));
        assert!(!buffer.dot_used());
        assert_eq!(buffer.text(), "-5");
        buffer.pop_char();
        buffer.pop_char();
        assert!(buffer.is_empty());
        assert_eq!(buffer.pop_char(), None);
    }

    #[test]
    fn test_pop_operator_restores_dot_state() {
        let mut buffer = typed("1.5+");
        assert!(!buffer.dot_used());
        assert_eq!(buffer.pop_char(), Some('+'));
        assert!(buffer.dot_used());
        assert!(!buffer.push_dot());
    }

    #[test]
    fn test_single_number() {
        assert!(typed("12.5").is_single_number());
        assert!(!typed("1+2").is_single_number());
        assert!(!TokenBuffer::new().is_single_number());
    }
}
