//! Tokens stored in the expression buffer.

use std::fmt;

/// A binary operator as shown on the keypad.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Binding strength; higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Subtract => 1,
            Self::Multiply | Self::Divide => 2,
        }
    }

    /// The keypad symbol used on the display.
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '−',
            Self::Multiply => '×',
            Self::Divide => '÷',
        }
    }

    /// Map a typed character to an operator. Accepts both the keypad
    /// symbols and their ASCII stand-ins.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' | '−' => Some(Self::Subtract),
            '*' | 'x' | '×' => Some(Self::Multiply),
            '/' | '÷' => Some(Self::Divide),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// One entry of the expression buffer.
///
/// Consecutive `Literal` and `Dot` entries together form a single number.
/// A carried result such as `-5` is kept as one `Literal`, so its sign is
/// never mistaken for a subtraction.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    /// Digits, or the text of a carried result.
    Literal(String),
    /// A decimal point.
    Dot,
    /// A binary operator.
    Operator(Operator),
}

impl Token {
    pub fn is_operator(&self) -> bool {
        matches!(self, Self::Operator(_))
    }

    /// Number of characters this token occupies on the display.
    pub fn width(&self) -> usize {
        match self {
            Self::Literal(text) => text.chars().count(),
            Self::Dot | Self::Operator(_) => 1,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.write_str(text),
            Self::Dot => f.write_str("."),
            Self::Operator(op) => write!(f, "{}", op),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_levels() {
        assert!(Operator::Multiply.precedence() > Operator::Add.precedence());
        assert_eq!(Operator::Add.precedence(), Operator::Subtract.precedence());
        assert_eq!(Operator::Multiply.precedence(), Operator::Divide.precedence());
    }

    #[test]
    fn test_ascii_aliases() {
        assert_eq!(Operator::from_char('-'), Some(Operator::Subtract));
        assert_eq!(Operator::from_char('−'), Some(Operator::Subtract));
        assert_eq!(Operator::from_char('x'), Some(Operator::Multiply));
        assert_eq!(Operator::from_char('/'), Some(Operator::Divide));
        assert_eq!(Operator::from_char('%'), None);
    }

    #[test]
    fn test_token_display() {
        assert_eq!(Token::Literal("-5".into()).to_string(), "-5");
        assert_eq!(Token::Dot.to_string(), ".");
        assert_eq!(Token::Operator(Operator::Divide).to_string(), "÷");
        assert_eq!(Token::Literal("12".into()).width(), 2);
    }
}
