//! Expression evaluation.
//!
//! Reduces a token buffer to one number with a two-stack shift-reduce pass:
//! operands go on one stack, operators are held back on another until an
//! operator of lower or equal precedence forces them to apply.

use super::format::{RESULT_DECIMALS, format_display, round_to};
use super::token::{Operator, Token};
use thiserror::Error;
use tracing::debug;

/// Why an expression could not be evaluated.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EvalError {
    /// An operand did not parse, or an operator lacked two operands.
    #[error("malformed expression")]
    MalformedExpression,
    /// The right-hand side of a division was exactly zero.
    #[error("division by zero")]
    DivisionByZero,
    /// A result grew past the largest representable number.
    #[error("result out of range")]
    Overflow,
}

/// Outcome of pressing evaluate.
#[derive(Clone, Debug, PartialEq)]
pub enum CalcResult {
    /// The expression reduced to a number.
    Success {
        /// The expression as it was displayed.
        expression: String,
        /// The rounded value.
        value: f64,
        /// The value formatted for the display.
        display_result: String,
    },
    /// The expression could not be reduced.
    Error {
        /// The expression as it was displayed.
        expression: String,
        error: EvalError,
    },
}

impl CalcResult {
    /// Evaluate `tokens`, keeping `expression` for display.
    pub fn from_tokens(expression: String, tokens: &[Token]) -> Self {
        match evaluate(tokens) {
            Ok(value) => Self::Success {
                expression,
                display_result: format_display(value),
                value,
            },
            Err(error) => Self::Error { expression, error },
        }
    }

    /// Get the expression that was evaluated.
    pub fn expression(&self) -> &str {
        match self {
            Self::Success { expression, .. } => expression,
            Self::Error { expression, .. } => expression,
        }
    }

    /// The numeric value, for successful results.
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Success { value, .. } => Some(*value),
            Self::Error { .. } => None,
        }
    }
}

/// Evaluate a token sequence, honoring operator precedence.
///
/// The result is rounded to six decimal places.
pub fn evaluate(tokens: &[Token]) -> Result<f64, EvalError> {
    let mut operands: Vec<f64> = Vec::new();
    let mut operators: Vec<Operator> = Vec::new();
    let mut literal = String::new();

    for token in tokens {
        match token {
            Token::Literal(text) => literal.push_str(text),
            Token::Dot => literal.push('.'),
            Token::Operator(op) => {
                operands.push(parse_operand(&literal)?);
                literal.clear();

                while let Some(&top) = operators.last()
                    && top.precedence() >= op.precedence()
                {
                    operators.pop();
                    reduce(&mut operands, top)?;
                }
                operators.push(*op);
            }
        }
    }

    if !literal.is_empty() {
        operands.push(parse_operand(&literal)?);
    }

    while let Some(op) = operators.pop() {
        reduce(&mut operands, op)?;
    }

    match operands.as_slice() {
        [value] => Ok(round_to(*value, RESULT_DECIMALS)),
        _ => {
            debug!(remaining = operands.len(), "operand stack did not reduce to one value");
            Err(EvalError::MalformedExpression)
        }
    }
}

fn parse_operand(text: &str) -> Result<f64, EvalError> {
    text.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| {
            debug!(operand = text, "operand is not a number");
            EvalError::MalformedExpression
        })
}

/// Pop two operands, apply `op`, push the result.
fn reduce(operands: &mut Vec<f64>, op: Operator) -> Result<(), EvalError> {
    let rhs = operands.pop().ok_or(EvalError::MalformedExpression)?;
    let lhs = operands.pop().ok_or(EvalError::MalformedExpression)?;
    operands.push(apply(lhs, rhs, op)?);
    Ok(())
}

fn apply(lhs: f64, rhs: f64, op: Operator) -> Result<f64, EvalError> {
    let value = match op {
        Operator::Add => lhs + rhs,
        Operator::Subtract => lhs - rhs,
        Operator::Multiply => lhs * rhs,
        Operator::Divide if rhs == 0.0 => return Err(EvalError::DivisionByZero),
        Operator::Divide => lhs / rhs,
    };

    if value.is_finite() {
        Ok(value)
    } else {
        debug!(lhs, rhs, %op, "result overflowed");
        Err(EvalError::Overflow)
    }
}
