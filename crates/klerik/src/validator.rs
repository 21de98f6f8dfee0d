//! Structural validation of postfix sequences
//!
//! Walks the postfix list once without computing anything, keeping one
//! operand counter per open function-argument group plus one for the top
//! level. A successful validation guarantees that evaluation will never run
//! out of operands or leave more than one value behind.

use crate::context::parse_decimal;
use crate::error::{ExpressionError, ExpressionResult};
use crate::symbols::Symbols;
use crate::token::{classify, TokenKind};

/// Check that a postfix sequence reduces to exactly one value
pub fn validate(postfix: &[String], symbols: &Symbols) -> ExpressionResult<()> {
    let mut groups: Vec<usize> = Vec::new();
    let mut top_level = 0usize;

    for token in postfix {
        match classify(token, symbols) {
            TokenKind::LeftParen => groups.push(0),
            TokenKind::Operator => {
                let count = groups.last_mut().unwrap_or(&mut top_level);
                if *count < 2 {
                    return Err(too_many_operators(token));
                }
                *count -= 1;
            }
            TokenKind::Function => {
                if groups.pop().is_none() {
                    return Err(too_many_operators(token));
                }
                *groups.last_mut().unwrap_or(&mut top_level) += 1;
            }
            TokenKind::Numeral => {
                parse_decimal(token)?;
                *groups.last_mut().unwrap_or(&mut top_level) += 1;
            }
            TokenKind::Text | TokenKind::Variable => {
                *groups.last_mut().unwrap_or(&mut top_level) += 1;
            }
            TokenKind::RightParen | TokenKind::Comma => {
                return Err(ExpressionError::syntax("Mismatched parentheses"));
            }
            TokenKind::Symbol | TokenKind::Unknown => {
                return Err(ExpressionError::syntax(format!(
                    "Unknown operator or function '{token}'"
                )));
            }
        }
    }

    if !groups.is_empty() {
        return Err(ExpressionError::syntax("Mismatched parentheses"));
    }
    match top_level {
        1 => Ok(()),
        0 => Err(ExpressionError::structure("Empty expression")),
        _ => Err(ExpressionError::structure("Too many numbers or variables")),
    }
}

fn too_many_operators(token: &str) -> ExpressionError {
    ExpressionError::structure(format!("Too many operators or functions at '{token}'"))
}
