//! Token classification
//!
//! Tokens are plain strings. What a token means depends on the symbol tables
//! at the time it is looked at, so every stage classifies tokens itself
//! through [`classify`] instead of trusting a stored kind.

use crate::symbols::Symbols;
use crate::value::TEXT_DELIMITER;

pub const LEFT_PAREN: &str = "(";
pub const RIGHT_PAREN: &str = ")";
pub const COMMA: &str = ",";

pub(crate) const MINUS_SIGN: char = '-';
pub(crate) const DECIMAL_SEPARATOR: char = '.';

/// What a token stands for, given a set of symbol tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    LeftParen,
    RightParen,
    Comma,
    /// Number literal, possibly signed
    Numeral,
    /// Delimited text literal
    Text,
    Operator,
    /// Name bound in the numeric or text table
    Variable,
    Function,
    /// Identifier that is neither bound nor a function
    Symbol,
    Unknown,
}

impl TokenKind {
    /// Whether the token stands for an operand
    pub fn is_value(self) -> bool {
        matches!(self, TokenKind::Numeral | TokenKind::Text | TokenKind::Variable)
    }
}

/// Classify a token against the given symbol tables
pub fn classify(token: &str, symbols: &Symbols) -> TokenKind {
    match token {
        LEFT_PAREN => TokenKind::LeftParen,
        RIGHT_PAREN => TokenKind::RightParen,
        COMMA => TokenKind::Comma,
        _ if is_numeral(token) => TokenKind::Numeral,
        _ if is_text(token) => TokenKind::Text,
        _ if symbols.operators.contains(token) => TokenKind::Operator,
        _ if symbols.variables.contains(token) => TokenKind::Variable,
        _ if symbols.functions.contains(token) => TokenKind::Function,
        _ if is_identifier(token) => TokenKind::Symbol,
        _ => TokenKind::Unknown,
    }
}

/// Digits with optional sign and decimal separators
pub fn is_numeral(token: &str) -> bool {
    token.chars().any(|c| c.is_ascii_digit())
        && token
            .chars()
            .all(|c| c.is_ascii_digit() || c == MINUS_SIGN || c == '+' || c == DECIMAL_SEPARATOR)
}

pub fn is_text(token: &str) -> bool {
    token.len() > 1 && token.starts_with(TEXT_DELIMITER)
}

pub fn is_identifier(token: &str) -> bool {
    token.chars().next().map_or(false, is_identifier_start)
}

pub(crate) fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

pub(crate) fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Parentheses and comma
pub(crate) fn is_separator(c: char) -> bool {
    c == '(' || c == ')' || c == ','
}
