//! Tokenizer
//!
//! A single forward pass over the (trimmed) source. Each call to
//! [`Iterator::next`] skips whitespace and yields one raw token; the sequence
//! ends at the end of input or after the first error.
//!
//! A minus sign directly followed by a digit is merged into a negative
//! numeral when nothing precedes it, or when it follows `(`, `,` or an
//! operator. Everywhere else it is the subtraction operator.

use crate::error::{ExpressionError, ExpressionResult};
use crate::operators::OperatorRegistry;
use crate::token::{
    is_identifier_char, is_identifier_start, is_separator, COMMA, DECIMAL_SEPARATOR, LEFT_PAREN,
    MINUS_SIGN,
};
use crate::value::{ESCAPE, TEXT_DELIMITER};

/// Splits source text into raw tokens
pub struct Tokenizer<'a> {
    input: Vec<char>,
    pos: usize,
    previous: Option<String>,
    operators: &'a OperatorRegistry,
}

/// Tokenize a whole source string
pub fn tokenize(source: &str, operators: &OperatorRegistry) -> ExpressionResult<Vec<String>> {
    Tokenizer::new(source, operators).collect()
}

impl<'a> Tokenizer<'a> {
    pub fn new(source: &str, operators: &'a OperatorRegistry) -> Self {
        Self {
            input: source.trim().chars().collect(),
            pos: 0,
            previous: None,
            operators,
        }
    }

    /// Cursor position, in characters from the start of the trimmed source
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Source not yet tokenized
    pub fn remaining(&self) -> String {
        self.input[self.pos..].iter().collect()
    }

    fn current(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.pos + 1).copied()
    }

    fn slice(&self, start: usize) -> String {
        self.input[start..self.pos].iter().collect()
    }

    fn next_token(&mut self) -> ExpressionResult<Option<String>> {
        while self.current().map_or(false, char::is_whitespace) {
            self.pos += 1;
        }
        let Some(c) = self.current() else {
            return Ok(None);
        };

        let token = if c == TEXT_DELIMITER {
            self.scan_text()?
        } else if c.is_ascii_digit() {
            self.scan_number()
        } else if self.is_negative_sign(c) {
            self.pos += 1;
            let mut token = MINUS_SIGN.to_string();
            token.push_str(&self.scan_number());
            token
        } else if is_identifier_start(c) {
            self.scan_identifier()
        } else if is_separator(c) {
            self.pos += 1;
            c.to_string()
        } else {
            self.scan_operator()?
        };

        self.previous = Some(token.clone());
        Ok(Some(token))
    }

    fn is_negative_sign(&self, c: char) -> bool {
        c == MINUS_SIGN
            && self.peek().map_or(false, |next| next.is_ascii_digit())
            && match self.previous.as_deref() {
                None | Some(LEFT_PAREN) | Some(COMMA) => true,
                Some(previous) => self.operators.contains(previous),
            }
    }

    fn scan_text(&mut self) -> ExpressionResult<String> {
        let start = self.pos;
        self.pos += 1;
        loop {
            match self.current() {
                None => return Err(invalid_boundary(self.pos)),
                Some(TEXT_DELIMITER) if self.input[self.pos - 1] != ESCAPE => break,
                Some(_) => self.pos += 1,
            }
        }
        self.pos += 1;

        // A closing delimiter cannot be followed by another one
        if self.current() == Some(TEXT_DELIMITER) {
            return Err(invalid_boundary(self.pos));
        }
        Ok(self.slice(start))
    }

    fn scan_number(&mut self) -> String {
        let start = self.pos;
        while self
            .current()
            .map_or(false, |c| c.is_ascii_digit() || c == DECIMAL_SEPARATOR)
        {
            self.pos += 1;
        }
        self.slice(start)
    }

    fn scan_identifier(&mut self) -> String {
        let start = self.pos;
        while self.current().map_or(false, is_identifier_char) {
            self.pos += 1;
        }
        self.slice(start)
    }

    fn scan_operator(&mut self) -> ExpressionResult<String> {
        let start = self.pos;
        self.pos += 1;
        // A minus after the first character starts a new token
        while self
            .current()
            .map_or(false, |c| is_operator_char(c) && c != MINUS_SIGN)
        {
            self.pos += 1;
        }

        let symbol = self.slice(start);
        if !self.operators.contains(&symbol) {
            return Err(ExpressionError::syntax(format!(
                "Unknown operator '{symbol}' at position {}",
                start + 1
            )));
        }
        Ok(symbol)
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = ExpressionResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Ok(token) => token.map(Ok),
            Err(e) => {
                self.pos = self.input.len();
                Some(Err(e))
            }
        }
    }
}

fn is_operator_char(c: char) -> bool {
    !(is_identifier_char(c) || c.is_whitespace() || is_separator(c) || c == TEXT_DELIMITER)
}

fn invalid_boundary(position: usize) -> ExpressionError {
    ExpressionError::syntax(format!("Invalid string boundary at position {position}"))
}
