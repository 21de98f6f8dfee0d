//! Shunting-yard conversion to postfix
//!
//! The output is a flat token list in reverse Polish order. Function calls
//! leave a `(` marker in the output in front of their arguments; the marker
//! and the function name bracket the argument group for the validator and
//! the evaluator.

use crate::error::{ExpressionError, ExpressionResult};
use crate::symbols::Symbols;
use crate::token::{classify, TokenKind, LEFT_PAREN};
use crate::tokenizer::Tokenizer;

/// Convert infix source to a postfix token list
pub fn to_postfix(source: &str, symbols: &Symbols) -> ExpressionResult<Vec<String>> {
    let mut tokenizer = Tokenizer::new(source, &symbols.operators);
    let mut yard = ShuntingYard::new(symbols);
    while let Some(token) = tokenizer.next() {
        yard.accept(token?, tokenizer.position())?;
    }
    yard.finish()
}

struct ShuntingYard<'a> {
    symbols: &'a Symbols,
    output: Vec<String>,
    stack: Vec<String>,
    previous: Option<(String, TokenKind)>,
    last_function: Option<String>,
}

impl<'a> ShuntingYard<'a> {
    fn new(symbols: &'a Symbols) -> Self {
        Self {
            symbols,
            output: Vec::new(),
            stack: Vec::new(),
            previous: None,
            last_function: None,
        }
    }

    /// Handle one token; `position` is the tokenizer cursor just after it
    fn accept(&mut self, token: String, position: usize) -> ExpressionResult<()> {
        let kind = classify(&token, self.symbols);
        match kind {
            _ if kind.is_value() => self.output.push(token.clone()),
            TokenKind::Function => {
                self.stack.push(token.clone());
                self.last_function = Some(token.clone());
            }
            TokenKind::Symbol => self.stack.push(token.clone()),
            TokenKind::Comma => self.close_argument()?,
            TokenKind::Operator => self.push_operator(&token),
            TokenKind::LeftParen => {
                self.check_missing_operator(position)?;
                self.open_group();
            }
            TokenKind::RightParen => self.close_group()?,
            // The tokenizer only yields registered operators
            _ => {}
        }
        self.previous = Some((token, kind));
        Ok(())
    }

    fn push_operator(&mut self, symbol: &str) {
        let operators = &self.symbols.operators;
        let Some(current) = operators.get(symbol) else {
            return;
        };
        while let Some(top) = self.stack.last().and_then(|t| operators.get(t)) {
            if !current.yields_to(top) {
                break;
            }
            if let Some(top) = self.stack.pop() {
                self.output.push(top);
            }
        }
        self.stack.push(symbol.to_string());
    }

    fn open_group(&mut self) {
        if matches!(self.previous, Some((_, TokenKind::Function))) {
            self.output.push(LEFT_PAREN.to_string());
        }
        self.stack.push(LEFT_PAREN.to_string());
    }

    /// A number directly followed by `(` lacks an operator in between
    fn check_missing_operator(&self, position: usize) -> ExpressionResult<()> {
        match &self.previous {
            Some((_, TokenKind::Numeral)) => Err(ExpressionError::syntax(format!(
                "Missing operator at character position {position}"
            ))),
            _ => Ok(()),
        }
    }

    fn close_argument(&mut self) -> ExpressionResult<()> {
        while let Some(top) = self.stack.last() {
            if top == LEFT_PAREN {
                break;
            }
            if let Some(top) = self.stack.pop() {
                self.output.push(top);
            }
        }
        if self.stack.is_empty() {
            let message = match &self.last_function {
                Some(name) => format!("Parse error for function '{name}'"),
                None => "Parse error: ',' outside of a function call".to_string(),
            };
            return Err(ExpressionError::syntax(message));
        }
        Ok(())
    }

    fn close_group(&mut self) -> ExpressionResult<()> {
        loop {
            match self.stack.pop() {
                None => return Err(ExpressionError::syntax("Mismatched parentheses")),
                Some(top) if top == LEFT_PAREN => break,
                Some(top) => self.output.push(top),
            }
        }
        let closes_call = self
            .stack
            .last()
            .map_or(false, |top| self.symbols.functions.contains(top));
        if closes_call {
            if let Some(function) = self.stack.pop() {
                self.output.push(function);
            }
        }
        Ok(())
    }

    fn finish(mut self) -> ExpressionResult<Vec<String>> {
        while let Some(element) = self.stack.pop() {
            match classify(&element, self.symbols) {
                TokenKind::LeftParen | TokenKind::RightParen => {
                    return Err(ExpressionError::syntax("Mismatched parentheses"));
                }
                TokenKind::Operator => self.output.push(element),
                _ => {
                    return Err(ExpressionError::syntax(format!(
                        "Unknown operator or function '{element}'"
                    )));
                }
            }
        }
        Ok(self.output)
    }
}
