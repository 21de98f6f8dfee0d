//! Lazy stack evaluator
//!
//! Walks a validated postfix sequence and builds a tree of [`LazyValue`]s on
//! a single stack. Nothing is computed during the walk except function arity
//! checks; the last remaining value is forced at the end.

use crate::context::NumericContext;
use crate::error::{ExpressionError, ExpressionResult};
use crate::functions::Arity;
use crate::lazy::LazyValue;
use crate::symbols::Symbols;
use crate::token::{classify, TokenKind};
use crate::value::Value;

/// Stack slot: an operand, or the start of a function-argument group
enum Slot<'a> {
    GroupStart,
    Value(LazyValue<'a>),
}

/// Evaluator over one expression's symbols and numeric context
pub struct Evaluator<'a> {
    symbols: &'a Symbols,
    ctx: &'a NumericContext,
}

impl<'a> Evaluator<'a> {
    pub fn new(symbols: &'a Symbols, ctx: &'a NumericContext) -> Self {
        Self { symbols, ctx }
    }

    /// Evaluate a postfix sequence, forcing only the final value
    pub fn evaluate(&self, postfix: &'a [String]) -> ExpressionResult<Value> {
        let result = self.build(postfix)?.force()?;
        Ok(result.normalized())
    }

    /// Walk the sequence, returning the unforced result
    pub fn build(&self, postfix: &'a [String]) -> ExpressionResult<LazyValue<'a>> {
        let mut stack: Vec<Slot<'a>> = Vec::with_capacity(postfix.len());

        for token in postfix {
            let slot = match classify(token, self.symbols) {
                TokenKind::LeftParen => Slot::GroupStart,
                TokenKind::Operator => Slot::Value(self.operator(token, &mut stack)?),
                TokenKind::Variable => Slot::Value(self.variable(token)),
                TokenKind::Function => Slot::Value(self.function(token, &mut stack)?),
                TokenKind::Numeral => {
                    let ctx = self.ctx;
                    Slot::Value(LazyValue::new(move || Ok(Value::Decimal(ctx.parse(token)?))))
                }
                TokenKind::Text => Slot::Value(LazyValue::ready(Value::Text(token.clone()))),
                TokenKind::RightParen | TokenKind::Comma | TokenKind::Symbol | TokenKind::Unknown => {
                    return Err(ExpressionError::syntax(format!(
                        "Unknown operator or function '{token}'"
                    )));
                }
            };
            stack.push(slot);
        }

        match (stack.pop(), stack.is_empty()) {
            (Some(Slot::Value(result)), true) => Ok(result),
            (None, _) => Err(ExpressionError::structure("Empty expression")),
            _ => Err(ExpressionError::structure("Too many numbers or variables")),
        }
    }

    fn operator(&self, symbol: &str, stack: &mut Vec<Slot<'a>>) -> ExpressionResult<LazyValue<'a>> {
        let Some(def) = self.symbols.operators.get(symbol) else {
            return Err(ExpressionError::syntax(format!("Unknown operator '{symbol}'")));
        };
        let implementation = def.implementation;
        let right = pop_operand(symbol, stack)?;
        let left = pop_operand(symbol, stack)?;
        let ctx = self.ctx;

        Ok(LazyValue::new(move || {
            let right = right.force()?;
            let left = left.force()?;
            implementation(left, right, ctx)
        }))
    }

    // Only the numeric table is consulted for bare identifiers
    fn variable(&self, name: &'a str) -> LazyValue<'a> {
        let variables = &self.symbols.variables;
        LazyValue::new(move || {
            variables
                .number(name)
                .cloned()
                .map(Value::Decimal)
                .ok_or_else(|| ExpressionError::UnboundVariable(name.to_string()))
        })
    }

    fn function(&self, name: &str, stack: &mut Vec<Slot<'a>>) -> ExpressionResult<LazyValue<'a>> {
        let Some(def) = self.symbols.functions.get(name) else {
            return Err(ExpressionError::syntax(format!(
                "Unknown operator or function '{name}'"
            )));
        };

        let mut params = Vec::new();
        loop {
            match stack.pop() {
                Some(Slot::Value(param)) => params.push(param),
                Some(Slot::GroupStart) => break,
                None => return Err(too_many_operators(name)),
            }
        }
        params.reverse();

        if let Arity::Fixed(expected) = def.arity {
            if params.len() != expected {
                return Err(ExpressionError::ArgumentCount {
                    function: name.to_string(),
                    expected,
                    actual: params.len(),
                });
            }
        }

        let implementation = def.implementation;
        let ctx = self.ctx;
        Ok(LazyValue::new(move || implementation(params, ctx)))
    }
}

fn pop_operand<'a>(symbol: &str, stack: &mut Vec<Slot<'a>>) -> ExpressionResult<LazyValue<'a>> {
    match stack.pop() {
        Some(Slot::Value(operand)) => Ok(operand),
        _ => Err(too_many_operators(symbol)),
    }
}

fn too_many_operators(token: &str) -> ExpressionError {
    ExpressionError::structure(format!("Too many operators or functions at '{token}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::to_postfix;
    use bigdecimal::BigDecimal;

    fn eval_with(source: &str, symbols: &Symbols) -> ExpressionResult<Value> {
        let postfix = to_postfix(source, symbols)?;
        let ctx = NumericContext::default();
        Evaluator::new(symbols, &ctx).evaluate(&postfix)
    }

    fn eval(source: &str) -> ExpressionResult<Value> {
        eval_with(source, &Symbols::with_defaults())
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(eval("1+2*3").unwrap().to_string(), "7");
        assert_eq!(eval("(1+2)*3").unwrap().to_string(), "9");
        assert_eq!(eval("10-4-3").unwrap().to_string(), "3");
        assert_eq!(eval("2^3^2").unwrap().to_string(), "512");
    }

    #[test]
    fn test_function_arguments_stay_separate() {
        assert_eq!(eval("max(1+2, 2*2, 3)").unwrap().to_string(), "4");
        assert_eq!(eval("max(min(3.7),max(2.6,-8.0))").unwrap().to_string(), "3.7");
        assert_eq!(
            eval("max(1,2,max(3,4,5,max(9,10,3,4,5),8),7)").unwrap().to_string(),
            "10"
        );
    }

    #[test]
    fn test_result_is_normalized() {
        assert_eq!(eval("1.50 + 1.50").unwrap(), Value::Decimal(BigDecimal::from(3)));
        assert_eq!(eval("1.50 + 1.50").unwrap().to_string(), "3");
        assert_eq!(eval("100 * 12").unwrap().to_string(), "1200");
    }

    #[test]
    fn test_text_variable_is_not_numeric() {
        let mut symbols = Symbols::with_defaults();
        symbols.variables.set_text("x", "'hello'");
        let err = eval_with("x", &symbols).unwrap_err();
        assert_eq!(err, ExpressionError::UnboundVariable("x".into()));
        assert_eq!(err.to_string(), "Variable 'x' has no numeric value");
        assert!(!err.is_structural());
    }

    #[test]
    fn test_nothing_forced_during_build() {
        let symbols = Symbols::with_defaults();
        let postfix = to_postfix("1 / 0", &symbols).unwrap();
        let ctx = NumericContext::default();
        let evaluator = Evaluator::new(&symbols, &ctx);
        let lazy = evaluator.build(&postfix).unwrap();
        assert_eq!(lazy.force().unwrap_err().to_string(), "Division by zero");
    }

    #[test]
    fn test_arity_checked_during_walk() {
        use crate::functions::{Arity, FunctionDef};

        fn first(params: Vec<LazyValue<'_>>, _ctx: &NumericContext) -> ExpressionResult<Value> {
            match params.into_iter().next() {
                Some(p) => p.force(),
                None => Err(ExpressionError::function("no parameters")),
            }
        }

        let mut symbols = Symbols::with_defaults();
        symbols.functions.register(FunctionDef::new("f", Arity::Fixed(2), first));
        let postfix = to_postfix("f(1, 2, 3)", &symbols).unwrap();
        let ctx = NumericContext::default();
        let err = Evaluator::new(&symbols, &ctx).build(&postfix).unwrap_err();
        assert_eq!(err.to_string(), "Function 'f' expected 2 parameters, got 3");
    }
}
