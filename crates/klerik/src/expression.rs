//! The expression façade

use crate::context::{NumericContext, RoundingMode};
use crate::error::ExpressionResult;
use crate::evaluator::Evaluator;
use crate::functions::{FunctionDef, FunctionRegistry};
use crate::operators::{OperatorDef, OperatorRegistry};
use crate::parser::to_postfix;
use crate::substitution::substitute;
use crate::symbols::Symbols;
use crate::tokenizer::tokenize;
use crate::validator::validate;
use crate::value::Value;
use crate::variables::{BoundValue, Variables};

/// A compiled-on-demand expression
///
/// The source is tokenized, converted to postfix and validated the first
/// time it is needed; the postfix sequence is then cached until the source
/// changes. An `Expression` is not synchronized: concurrent mutation and
/// evaluation of one instance must be serialized by the caller.
///
/// ```
/// use klerik::Expression;
///
/// let mut expr = Expression::new("2*x + 4*z")
///     .with("x", 1)
///     .with("y", 2)
///     .with("z", "2*x + 3*y");
/// assert_eq!(expr.evaluate().unwrap().to_string(), "34");
/// ```
#[derive(Debug, Clone)]
pub struct Expression {
    source: String,
    context: NumericContext,
    symbols: Symbols,
    postfix: Option<Vec<String>>,
}

impl Expression {
    /// Create an expression with the default context
    pub fn new<S: Into<String>>(source: S) -> Self {
        Self::with_context(source, NumericContext::default())
    }

    pub fn with_context<S: Into<String>>(source: S, context: NumericContext) -> Self {
        Self {
            source: source.into(),
            context,
            symbols: Symbols::with_defaults(),
            postfix: None,
        }
    }

    /// Current source text, including any substitutions made by bindings
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn context(&self) -> NumericContext {
        self.context
    }

    pub fn set_context(&mut self, context: NumericContext) -> &mut Self {
        self.context = context;
        self
    }

    /// Set the number of significant digits, keeping the rounding mode
    pub fn set_precision(&mut self, precision: u32) -> &mut Self {
        self.context = self.context.with_precision(precision);
        self
    }

    pub fn set_rounding_mode(&mut self, rounding: RoundingMode) -> &mut Self {
        self.context = self.context.with_rounding(rounding);
        self
    }

    /// Register an operator, returning the one it replaced
    ///
    /// Takes effect the next time the expression is compiled.
    pub fn add_operator(&mut self, operator: OperatorDef) -> Option<OperatorDef> {
        self.symbols.operators.register(operator)
    }

    /// Register a function, returning the one it replaced
    ///
    /// Takes effect the next time the expression is compiled.
    pub fn add_function(&mut self, function: FunctionDef) -> Option<FunctionDef> {
        self.symbols.functions.register(function)
    }

    /// Bind a variable
    ///
    /// Numbers and delimited text go to the binding tables. Anything else is
    /// pasted into the source text, parenthesized, in place of every
    /// whole-word occurrence of `name`. If the rewrite cannot be performed the
    /// source is left unchanged and a warning is logged.
    pub fn set_variable<S, V>(&mut self, name: S, value: V) -> &mut Self
    where
        S: Into<String>,
        V: Into<BoundValue>,
    {
        let name = name.into();
        let value = value.into();

        // A new variable may shadow a function name in the cached sequence
        if !matches!(value, BoundValue::Source(_)) && !self.symbols.variables.contains(&name) {
            self.invalidate();
        }

        match value {
            BoundValue::Decimal(number) => self.symbols.variables.set_number(name, number),
            BoundValue::Text(text) => self.symbols.variables.set_text(name, text),
            BoundValue::Source(raw) => match substitute(&self.source, &name, &raw) {
                Ok(rewritten) => {
                    log::debug!("substituted '{name}': {} -> {rewritten}", self.source);
                    self.source = rewritten;
                    self.invalidate();
                }
                Err(err) => {
                    log::warn!("cannot substitute '{name}' in '{}': {err}", self.source);
                }
            },
        }
        self
    }

    /// Bind a variable, by value
    pub fn with<S, V>(mut self, name: S, value: V) -> Self
    where
        S: Into<String>,
        V: Into<BoundValue>,
    {
        self.set_variable(name, value);
        self
    }

    pub fn operators(&self) -> &OperatorRegistry {
        &self.symbols.operators
    }

    pub fn functions(&self) -> &FunctionRegistry {
        &self.symbols.functions
    }

    pub fn variables(&self) -> &Variables {
        &self.symbols.variables
    }

    /// Drop the cached postfix sequence
    pub fn invalidate(&mut self) {
        if self.postfix.take().is_some() {
            log::trace!("postfix cache dropped for '{}'", self.source);
        }
    }

    /// Raw tokens of the current source
    pub fn tokens(&self) -> ExpressionResult<Vec<String>> {
        tokenize(&self.source, &self.symbols.operators)
    }

    /// Postfix sequence, compiling and caching it if needed
    pub fn postfix(&mut self) -> ExpressionResult<&[String]> {
        let postfix = match self.postfix.take() {
            Some(postfix) => postfix,
            None => self.compile()?,
        };
        Ok(self.postfix.insert(postfix).as_slice())
    }

    /// Postfix tokens joined by single spaces
    pub fn to_postfix_string(&mut self) -> ExpressionResult<String> {
        Ok(self.postfix()?.join(" "))
    }

    /// Evaluate the expression
    ///
    /// Structural errors are reported before anything is computed. Other
    /// errors surface only if the value that raises them is actually needed.
    pub fn evaluate(&mut self) -> ExpressionResult<Value> {
        self.postfix()?;
        let postfix = self.postfix.as_deref().unwrap_or_default();
        Evaluator::new(&self.symbols, &self.context).evaluate(postfix)
    }

    fn compile(&self) -> ExpressionResult<Vec<String>> {
        let postfix = to_postfix(&self.source, &self.symbols)?;
        validate(&postfix, &self.symbols)?;
        log::debug!("compiled '{}' to '{}'", self.source, postfix.join(" "));
        Ok(postfix)
    }
}
