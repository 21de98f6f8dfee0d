//! Functions
//!
//! A function receives its parameters unforced, so it decides which of them
//! are ever computed. Eager functions such as `min` and `max` simply force
//! all of them with [`force_all`].

use crate::context::NumericContext;
use crate::error::{ExpressionError, ExpressionResult};
use crate::lazy::{force_all, LazyValue};
use crate::registry::{Named, Registry};
use crate::value::Value;
use bigdecimal::BigDecimal;
use std::cmp::Ordering;
use std::fmt;

/// Function implementation signature
pub type FunctionImpl = for<'a> fn(Vec<LazyValue<'a>>, &NumericContext) -> ExpressionResult<Value>;

/// Number of parameters a function accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Fixed(usize),
    Variadic,
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match self {
            Arity::Fixed(n) => *n == count,
            Arity::Variadic => true,
        }
    }
}

/// Function definition
#[derive(Clone)]
pub struct FunctionDef {
    /// Function name (case-sensitive)
    pub name: String,
    pub arity: Arity,
    /// Implementation
    pub implementation: FunctionImpl,
}

impl FunctionDef {
    pub fn new<S: Into<String>>(name: S, arity: Arity, implementation: FunctionImpl) -> Self {
        Self {
            name: name.into(),
            arity,
            implementation,
        }
    }
}

impl Named for FunctionDef {
    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for FunctionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionDef")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// Function registry
pub type FunctionRegistry = Registry<FunctionDef>;

impl FunctionRegistry {
    /// Create a registry with all built-in functions
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        // MIN
        registry.register(FunctionDef::new("min", Arity::Variadic, fn_min));

        // MAX
        registry.register(FunctionDef::new("max", Arity::Variadic, fn_max));

        registry
    }
}

/// MIN function
pub fn fn_min(params: Vec<LazyValue<'_>>, _ctx: &NumericContext) -> ExpressionResult<Value> {
    extremum("min", params, Ordering::Less)
}

/// MAX function
pub fn fn_max(params: Vec<LazyValue<'_>>, _ctx: &NumericContext) -> ExpressionResult<Value> {
    extremum("max", params, Ordering::Greater)
}

// The first of several equal candidates is kept.
fn extremum(name: &str, params: Vec<LazyValue<'_>>, wanted: Ordering) -> ExpressionResult<Value> {
    let values = force_all(params)?;
    let mut result: Option<&BigDecimal> = None;

    for value in &values {
        let candidate = value.as_decimal().ok_or_else(|| {
            ExpressionError::function(format!(
                "'{name}' requires numeric parameters, got {}",
                value.type_name()
            ))
        })?;
        match result {
            Some(current) if candidate.cmp(current) != wanted => {}
            _ => result = Some(candidate),
        }
    }

    result
        .cloned()
        .map(Value::Decimal)
        .ok_or_else(|| ExpressionError::function(format!("'{name}' requires at least one parameter")))
}
