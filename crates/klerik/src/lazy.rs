//! Deferred values
//!
//! The evaluator never computes a value when it walks a token; it pushes a
//! [`LazyValue`] that computes it on demand. Forcing consumes the value, so a
//! deferred computation runs at most once.

use crate::error::ExpressionResult;
use crate::value::Value;
use std::fmt;

type Thunk<'a> = Box<dyn FnOnce() -> ExpressionResult<Value> + 'a>;

/// A single-shot deferred computation of a [`Value`]
pub struct LazyValue<'a> {
    thunk: Thunk<'a>,
}

impl<'a> LazyValue<'a> {
    /// Defer a computation
    pub fn new<F>(thunk: F) -> Self
    where
        F: FnOnce() -> ExpressionResult<Value> + 'a,
    {
        Self {
            thunk: Box::new(thunk),
        }
    }

    /// Wrap an already computed value
    pub fn ready(value: Value) -> Self {
        Self::new(move || Ok(value))
    }

    /// Run the computation
    pub fn force(self) -> ExpressionResult<Value> {
        (self.thunk)()
    }
}

impl fmt::Debug for LazyValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LazyValue(..)")
    }
}

/// Force every parameter, left to right, stopping at the first error
pub fn force_all(params: Vec<LazyValue<'_>>) -> ExpressionResult<Vec<Value>> {
    params.into_iter().map(LazyValue::force).collect()
}
