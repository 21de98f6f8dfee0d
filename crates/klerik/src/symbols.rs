//! Per-expression symbol tables

use crate::functions::FunctionRegistry;
use crate::operators::OperatorRegistry;
use crate::variables::Variables;

/// Operators, functions and variable bindings of one expression
///
/// Owned by the [`Expression`](crate::Expression) and lent to the tokenizer,
/// parser, validator and evaluator for the duration of a single call.
#[derive(Debug, Clone)]
pub struct Symbols {
    pub operators: OperatorRegistry,
    pub functions: FunctionRegistry,
    pub variables: Variables,
}

impl Symbols {
    /// Default operators, `min`/`max`, and the `true`/`false` constants
    pub fn with_defaults() -> Self {
        Self {
            operators: OperatorRegistry::with_defaults(),
            functions: FunctionRegistry::with_defaults(),
            variables: Variables::with_constants(),
        }
    }
}

impl Default for Symbols {
    fn default() -> Self {
        Self::with_defaults()
    }
}
