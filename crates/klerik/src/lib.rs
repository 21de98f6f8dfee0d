//! # klerik
//!
//! Arithmetic, boolean and text expressions over arbitrary-precision
//! decimals.
//!
//! This crate provides:
//! - A tokenizer for infix source text
//! - Shunting-yard conversion to postfix, with structural validation
//! - A lazy stack evaluator: values are computed only when needed
//! - Extensible operator and function registries
//! - Numeric and text variable bindings
//!
//! ## Example
//!
//! ```rust
//! use klerik::{Expression, RoundingMode};
//!
//! let mut expr = Expression::new("5 / 6");
//! expr.set_precision(3).set_rounding_mode(RoundingMode::Up);
//! assert_eq!(expr.evaluate()?.to_string(), "0.834");
//!
//! let mut greeting = Expression::new("'ho ' * 3 + '!'");
//! assert_eq!(greeting.evaluate()?.to_string(), "'ho ho ho !'");
//! # Ok::<(), klerik::ExpressionError>(())
//! ```

pub mod context;
pub mod error;
pub mod evaluator;
pub mod expression;
pub mod functions;
pub mod lazy;
pub mod operators;
pub mod parser;
pub mod registry;
pub mod substitution;
pub mod symbols;
pub mod token;
pub mod tokenizer;
pub mod validator;
pub mod value;
pub mod variables;

pub use bigdecimal::BigDecimal;
pub use context::{NumericContext, RoundingMode, UNLIMITED_DIVISION_DIGITS};
pub use error::{ExpressionError, ExpressionResult};
pub use expression::Expression;
pub use functions::{Arity, FunctionDef, FunctionImpl, FunctionRegistry};
pub use lazy::{force_all, LazyValue};
pub use operators::{OperatorDef, OperatorImpl, OperatorRegistry};
pub use parser::to_postfix;
pub use substitution::substitute;
pub use symbols::Symbols;
pub use tokenizer::{tokenize, Tokenizer};
pub use value::{plain, Value};
pub use variables::{BoundValue, Variables};
