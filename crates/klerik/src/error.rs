//! Expression error types

use thiserror::Error;

/// Result type for expression operations
pub type ExpressionResult<T> = std::result::Result<T, ExpressionError>;

/// Errors that can occur while compiling or evaluating an expression
///
/// Every variant is an "expression error": the message is what callers are
/// expected to match on. Structural errors (see [`ExpressionError::is_structural`])
/// are raised while compiling, before any value is computed. The rest are
/// raised lazily, when the value that triggers them is forced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpressionError {
    /// Tokenizer or parser fault
    #[error("{0}")]
    Syntax(String),

    /// Postfix sequence is not well formed
    #[error("{0}")]
    Structure(String),

    /// Numeral that is not a valid decimal
    #[error("Invalid number '{0}'")]
    InvalidNumber(String),

    /// Wrong number of arguments
    #[error("Function '{function}' expected {expected} parameters, got {actual}")]
    ArgumentCount {
        function: String,
        expected: usize,
        actual: usize,
    },

    /// Identifier without a numeric binding
    #[error("Variable '{0}' has no numeric value")]
    UnboundVariable(String),

    /// Operator applied to unsupported operand kinds
    #[error("'{operator}' operator does not accept (v1: {left}, v2: {right})")]
    OperandTypes {
        operator: String,
        left: &'static str,
        right: &'static str,
    },

    /// Division by zero and similar arithmetic faults
    #[error("{0}")]
    Arithmetic(String),

    /// Error raised by a function body
    #[error("{0}")]
    Function(String),
}

impl ExpressionError {
    pub(crate) fn syntax<S: Into<String>>(msg: S) -> Self {
        ExpressionError::Syntax(msg.into())
    }

    pub(crate) fn structure<S: Into<String>>(msg: S) -> Self {
        ExpressionError::Structure(msg.into())
    }

    pub(crate) fn arithmetic<S: Into<String>>(msg: S) -> Self {
        ExpressionError::Arithmetic(msg.into())
    }

    /// Create a function error with a message
    pub fn function<S: Into<String>>(msg: S) -> Self {
        ExpressionError::Function(msg.into())
    }

    /// Whether this error is detected while compiling (tokenizer, parser,
    /// validator) rather than while forcing a value
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            ExpressionError::Syntax(_)
                | ExpressionError::Structure(_)
                | ExpressionError::InvalidNumber(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ExpressionError::ArgumentCount {
            function: "f".into(),
            expected: 2,
            actual: 3,
        };
        assert_eq!(err.to_string(), "Function 'f' expected 2 parameters, got 3");

        let err = ExpressionError::OperandTypes {
            operator: "-".into(),
            left: "Text",
            right: "Decimal",
        };
        assert_eq!(
            err.to_string(),
            "'-' operator does not accept (v1: Text, v2: Decimal)"
        );
    }

    #[test]
    fn test_structural_split() {
        assert!(ExpressionError::syntax("Mismatched parentheses").is_structural());
        assert!(ExpressionError::structure("Empty expression").is_structural());
        assert!(!ExpressionError::UnboundVariable("x".into()).is_structural());
        assert!(!ExpressionError::arithmetic("Division by zero").is_structural());
    }
}
