//! Variable bindings

use crate::context::parse_decimal;
use crate::value::{is_delimited, Value};
use ahash::AHashMap;
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{One, Zero};

/// Value given to [`Expression::set_variable`](crate::Expression::set_variable)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundValue {
    /// Stored in the numeric table
    Decimal(BigDecimal),
    /// Delimited text, stored in the text table
    Text(String),
    /// Pasted into the source text in place of the identifier
    Source(String),
}

impl BoundValue {
    /// Bind by rewriting the source, whatever the content looks like
    pub fn source<S: Into<String>>(raw: S) -> Self {
        BoundValue::Source(raw.into())
    }
}

impl From<BigDecimal> for BoundValue {
    fn from(value: BigDecimal) -> Self {
        BoundValue::Decimal(value)
    }
}

macro_rules! bound_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for BoundValue {
                fn from(value: $t) -> Self {
                    BoundValue::Decimal(BigDecimal::new(BigInt::from(value), 0))
                }
            }
        )*
    };
}

bound_from_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

// Finite floats bind through their shortest round-trip notation
macro_rules! bound_from_float {
    ($($t:ty),*) => {
        $(
            impl From<$t> for BoundValue {
                fn from(value: $t) -> Self {
                    let text = value.to_string();
                    match parse_decimal(&text) {
                        Ok(d) if value.is_finite() => BoundValue::Decimal(d),
                        _ => BoundValue::Source(text),
                    }
                }
            }
        )*
    };
}

bound_from_float!(f32, f64);

impl From<&str> for BoundValue {
    fn from(value: &str) -> Self {
        if is_delimited(value) {
            BoundValue::Text(value.to_string())
        } else if let Ok(d) = parse_decimal(value) {
            BoundValue::Decimal(d)
        } else {
            BoundValue::Source(value.to_string())
        }
    }
}

impl From<String> for BoundValue {
    fn from(value: String) -> Self {
        match BoundValue::from(value.as_str()) {
            BoundValue::Text(_) => BoundValue::Text(value),
            BoundValue::Source(_) => BoundValue::Source(value),
            number => number,
        }
    }
}

impl From<Value> for BoundValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Decimal(d) => BoundValue::Decimal(d),
            Value::Text(s) => BoundValue::Text(s),
        }
    }
}

/// Numeric and text bindings of an expression
///
/// A name lives in at most one of the two tables; binding it again replaces
/// the previous binding whichever table held it.
#[derive(Debug, Clone, Default)]
pub struct Variables {
    numeric: AHashMap<String, BigDecimal>,
    text: AHashMap<String, String>,
}

impl Variables {
    /// Create an empty set of bindings
    pub fn new() -> Self {
        Self::default()
    }

    /// Bindings for the `true` and `false` constants
    pub fn with_constants() -> Self {
        let mut variables = Self::new();
        variables.set_number("true", BigDecimal::one());
        variables.set_number("false", BigDecimal::zero());
        variables
    }

    pub fn set_number<S: Into<String>>(&mut self, name: S, value: BigDecimal) {
        let name = name.into();
        self.text.remove(&name);
        self.numeric.insert(name, value);
    }

    /// Bind delimited text
    pub fn set_text<S: Into<String>, T: Into<String>>(&mut self, name: S, value: T) {
        let name = name.into();
        self.numeric.remove(&name);
        self.text.insert(name, value.into());
    }

    pub fn number(&self, name: &str) -> Option<&BigDecimal> {
        self.numeric.get(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.text.get(name).map(String::as_str)
    }

    /// Whether the name is bound in either table
    pub fn contains(&self, name: &str) -> bool {
        self.numeric.contains_key(name) || self.text.contains_key(name)
    }

    /// All bound names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .numeric
            .keys()
            .chain(self.text.keys())
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> BigDecimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_bound_value_from_str() {
        assert_eq!(BoundValue::from("'abc'"), BoundValue::Text("'abc'".into()));
        assert_eq!(BoundValue::from("-2.5"), BoundValue::Decimal(dec("-2.5")));
        assert_eq!(BoundValue::from("2*x"), BoundValue::Source("2*x".into()));
        assert_eq!(BoundValue::from("'abc"), BoundValue::Source("'abc".into()));
        assert_eq!(
            BoundValue::from(String::from("'x'")),
            BoundValue::Text("'x'".into())
        );
        let wide = "123456789012345678901234567890.5";
        assert_eq!(BoundValue::from(wide), BoundValue::Decimal(dec(wide)));
    }

    #[test]
    fn test_bound_value_from_numbers() {
        assert_eq!(BoundValue::from(20), BoundValue::Decimal(dec("20")));
        assert_eq!(BoundValue::from(u128::MAX), BoundValue::Decimal(dec(&u128::MAX.to_string())));
        assert_eq!(BoundValue::from(2.5), BoundValue::Decimal(dec("2.5")));
        assert_eq!(BoundValue::from(0.1f32), BoundValue::Decimal(dec("0.1")));
        assert_eq!(BoundValue::from(f64::NAN), BoundValue::Source("NaN".into()));
        assert_eq!(BoundValue::from(f64::INFINITY), BoundValue::Source("inf".into()));
    }

    #[test]
    fn test_constants() {
        let variables = Variables::with_constants();
        assert_eq!(variables.number("true"), Some(&BigDecimal::one()));
        assert_eq!(variables.number("false"), Some(&BigDecimal::zero()));
        assert_eq!(variables.names(), vec!["false", "true"]);
    }

    #[test]
    fn test_rebinding_moves_between_tables() {
        let mut variables = Variables::new();
        variables.set_number("x", BigDecimal::one());
        variables.set_text("x", "'one'");
        assert_eq!(variables.number("x"), None);
        assert_eq!(variables.text("x"), Some("'one'"));
        assert!(variables.contains("x"));
        assert_eq!(variables.names(), vec!["x"]);
    }
}
