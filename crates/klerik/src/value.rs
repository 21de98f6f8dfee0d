//! Expression values
//!
//! A value is either a decimal number or a piece of delimited text. Text keeps
//! its two boundary delimiters as part of the representation, so `'abc'` is
//! stored with both apostrophes.

use bigdecimal::BigDecimal;
use num_bigint::Sign;
use num_traits::{One, Zero};
use std::fmt;

/// Boundary delimiter of text values
pub const TEXT_DELIMITER: char = '\'';

/// Escape character inside text values
pub const ESCAPE: char = '\\';

/// Value produced by evaluating an expression
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    Decimal(BigDecimal),
    /// Delimited text, boundaries included
    Text(String),
}

impl Value {
    /// Wrap raw content in text delimiters
    pub fn text<S: AsRef<str>>(content: S) -> Self {
        Value::Text(format!(
            "{TEXT_DELIMITER}{}{TEXT_DELIMITER}",
            content.as_ref()
        ))
    }

    /// Name of the value kind, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Decimal(_) => "Decimal",
            Value::Text(_) => "Text",
        }
    }

    pub fn as_decimal(&self) -> Option<&BigDecimal> {
        match self {
            Value::Decimal(d) => Some(d),
            Value::Text(_) => None,
        }
    }

    /// Text with its delimiters
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            Value::Decimal(_) => None,
        }
    }

    /// Text without its delimiters
    pub fn text_content(&self) -> Option<&str> {
        self.as_text().map(strip_delimiters)
    }

    /// Interpret a decimal as a boolean: anything but zero is true
    pub fn is_truthy(&self) -> Option<bool> {
        self.as_decimal().map(|d| !d.is_zero())
    }

    /// Strip insignificant trailing zeros from a decimal
    pub fn normalized(self) -> Self {
        match self {
            Value::Decimal(d) => Value::Decimal(d.normalized()),
            text => text,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Decimal(d) => f.write_str(&plain(d)),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<BigDecimal> for Value {
    fn from(value: BigDecimal) -> Self {
        Value::Decimal(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Decimal(if value {
            BigDecimal::one()
        } else {
            BigDecimal::zero()
        })
    }
}

/// Positional notation of a decimal, never exponential
///
/// The scale is kept as is: `1.50` prints as `1.50` and a negative scale is
/// written out with trailing zeros.
pub fn plain(number: &BigDecimal) -> String {
    let (unscaled, scale) = number.as_bigint_and_exponent();
    let mut digits = unscaled.magnitude().to_str_radix(10);

    if scale <= 0 {
        if !unscaled.is_zero() {
            digits.push_str(&"0".repeat(scale.unsigned_abs() as usize));
        }
    } else {
        let scale = scale as usize;
        if digits.len() <= scale {
            let padding = "0".repeat(scale - digits.len() + 1);
            digits.insert_str(0, &padding);
        }
        digits.insert(digits.len() - scale, '.');
    }

    if unscaled.sign() == Sign::Minus {
        digits.insert(0, '-');
    }
    digits
}

/// Whether a string is delimited text: starts and ends with the delimiter
pub fn is_delimited(s: &str) -> bool {
    s.len() >= 2 && s.starts_with(TEXT_DELIMITER) && s.ends_with(TEXT_DELIMITER)
}

fn strip_delimiters(s: &str) -> &str {
    let s = s.strip_prefix(TEXT_DELIMITER).unwrap_or(s);
    s.strip_suffix(TEXT_DELIMITER).unwrap_or(s)
}

/// Join two delimited texts, dropping the inner boundaries
///
/// `'ab'` and `'cd'` give `'abcd'`.
pub(crate) fn join_text(left: &str, right: &str) -> String {
    let left = left.strip_suffix(TEXT_DELIMITER).unwrap_or(left);
    let right = right.strip_prefix(TEXT_DELIMITER).unwrap_or(right);
    let mut joined = String::with_capacity(left.len() + right.len());
    joined.push_str(left);
    joined.push_str(right);
    joined
}

/// Append a number to delimited text
pub(crate) fn append_number(text: &str, number: &BigDecimal) -> String {
    join_text(text, &Value::text(plain(number)).to_string())
}

/// Prepend a number to delimited text
pub(crate) fn prepend_number(number: &BigDecimal, text: &str) -> String {
    join_text(&Value::text(plain(number)).to_string(), text)
}

/// Repeat the content of delimited text `count` times
pub(crate) fn repeat_text(text: &str, count: usize) -> String {
    Value::text(strip_delimiters(text).repeat(count)).to_string()
}
