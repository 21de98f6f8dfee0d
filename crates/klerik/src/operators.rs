//! Binary operators
//!
//! Each operator is a symbol with a precedence, an associativity and a pure
//! function over two values. The default set covers arithmetic, boolean logic
//! and comparisons; text operands are accepted by `+` (concatenation) and `*`
//! (repetition).

use crate::context::NumericContext;
use crate::error::{ExpressionError, ExpressionResult};
use crate::registry::{Named, Registry};
use crate::value::{append_number, join_text, plain, prepend_number, repeat_text, Value};
use bigdecimal::BigDecimal;
use num_bigint::{BigInt, Sign};
use num_traits::{One, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Operator implementation signature: `(left, right, context) -> result`
pub type OperatorImpl = fn(Value, Value, &NumericContext) -> ExpressionResult<Value>;

/// Operator definition
#[derive(Clone)]
pub struct OperatorDef {
    /// Symbol as written in the source
    pub symbol: String,
    /// Higher binds tighter
    pub precedence: i32,
    /// Equal-precedence chains group left to right when true
    pub left_associative: bool,
    /// Implementation
    pub implementation: OperatorImpl,
}

impl OperatorDef {
    pub fn new<S: Into<String>>(
        symbol: S,
        precedence: i32,
        left_associative: bool,
        implementation: OperatorImpl,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            precedence,
            left_associative,
            implementation,
        }
    }

    /// Whether this operator, arriving while `top` sits on the operator
    /// stack, forces `top` out first
    pub(crate) fn yields_to(&self, top: &OperatorDef) -> bool {
        top.precedence > self.precedence
            || (self.left_associative && top.precedence == self.precedence)
    }
}

impl Named for OperatorDef {
    fn name(&self) -> &str {
        &self.symbol
    }
}

impl fmt::Debug for OperatorDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorDef")
            .field("symbol", &self.symbol)
            .field("precedence", &self.precedence)
            .field("left_associative", &self.left_associative)
            .finish_non_exhaustive()
    }
}

/// Operator registry
pub type OperatorRegistry = Registry<OperatorDef>;

impl OperatorRegistry {
    /// Create a registry with all default operators
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        // Boolean
        registry.register(OperatorDef::new("&&", 4, false, and));
        registry.register(OperatorDef::new("||", 2, false, or));

        // Comparison
        registry.register(OperatorDef::new(">", 10, false, greater));
        registry.register(OperatorDef::new(">=", 10, false, greater_or_equal));
        registry.register(OperatorDef::new("<", 10, false, less));
        registry.register(OperatorDef::new("<=", 10, false, less_or_equal));
        registry.register(OperatorDef::new("==", 10, false, equal));
        registry.register(OperatorDef::new("!=", 10, false, not_equal));

        // Arithmetic
        registry.register(OperatorDef::new("+", 20, true, add));
        registry.register(OperatorDef::new("-", 20, true, subtract));
        registry.register(OperatorDef::new("*", 30, true, multiply));
        registry.register(OperatorDef::new("/", 30, true, divide));
        registry.register(OperatorDef::new("%", 30, true, remainder));
        registry.register(OperatorDef::new("^", 40, false, power));

        registry
    }
}

fn operand_types(operator: &str, left: &Value, right: &Value) -> ExpressionError {
    ExpressionError::OperandTypes {
        operator: operator.to_string(),
        left: left.type_name(),
        right: right.type_name(),
    }
}

fn decimals(
    operator: &str,
    left: Value,
    right: Value,
) -> ExpressionResult<(BigDecimal, BigDecimal)> {
    match (left, right) {
        (Value::Decimal(a), Value::Decimal(b)) => Ok((a, b)),
        (left, right) => Err(operand_types(operator, &left, &right)),
    }
}

fn rounded(result: BigDecimal, ctx: &NumericContext) -> ExpressionResult<Value> {
    Ok(Value::Decimal(ctx.round(result)))
}

/// `+`: addition, or concatenation when either side is text
pub fn add(left: Value, right: Value, ctx: &NumericContext) -> ExpressionResult<Value> {
    match (left, right) {
        (Value::Decimal(a), Value::Decimal(b)) => rounded(a + b, ctx),
        (Value::Text(a), Value::Text(b)) => Ok(Value::Text(join_text(&a, &b))),
        (Value::Text(a), Value::Decimal(b)) => Ok(Value::Text(append_number(&a, &b))),
        (Value::Decimal(a), Value::Text(b)) => Ok(Value::Text(prepend_number(&a, &b))),
    }
}

/// `-`
pub fn subtract(left: Value, right: Value, ctx: &NumericContext) -> ExpressionResult<Value> {
    let (a, b) = decimals("-", left, right)?;
    rounded(a - b, ctx)
}

/// `*`: multiplication, or repetition when one side is text
pub fn multiply(left: Value, right: Value, ctx: &NumericContext) -> ExpressionResult<Value> {
    match (left, right) {
        (Value::Decimal(a), Value::Decimal(b)) => rounded(a * b, ctx),
        (Value::Text(text), Value::Decimal(count)) | (Value::Decimal(count), Value::Text(text)) => {
            Ok(Value::Text(repeat_text(&text, repetitions(&count)?)))
        }
        (left, right) => Err(operand_types("*", &left, &right)),
    }
}

fn repetitions(count: &BigDecimal) -> ExpressionResult<usize> {
    if !count.is_integer() {
        return Err(ExpressionError::arithmetic(format!(
            "Cannot repeat text a fractional number of times ({})",
            plain(count)
        )));
    }
    count.to_usize().ok_or_else(|| {
        ExpressionError::arithmetic(format!("Cannot repeat text {} times", plain(count)))
    })
}

/// `/`
pub fn divide(left: Value, right: Value, ctx: &NumericContext) -> ExpressionResult<Value> {
    let (a, b) = decimals("/", left, right)?;
    Ok(Value::Decimal(quotient(&a, &b, ctx)?))
}

/// Quotient rounded to the context
///
/// The digits are produced by integer division, two guard digits past the
/// precision plus a sticky digit for a non-zero remainder, so the single
/// final rounding is exact in every mode. A quotient that terminates keeps
/// no more trailing zeros than the operands' scales call for.
fn quotient(a: &BigDecimal, b: &BigDecimal, ctx: &NumericContext) -> ExpressionResult<BigDecimal> {
    if b.is_zero() {
        return Err(ExpressionError::arithmetic("Division by zero"));
    }
    let (dividend, dividend_scale) = a.as_bigint_and_exponent();
    let (divisor, divisor_scale) = b.as_bigint_and_exponent();
    let preferred_scale = dividend_scale - divisor_scale;
    if dividend.is_zero() {
        return Ok(BigDecimal::new(BigInt::zero(), preferred_scale.max(0)));
    }

    let digits = ctx.division_digits();
    let shift = (digits as i64 + 2 + b.digits() as i64 - a.digits() as i64).max(0);
    let shifted = dividend * BigInt::from(10u8).pow(shift as u32);
    let mut truncated = &shifted / &divisor;
    let remainder = &shifted % &divisor;
    let mut scale = shift + preferred_scale;

    if remainder.is_zero() {
        let ten = BigInt::from(10u8);
        while scale > preferred_scale && (&truncated % &ten).is_zero() {
            truncated /= &ten;
            scale -= 1;
        }
    } else {
        let negative = (shifted.sign() == Sign::Minus) != (divisor.sign() == Sign::Minus);
        truncated = truncated * 10 + if negative { -1 } else { 1 };
        scale += 1;
    }

    Ok(ctx.rounding().round_to(BigDecimal::new(truncated, scale), digits))
}

/// `%`: remainder with the sign of the dividend
pub fn remainder(left: Value, right: Value, ctx: &NumericContext) -> ExpressionResult<Value> {
    let (a, b) = decimals("%", left, right)?;
    if b.is_zero() {
        return Err(ExpressionError::arithmetic("Division by zero"));
    }
    let scale = a.as_bigint_and_exponent().1.max(b.as_bigint_and_exponent().1);
    let (dividend, _) = a.with_scale(scale).into_bigint_and_exponent();
    let (divisor, _) = b.with_scale(scale).into_bigint_and_exponent();
    rounded(BigDecimal::new(dividend % divisor, scale), ctx)
}

/// `^`
///
/// The whole part of the exponent is applied by repeated multiplication, the
/// fractional part through a floating-point approximation. A negative exponent
/// inverts the result.
pub fn power(left: Value, right: Value, ctx: &NumericContext) -> ExpressionResult<Value> {
    let (base, exponent) = decimals("^", left, right)?;

    let magnitude = exponent.abs();
    let whole = magnitude.with_scale(0);
    let fraction = &magnitude - &whole;
    let times = whole.to_u32().ok_or_else(|| {
        ExpressionError::arithmetic(format!("Exponent {} is too large", plain(&exponent)))
    })?;

    let mut result = integer_power(&base, times, ctx);
    if !fraction.is_zero() {
        let approximation = base
            .to_f64()
            .zip(fraction.to_f64())
            .map(|(b, e)| b.powf(e))
            .filter(|p| p.is_finite())
            .and_then(|p| BigDecimal::from_str(&p.to_string()).ok())
            .ok_or_else(|| {
                ExpressionError::arithmetic(format!(
                    "Cannot raise {} to the power {}",
                    plain(&base),
                    plain(&exponent)
                ))
            })?;
        result = result * approximation;
    }
    let result = ctx.round(result);

    if exponent.sign() == Sign::Minus {
        return Ok(Value::Decimal(quotient(&BigDecimal::one(), &result, ctx)?));
    }
    Ok(Value::Decimal(result))
}

// Intermediate products keep a few guard digits past the precision
fn integer_power(base: &BigDecimal, mut exponent: u32, ctx: &NumericContext) -> BigDecimal {
    let working = match ctx.precision() {
        0 => None,
        precision => Some(u64::from(precision) + 10),
    };
    let trim = |value: BigDecimal| match working {
        Some(digits) => ctx.rounding().round_to(value, digits),
        None => value,
    };

    let mut result = BigDecimal::one();
    let mut square = base.clone();
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = trim(&result * &square);
        }
        exponent >>= 1;
        if exponent > 0 {
            square = trim(&square * &square);
        }
    }
    result
}

/// `&&`
pub fn and(left: Value, right: Value, _ctx: &NumericContext) -> ExpressionResult<Value> {
    let (a, b) = decimals("&&", left, right)?;
    Ok(Value::from(!a.is_zero() && !b.is_zero()))
}

/// `||`
pub fn or(left: Value, right: Value, _ctx: &NumericContext) -> ExpressionResult<Value> {
    let (a, b) = decimals("||", left, right)?;
    Ok(Value::from(!a.is_zero() || !b.is_zero()))
}

fn compare(
    operator: &str,
    left: Value,
    right: Value,
    accept: fn(Ordering) -> bool,
) -> ExpressionResult<Value> {
    let (a, b) = decimals(operator, left, right)?;
    Ok(Value::from(accept(a.cmp(&b))))
}

/// `>`
pub fn greater(left: Value, right: Value, _ctx: &NumericContext) -> ExpressionResult<Value> {
    compare(">", left, right, Ordering::is_gt)
}

/// `>=`
pub fn greater_or_equal(left: Value, right: Value, _ctx: &NumericContext) -> ExpressionResult<Value> {
    compare(">=", left, right, Ordering::is_ge)
}

/// `<`
pub fn less(left: Value, right: Value, _ctx: &NumericContext) -> ExpressionResult<Value> {
    compare("<", left, right, Ordering::is_lt)
}

/// `<=`
pub fn less_or_equal(left: Value, right: Value, _ctx: &NumericContext) -> ExpressionResult<Value> {
    compare("<=", left, right, Ordering::is_le)
}

/// `==`
pub fn equal(left: Value, right: Value, _ctx: &NumericContext) -> ExpressionResult<Value> {
    compare("==", left, right, Ordering::is_eq)
}

/// `!=`
pub fn not_equal(left: Value, right: Value, _ctx: &NumericContext) -> ExpressionResult<Value> {
    compare("!=", left, right, Ordering::is_ne)
}
