//! Numeric context
//!
//! Precision and rounding applied to all decimal arithmetic of an expression.

use crate::error::{ExpressionError, ExpressionResult};
use bigdecimal::BigDecimal;
use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

/// Significant digits kept by a division that does not terminate when the
/// context has no precision
pub const UNLIMITED_DIVISION_DIGITS: u64 = 100;

/// Rounding rule applied when a result has more digits than the precision allows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum RoundingMode {
    /// Away from zero
    Up,
    /// Towards zero
    Down,
    /// Towards positive infinity
    Ceiling,
    /// Towards negative infinity
    Floor,
    /// Nearest neighbour, ties away from zero
    HalfUp,
    /// Nearest neighbour, ties towards zero
    HalfDown,
    /// Nearest neighbour, ties to the even neighbour
    HalfEven,
}

impl RoundingMode {
    fn strategy(self) -> bigdecimal::RoundingMode {
        match self {
            RoundingMode::Up => bigdecimal::RoundingMode::Up,
            RoundingMode::Down => bigdecimal::RoundingMode::Down,
            RoundingMode::Ceiling => bigdecimal::RoundingMode::Ceiling,
            RoundingMode::Floor => bigdecimal::RoundingMode::Floor,
            RoundingMode::HalfUp => bigdecimal::RoundingMode::HalfUp,
            RoundingMode::HalfDown => bigdecimal::RoundingMode::HalfDown,
            RoundingMode::HalfEven => bigdecimal::RoundingMode::HalfEven,
        }
    }

    /// Round to at most `digits` significant digits
    ///
    /// A value that already fits is returned untouched, trailing zeros
    /// included.
    pub fn round_to(self, value: BigDecimal, digits: u64) -> BigDecimal {
        match NonZeroU64::new(digits) {
            Some(prec) if value.digits() > digits => value.with_precision_round(prec, self.strategy()),
            _ => value,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            RoundingMode::Up => "up",
            RoundingMode::Down => "down",
            RoundingMode::Ceiling => "ceiling",
            RoundingMode::Floor => "floor",
            RoundingMode::HalfUp => "half-up",
            RoundingMode::HalfDown => "half-down",
            RoundingMode::HalfEven => "half-even",
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoundingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "up" => Ok(RoundingMode::Up),
            "down" => Ok(RoundingMode::Down),
            "ceiling" => Ok(RoundingMode::Ceiling),
            "floor" => Ok(RoundingMode::Floor),
            "half-up" => Ok(RoundingMode::HalfUp),
            "half-down" => Ok(RoundingMode::HalfDown),
            "half-even" => Ok(RoundingMode::HalfEven),
            _ => Err(format!("Unknown rounding mode '{s}'")),
        }
    }
}

/// Precision (significant digits) and rounding mode for decimal arithmetic
///
/// A precision of 0 disables context rounding: sums, differences and products
/// are exact, and divisions that do not terminate stop after
/// [`UNLIMITED_DIVISION_DIGITS`] digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NumericContext {
    precision: u32,
    rounding: RoundingMode,
}

impl NumericContext {
    /// 7 digits, half-even
    pub const DECIMAL32: NumericContext = NumericContext {
        precision: 7,
        rounding: RoundingMode::HalfEven,
    };

    /// 16 digits, half-even
    pub const DECIMAL64: NumericContext = NumericContext {
        precision: 16,
        rounding: RoundingMode::HalfEven,
    };

    /// No context rounding
    pub const UNLIMITED: NumericContext = NumericContext {
        precision: 0,
        rounding: RoundingMode::HalfUp,
    };

    pub fn new(precision: u32, rounding: RoundingMode) -> Self {
        Self {
            precision,
            rounding,
        }
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn rounding(&self) -> RoundingMode {
        self.rounding
    }

    /// Same rounding mode, different precision
    pub fn with_precision(self, precision: u32) -> Self {
        Self::new(precision, self.rounding)
    }

    /// Same precision, different rounding mode
    pub fn with_rounding(self, rounding: RoundingMode) -> Self {
        Self { rounding, ..self }
    }

    /// Significant digits a division carries before rounding
    pub(crate) fn division_digits(&self) -> u64 {
        match self.precision {
            0 => UNLIMITED_DIVISION_DIGITS,
            precision => u64::from(precision),
        }
    }

    /// Round a value to this context's precision
    ///
    /// Values with no more significant digits than the precision keep their
    /// scale, so `1.50` stays `1.50` and `24` is not padded.
    pub fn round(&self, value: BigDecimal) -> BigDecimal {
        self.rounding.round_to(value, u64::from(self.precision))
    }

    /// Parse a numeral and round it to this context
    pub fn parse(&self, numeral: &str) -> ExpressionResult<BigDecimal> {
        let value = parse_decimal(numeral)?;
        Ok(self.round(value))
    }
}

impl Default for NumericContext {
    fn default() -> Self {
        Self::DECIMAL32
    }
}

/// Parse a numeral without applying any context
pub(crate) fn parse_decimal(numeral: &str) -> ExpressionResult<BigDecimal> {
    BigDecimal::from_str(numeral).map_err(|_| ExpressionError::InvalidNumber(numeral.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn test_default_is_decimal32() {
        let ctx = NumericContext::default();
        assert_eq!(ctx.precision(), 7);
        assert_eq!(ctx.rounding(), RoundingMode::HalfEven);
    }

    #[test]
    fn test_round_modes() {
        let third = dec("0.8333333333333333");
        let down = NumericContext::new(7, RoundingMode::Down);
        let up = NumericContext::new(7, RoundingMode::Up);
        assert_eq!(down.round(third.clone()), dec("0.8333333"));
        assert_eq!(up.round(third), dec("0.8333334"));

        let half = NumericContext::new(1, RoundingMode::HalfEven);
        assert_eq!(half.round(dec("2.5")), dec("2"));
        let half = NumericContext::new(1, RoundingMode::HalfUp);
        assert_eq!(half.round(dec("2.5")), dec("3"));
        let half = NumericContext::new(1, RoundingMode::HalfDown);
        assert_eq!(half.round(dec("2.5")), dec("2"));

        let floor = NumericContext::new(2, RoundingMode::Floor);
        assert_eq!(floor.round(dec("-1.21")), dec("-1.3"));
        let ceiling = NumericContext::new(2, RoundingMode::Ceiling);
        assert_eq!(ceiling.round(dec("-1.29")), dec("-1.2"));
    }

    #[test]
    fn test_round_keeps_short_values() {
        let ctx = NumericContext::default();
        assert_eq!(ctx.round(dec("24")).to_string(), "24");
        assert_eq!(ctx.round(dec("1.50")).to_string(), "1.50");
        assert_eq!(ctx.round(dec("0.25")).to_string(), "0.25");
    }

    #[test]
    fn test_unlimited_leaves_value() {
        let value = dec("1.2345678901234567890123456789012345678901");
        assert_eq!(NumericContext::UNLIMITED.round(value.clone()), value);
    }

    #[test]
    fn test_precision_is_not_capped() {
        let ctx = NumericContext::new(45, RoundingMode::HalfUp);
        assert_eq!(ctx.precision(), 45);
        let long = dec("1234567890123456789012345678901234567890.123456789");
        assert_eq!(
            ctx.round(long).to_string(),
            "1234567890123456789012345678901234567890.12346"
        );
    }

    #[test]
    fn test_with_precision_keeps_rounding() {
        let ctx = NumericContext::default()
            .with_rounding(RoundingMode::Down)
            .with_precision(3);
        assert_eq!(ctx, NumericContext::new(3, RoundingMode::Down));
    }

    #[test]
    fn test_parse() {
        let ctx = NumericContext::new(3, RoundingMode::HalfUp);
        assert_eq!(ctx.parse("3.14159").unwrap(), dec("3.14"));
        assert_eq!(ctx.parse("-2.5").unwrap(), dec("-2.5"));
        assert_eq!(
            ctx.parse("1.2.3"),
            Err(ExpressionError::InvalidNumber("1.2.3".into()))
        );
        let wide = "100000000000000000000000000000";
        assert_eq!(NumericContext::UNLIMITED.parse(wide).unwrap(), dec(wide));
    }

    #[test]
    fn test_rounding_mode_from_str() {
        assert_eq!("HALF_EVEN".parse::<RoundingMode>(), Ok(RoundingMode::HalfEven));
        assert_eq!("half-up".parse::<RoundingMode>(), Ok(RoundingMode::HalfUp));
        assert_eq!("Down".parse::<RoundingMode>(), Ok(RoundingMode::Down));
        assert!("sideways".parse::<RoundingMode>().is_err());
        assert_eq!(RoundingMode::HalfDown.to_string(), "half-down");
    }
}
