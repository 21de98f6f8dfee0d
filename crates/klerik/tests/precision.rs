//! Tests for precision and rounding

use klerik::{Expression, NumericContext, RoundingMode};
use pretty_assertions::assert_eq;

fn eval_with(source: &str, configure: impl FnOnce(&mut Expression)) -> String {
    let mut expr = Expression::new(source);
    configure(&mut expr);
    expr.evaluate().unwrap().to_string()
}

#[test]
fn test_default_precision() {
    assert_eq!(eval_with("2.5/3", |_| {}), "0.8333333");
    assert_eq!(eval_with("1/3", |_| {}), "0.3333333");
}

#[test]
fn test_precision() {
    assert_eq!(eval_with("2.5/3", |e| { e.set_precision(2); }), "0.83");
    assert_eq!(eval_with("2.5/3", |e| { e.set_precision(3); }), "0.833");
    assert_eq!(eval_with("2.5/3", |e| { e.set_precision(8); }), "0.83333333");
}

#[test]
fn test_rounding_mode() {
    assert_eq!(
        eval_with("2.5/3", |e| { e.set_rounding_mode(RoundingMode::Down); }),
        "0.8333333"
    );
    assert_eq!(
        eval_with("2.5/3", |e| { e.set_rounding_mode(RoundingMode::Up); }),
        "0.8333334"
    );
}

#[test]
fn test_numerals_are_rounded() {
    assert_eq!(eval_with("1.23456789", |_| {}), "1.234568");
    assert_eq!(eval_with("1.23456789", |e| { e.set_precision(0); }), "1.23456789");
}

#[test]
fn test_contexts() {
    let mut expr = Expression::with_context("2/3", NumericContext::DECIMAL64);
    assert_eq!(expr.evaluate().unwrap().to_string(), "0.6666666666666667");

    expr.set_context(NumericContext::new(4, RoundingMode::Floor));
    assert_eq!(expr.evaluate().unwrap().to_string(), "0.6666");
    assert_eq!(expr.context().precision(), 4);
}

#[test]
fn test_wide_precision() {
    let third = eval_with("1/3", |e| { e.set_precision(40); });
    assert_eq!(third, format!("0.{}", "3".repeat(40)));
    assert_eq!(
        eval_with("2^100", |e| { e.set_precision(40); }),
        "1267650600228229401496703205376"
    );
    assert_eq!(eval_with("2^100", |_| {}), "1267651000000000000000000000000");
}

/// Magnitudes beyond machine width compile and evaluate exactly
#[test]
fn test_wide_magnitudes() {
    assert_eq!(
        eval_with("100000000000000000000000000000 + 1", |e| { e.set_precision(0); }),
        "100000000000000000000000000001"
    );
    assert_eq!(
        eval_with("10^29", |_| {}),
        "100000000000000000000000000000"
    );
    assert_eq!(
        eval_with("0.00000000000000000000000000001 * 1", |_| {}),
        "0.00000000000000000000000000001"
    );
}

/// Changing the context does not require recompiling
#[test]
fn test_context_change_after_caching() {
    let mut expr = Expression::new("10/3");
    assert_eq!(expr.evaluate().unwrap().to_string(), "3.333333");
    expr.set_precision(3);
    assert_eq!(expr.evaluate().unwrap().to_string(), "3.33");
}
