//! Tests for arithmetic evaluation and structural errors

use klerik::{Expression, ExpressionError};
use pretty_assertions::assert_eq;

fn eval(source: &str) -> String {
    Expression::new(source).evaluate().unwrap().to_string()
}

fn eval_err(source: &str) -> ExpressionError {
    Expression::new(source).evaluate().unwrap_err()
}

/// Test operator precedence
#[test]
fn test_precedence() {
    assert_eq!(eval("1+2"), "3");
    assert_eq!(eval("4/2"), "2");
    assert_eq!(eval("3+4/2"), "5");
    assert_eq!(eval("(3+4)/2"), "3.5");
    assert_eq!(eval("4.2*1.9"), "7.98");
    assert_eq!(eval("8%3"), "2");
    assert_eq!(eval("8%2"), "0");
    assert_eq!(eval("10 - 2 - 3"), "5");
    assert_eq!(eval("2 * 3 + 4 * 5"), "26");
}

/// Test bracketed expressions
#[test]
fn test_brackets() {
    assert_eq!(eval("(1+2)"), "3");
    assert_eq!(eval("((1+2))"), "3");
    assert_eq!(eval("(((1+2)))"), "3");
    assert_eq!(eval("(1+2)*(1+2)"), "9");
    assert_eq!(eval("(1+2)*(1+2)+1"), "10");
    assert_eq!(eval("(1+2)*((1+2)+1)"), "12");
}

/// Test powers, including fractional and negative exponents
#[test]
fn test_powers() {
    assert_eq!(eval("2^4"), "16");
    assert_eq!(eval("2^8"), "256");
    assert_eq!(eval("3^2"), "9");
    assert_eq!(eval("2.5^2"), "6.25");
    assert_eq!(eval("2.6^3.5"), "28.34045");
    assert_eq!(eval("2^-2"), "0.25");
    assert_eq!(eval("2^3^2"), "512");
    assert_eq!(eval("2^2^3"), "256");
    assert_eq!(eval("5^0"), "1");
}

/// Test negative numerals next to operators and parentheses
#[test]
fn test_negative_numerals() {
    assert_eq!(eval("(-3+4)*-1/(7-(5*-8))"), "-0.0212766");
    assert_eq!(eval("-3 - -2"), "-1");
    assert_eq!(eval("3-1"), "2");
}

#[test]
fn test_consecutive_values() {
    assert_eq!(eval_err("12 8 2").to_string(), "Too many numbers or variables");
    assert_eq!(eval_err("(12)(18)").to_string(), "Too many numbers or variables");
}

#[test]
fn test_consecutive_operators() {
    assert_eq!(
        eval_err("12+ *18").to_string(),
        "Too many operators or functions at '+'"
    );
}

#[test]
fn test_empty_expression() {
    assert_eq!(eval_err("").to_string(), "Empty expression");
    assert_eq!(eval_err("   ").to_string(), "Empty expression");
}

#[test]
fn test_missing_operator() {
    assert_eq!(
        eval_err("2*3(5*3)").to_string(),
        "Missing operator at character position 4"
    );
    assert_eq!(
        eval_err("2*(3((5*3)))").to_string(),
        "Missing operator at character position 5"
    );
}

#[test]
fn test_unknown_operators() {
    assert_eq!(eval_err("7#9").to_string(), "Unknown operator '#' at position 2");
    assert_eq!(
        eval_err("123.6*-9.8-7#9").to_string(),
        "Unknown operator '#' at position 13"
    );
}

#[test]
fn test_mismatched_parentheses() {
    assert_eq!(eval_err("(1+2").to_string(), "Mismatched parentheses");
    assert_eq!(eval_err("1+2)").to_string(), "Mismatched parentheses");
}

#[test]
fn test_invalid_numeral() {
    let err = eval_err("1.2.3 + 1");
    assert_eq!(err, ExpressionError::InvalidNumber("1.2.3".into()));
    assert!(err.is_structural());
}

/// Arithmetic faults surface only when forced
#[test]
fn test_division_by_zero() {
    let err = eval_err("1 / (2 - 2)");
    assert_eq!(err.to_string(), "Division by zero");
    assert!(!err.is_structural());
    assert_eq!(eval_err("5 % 0").to_string(), "Division by zero");
}

/// Re-evaluating an unmodified expression gives the same result
#[test]
fn test_reevaluation() {
    let mut expr = Expression::new("max(1, 2) * 3");
    let first = expr.evaluate().unwrap();
    let second = expr.evaluate().unwrap();
    assert_eq!(first, second);
    assert_eq!(second.to_string(), "6");
}
