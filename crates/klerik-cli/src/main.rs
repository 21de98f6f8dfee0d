//! Klerik CLI - evaluate and inspect expressions

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use klerik::{Expression, RoundingMode};
use std::io::{self, Write};

#[derive(Parser)]
#[command(name = "klerik")]
#[command(author, version, about = "Decimal and text expression evaluator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate an expression and print the result
    Eval {
        /// Expression source
        expression: String,

        /// Variable binding, NAME=VALUE (repeatable)
        #[arg(short, long = "var", value_name = "NAME=VALUE")]
        vars: Vec<String>,

        /// Significant digits (0 = no rounding)
        #[arg(short, long)]
        precision: Option<u32>,

        /// Rounding mode (up, down, ceiling, floor, half-up, half-down, half-even)
        #[arg(short, long)]
        rounding: Option<RoundingMode>,
    },

    /// Print the postfix form of an expression
    #[command(alias = "postfix")]
    Rpn {
        /// Expression source
        expression: String,
    },

    /// Print the tokens of an expression, one per line
    Tokens {
        /// Expression source
        expression: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Eval {
            expression,
            vars,
            precision,
            rounding,
        } => eval(&expression, &vars, precision, rounding),
        Commands::Rpn { expression } => rpn(&expression),
        Commands::Tokens { expression } => tokens(&expression),
    }
}

fn eval(
    source: &str,
    vars: &[String],
    precision: Option<u32>,
    rounding: Option<RoundingMode>,
) -> Result<()> {
    let mut expr = Expression::new(source);

    if let Some(rounding) = rounding {
        expr.set_rounding_mode(rounding);
    }
    if let Some(precision) = precision {
        expr.set_precision(precision);
    }

    for var in vars {
        let (name, value) = parse_binding(var)?;
        expr.set_variable(name, value);
    }

    let value = expr
        .evaluate()
        .with_context(|| format!("Failed to evaluate '{}'", expr.source()))?;
    println!("{value}");
    Ok(())
}

fn rpn(source: &str) -> Result<()> {
    let mut expr = Expression::new(source);
    let postfix = expr
        .to_postfix_string()
        .with_context(|| format!("Failed to parse '{source}'"))?;
    println!("{postfix}");
    Ok(())
}

fn tokens(source: &str) -> Result<()> {
    let expr = Expression::new(source);
    let tokens = expr
        .tokens()
        .with_context(|| format!("Failed to tokenize '{source}'"))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for token in tokens {
        writeln!(out, "{token}")?;
    }
    Ok(())
}

/// Split `NAME=VALUE` at the first `=`
fn parse_binding(binding: &str) -> Result<(&str, &str)> {
    let (name, value) = binding
        .split_once('=')
        .ok_or_else(|| anyhow!("Invalid binding '{binding}', expected NAME=VALUE"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(anyhow!("Invalid binding '{binding}', name is empty"));
    }
    Ok((name, value.trim()))
}
