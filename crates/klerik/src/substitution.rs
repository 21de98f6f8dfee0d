//! Source rewriting for values that are neither numbers nor text
//!
//! The identifier is replaced, case-insensitively and as a whole word, by
//! the parenthesized replacement. The rewrite is purely textual, so an
//! occurrence inside a text literal is replaced as well.

use regex::{NoExpand, Regex};

/// Replace every whole-word occurrence of `name` in `source` by `(replacement)`
///
/// Fails only when the pattern built from `name` cannot be compiled, e.g.
/// when it exceeds the regex size limit.
pub fn substitute(source: &str, name: &str, replacement: &str) -> Result<String, regex::Error> {
    let pattern = format!(r"(?i)\b{}\b", regex::escape(name));
    let re = Regex::new(&pattern)?;
    let replacement = format!("({replacement})");
    Ok(re.replace_all(source, NoExpand(&replacement)).into_owned())
}
