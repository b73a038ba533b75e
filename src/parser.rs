use std::sync::OnceLock;

use regex::Regex;

use crate::{
    ast::Expr,
    error::{AlphaError, AlphaResult},
};

/// Whole-string call pattern: `<name>(<args>)` where `name` is one or more
/// word characters. Anything else is a bare variable or a syntax error.
fn call_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\w+)\((.*)\)$").expect("static pattern"))
}

/// Parses an expression string into an [`Expr`] tree.
///
/// Whitespace is never significant and is stripped up front. A string with
/// no parentheses parses as a variable; `name(...)` parses as an operation
/// with comma-separated arguments split at nesting depth zero, so nested
/// calls like `Add(x1, Div(x2, x3))` work. `Foo()` is an operation with an
/// empty argument list. Unbalanced or malformed parentheses fail with
/// [`AlphaError::Syntax`], never a partial tree.
pub fn parse(expression: &str) -> AlphaResult<Expr> {
    let stripped: String = expression.chars().filter(|c| !c.is_whitespace()).collect();
    parse_stripped(&stripped)
}

fn parse_stripped(expr: &str) -> AlphaResult<Expr> {
    if expr.is_empty() {
        return Err(AlphaError::syntax("empty expression"));
    }

    if let Some(caps) = call_pattern().captures(expr) {
        let op = caps[1].to_string();
        let args = split_args(caps.get(2).map_or("", |m| m.as_str()))?
            .into_iter()
            .map(parse_stripped)
            .collect::<AlphaResult<Vec<_>>>()?;
        return Ok(Expr::Operation { op, args });
    }

    // Not a call. A stray parenthesis anywhere means the input was meant as
    // a call but is malformed, and must never silently become a variable.
    if expr.contains(['(', ')']) {
        return Err(AlphaError::syntax(format!(
            "malformed call syntax in '{expr}'"
        )));
    }

    Ok(Expr::Variable(expr.to_string()))
}

/// Splits an argument string at top-level commas only, tracking parenthesis
/// nesting depth. The empty string yields zero segments; a trailing empty
/// segment after the final comma is dropped.
fn split_args(args: &str) -> AlphaResult<Vec<&str>> {
    let mut parts = Vec::new();
    let mut depth: i32 = 0;
    let mut start = 0;

    for (i, c) in args.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return Err(AlphaError::syntax("unmatched parentheses"));
                }
            }
            ',' if depth == 0 => {
                parts.push(&args[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    if depth != 0 {
        return Err(AlphaError::syntax("unmatched parentheses"));
    }
    if start < args.len() {
        parts.push(&args[start..]);
    }

    Ok(parts)
}
