//! Expression parsing.
//!
//! Classifies a line of user input into one of three shapes, tried in order:
//! 1. Function call: `sin(30)`, `sqrt 16`, `abs_c(3+4j)`
//! 2. Complex binary operation: `(1+2j)*(3-1j)`
//! 3. Real binary operation: `3+5`, `2.5e3 * -1.5`, `1 +c 2j`
//!
//! Nothing is evaluated here.

use super::value::{Operand, REAL_LITERAL};
use crate::error::{CalcError, Result};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Runs of whitespace, collapsed to a single space before matching.
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();

    /// Lowercase-letter identifier followed by a parenthesized or bare signed argument.
    static ref FUNCTION_CALL: Regex = Regex::new(
        r"^(?P<name>[A-Za-z][A-Za-z_]*(?:10)?) ?(?:\((?P<paren>[^()]*)\)|(?P<bare>[+\-\d].*))$"
    ).unwrap();

    /// Two parenthesized complex literals joined by `+ - * /`.
    static ref COMPLEX_BINARY: Regex = Regex::new(
        r"^\((?P<lhs>[^()]+)\) ?(?P<op>[+\-*/]) ?\((?P<rhs>[^()]+)\)$"
    ).unwrap();

    /// Two signed literals joined by an operator, optionally complex-suffixed (`+c`).
    static ref REAL_BINARY: Regex = Regex::new(&format!(
        r"^(?P<lhs>[+-]?{r}[jJ]?) ?(?P<op>[+\-*/%^]c?) ?(?P<rhs>[+-]?{r}[jJ]?)$",
        r = REAL_LITERAL
    )).unwrap();
}

/// A classified expression with typed operands.
#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    /// Unary function call. `name` is lowercased.
    Function { name: String, arg: Operand },
    /// `(a)op(b)` where both sides are complex literals and `op` is one of `+ - * /`.
    ComplexBinary {
        lhs: Operand,
        operator: char,
        rhs: Operand,
    },
    /// `a op b` with the operator symbol exactly as written.
    RealBinary {
        lhs: Operand,
        operator: String,
        rhs: Operand,
    },
}

/// Collapse whitespace runs to single spaces and trim the ends.
pub fn normalize(input: &str) -> String {
    WHITESPACE.replace_all(input.trim(), " ").into_owned()
}

/// Parse user input into an [`Expression`].
pub fn parse(input: &str) -> Result<Expression> {
    let expr = normalize(input);

    // Function calls first: a letter can never start the binary forms
    if let Some(caps) = FUNCTION_CALL.captures(&expr) {
        let name = caps["name"].to_lowercase();
        let raw = caps
            .name("paren")
            .or_else(|| caps.name("bare"))
            .map(|m| m.as_str())
            .unwrap_or_default();
        // The name matched, so a bad argument is a parse error, not a fallthrough
        let arg = Operand::parse(&strip_spaces(raw))
            .map_err(|_| CalcError::parse(format!("invalid argument '{}' for {}", raw, name)))?;
        return Ok(Expression::Function { name, arg });
    }

    // Parenthesized operands before bare ones
    if let Some(caps) = COMPLEX_BINARY.captures(&expr) {
        let lhs = Operand::parse(&strip_spaces(&caps["lhs"]))?;
        let rhs = Operand::parse(&strip_spaces(&caps["rhs"]))?;
        let operator = caps["op"].chars().next().unwrap_or('+');
        return Ok(Expression::ComplexBinary { lhs, operator, rhs });
    }

    if let Some(caps) = REAL_BINARY.captures(&expr) {
        return Ok(Expression::RealBinary {
            lhs: Operand::parse(&caps["lhs"])?,
            operator: caps["op"].to_string(),
            rhs: Operand::parse(&caps["rhs"])?,
        });
    }

    // No shape matched
    Err(CalcError::parse(format!("unrecognized expression '{}'", expr)))
}

fn strip_spaces(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}
