//! Expression evaluation.
//!
//! Ties the parser to the [`Calculator`] and formats results for display
//! and for the history log.

use super::engine::Calculator;
use super::parser::{Expression, parse};
use super::value::Operand;
use crate::error::Result;

/// Result of evaluating a calculator expression.
#[derive(Clone, Debug, PartialEq)]
pub struct CalcResult {
    /// The classified expression.
    pub expression: Expression,
    /// The numeric value.
    pub value: Operand,
    /// Formatted for display (6 significant digits).
    pub display_result: String,
    /// Human-readable description stored in the history.
    pub record: String,
}

impl CalcResult {
    /// Get the display string.
    pub fn display(&self) -> &str {
        &self.display_result
    }

    /// Whether the value is a finite number (both parts, for complex values).
    pub fn is_finite(&self) -> bool {
        match self.value {
            Operand::Real(x) => x.is_finite(),
            Operand::Complex(z) => z.re.is_finite() && z.im.is_finite(),
        }
    }
}

/// Parse and evaluate a single line of input.
pub fn evaluate_expression(calc: &Calculator, input: &str) -> Result<CalcResult> {
    let expression = parse(input)?;

    let (value, described) = match &expression {
        Expression::Function { name, arg } => {
            let value = calc.process_function(name, *arg)?;
            (value, format!("{}({})", name, arg))
        }
        Expression::ComplexBinary { lhs, operator, rhs } => {
            let symbol = format!("{}c", operator);
            let value = calc.calculate(*lhs, *rhs, &symbol)?;
            (value, format!("({}){}({})", lhs, operator, rhs))
        }
        Expression::RealBinary { lhs, operator, rhs } => {
            let value = calc.calculate(*lhs, *rhs, operator)?;
            (value, format!("{}{}{}", lhs, operator, rhs))
        }
    };

    let display_result = value.to_string();
    let record = format!("{} = {}", described, display_result);

    Ok(CalcResult {
        expression,
        value,
        display_result,
        record,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CalcError, ErrorKind};

    #[test]
    fn test_basic_evaluation() {
        let calc = Calculator::new();
        let result = evaluate_expression(&calc, "3+5").unwrap();
        assert_eq!(result.value, Operand::Real(8.0));
        assert_eq!(result.display(), "8");
        assert_eq!(result.record, "3+5 = 8");
    }

    #[test]
    fn test_function_evaluation() {
        let calc = Calculator::new();
        let result = evaluate_expression(&calc, "sin(30)").unwrap();
        let Operand::Real(x) = result.value else {
            panic!("expected real result");
        };
        assert!((x - 0.5).abs() < 1e-9);
        assert_eq!(result.display(), "0.5");
        assert_eq!(result.record, "sin(30) = 0.5");
    }

    #[test]
    fn test_complex_binary_evaluation() {
        let calc = Calculator::new();
        let result = evaluate_expression(&calc, "(1+2j)*(3-1j)").unwrap();
        assert_eq!(result.value, Operand::complex(5.0, 5.0));
        assert_eq!(result.display(), "5+5j");
        assert_eq!(result.record, "(1+2j)*(3-1j) = 5+5j");
    }

    #[test]
    fn test_decimal_result() {
        let calc = Calculator::new();
        let result = evaluate_expression(&calc, "1 / 3").unwrap();
        assert_eq!(result.display(), "0.333333");
    }

    #[test]
    fn test_errors_propagate() {
        let calc = Calculator::new();
        assert_eq!(
            evaluate_expression(&calc, "1/0").unwrap_err(),
            CalcError::DivisionByZero
        );
        assert_eq!(
            evaluate_expression(&calc, "sqrt(-4)").unwrap_err().kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            evaluate_expression(&calc, "foo(1)").unwrap_err().kind(),
            ErrorKind::UnsupportedSymbol
        );
        assert_eq!(
            evaluate_expression(&calc, "2 +* 2").unwrap_err().kind(),
            ErrorKind::Parse
        );
    }

    #[test]
    fn test_overflow_is_reported_as_non_finite() {
        let calc = Calculator::new();
        let result = evaluate_expression(&calc, "1e308*10").unwrap();
        assert!(!result.is_finite());
        assert_eq!(result.display(), "inf");
    }
}
