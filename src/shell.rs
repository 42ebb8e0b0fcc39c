//! Input handling shared by the interactive loop and one-shot mode.
//!
//! A line is either a single-letter command or something to compute: a unit
//! conversion request or a calculator expression.

use crate::calculator::{CalcResult, Calculator, evaluate_expression, normalize};
use crate::error::Result;
use crate::units::{self, ConversionResult};

/// Interactive commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    Help,
    Clear,
    History,
    /// `l <term>`: history records containing `term`.
    SearchHistory(String),
    ToggleMultiline,
}

impl Command {
    /// Recognize a command letter, ignoring case and surrounding whitespace.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if let Some((head, term)) = input.split_once(' ')
            && head.eq_ignore_ascii_case("l")
        {
            return Some(Self::SearchHistory(term.trim().to_string()));
        }

        match input.to_lowercase().as_str() {
            "q" => Some(Self::Quit),
            "h" => Some(Self::Help),
            "c" => Some(Self::Clear),
            "l" => Some(Self::History),
            "m" => Some(Self::ToggleMultiline),
            _ => None,
        }
    }
}

/// A successful computation.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Calculation(CalcResult),
    Conversion(ConversionResult),
}

impl Outcome {
    pub fn display(&self) -> &str {
        match self {
            Self::Calculation(result) => result.display(),
            Self::Conversion(result) => &result.display_result,
        }
    }

    /// Text stored in the history.
    pub fn record(&self) -> &str {
        match self {
            Self::Calculation(result) => &result.record,
            Self::Conversion(result) => &result.record,
        }
    }
}

/// Evaluate one line of input: a conversion request if it looks like one,
/// otherwise an expression.
pub fn evaluate_line(calc: &Calculator, input: &str) -> Result<Outcome> {
    let input = normalize(input);
    if let Some(request) = units::parse_request(&input) {
        return request.run().map(Outcome::Conversion);
    }
    evaluate_expression(calc, &input).map(Outcome::Calculation)
}

/// Help text listing syntax, functions, operators, units and commands.
pub fn help_text(calc: &Calculator) -> String {
    let mut help = String::new();
    help.push_str("Basic operations:   3 + 5, 2.5e3 * -1.5, 7 % 3, 2 ^ 10\n");
    help.push_str("Function calls:     sin(30), log(100), sqrt 25 (angles in degrees)\n");
    help.push_str("Complex operations: (1+2j)*(3-1j), 1 +c 2j, abs_c(3+4j)\n");
    help.push_str("Unit conversion:    100 km to m, 32 F in C\n");
    help.push_str(&format!(
        "Functions: {}\n",
        calc.function_names().join(", ")
    ));
    help.push_str(&format!(
        "Operators: {}\n",
        calc.operator_symbols().join(" ")
    ));
    for &category in units::categories() {
        help.push_str(&format!(
            "{} units: {}\n",
            category,
            units::units_in(category).join(", ")
        ));
    }
    help.push_str("Commands: q - quit  h - help  c - clear  l - history  l <text> - search history  m - multi-line");
    help
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CalcError, ErrorKind};

    #[test]
    fn test_commands() {
        assert_eq!(Command::parse("q"), Some(Command::Quit));
        assert_eq!(Command::parse(" L "), Some(Command::History));
        assert_eq!(Command::parse("M"), Some(Command::ToggleMultiline));
        assert_eq!(
            Command::parse("l sqrt"),
            Some(Command::SearchHistory("sqrt".into()))
        );
        assert_eq!(
            Command::parse("L  sin(30)"),
            Some(Command::SearchHistory("sin(30)".into()))
        );
        assert_eq!(Command::parse("quit"), None);
        assert_eq!(Command::parse("3+5"), None);
    }

    #[test]
    fn test_evaluate_expression_line() {
        let calc = Calculator::new();
        let outcome = evaluate_line(&calc, "  3   +  5 ").unwrap();
        assert!(matches!(outcome, Outcome::Calculation(_)));
        assert_eq!(outcome.display(), "8");
        assert_eq!(outcome.record(), "3+5 = 8");
    }

    #[test]
    fn test_evaluate_conversion_line() {
        let calc = Calculator::new();
        let outcome = evaluate_line(&calc, "1000 m to km").unwrap();
        assert!(matches!(outcome, Outcome::Conversion(_)));
        assert_eq!(outcome.display(), "1 km");

        let err = evaluate_line(&calc, "1 m to kg").unwrap_err();
        assert_eq!(
            err,
            CalcError::UnsupportedConversion {
                from: "m".into(),
                to: "kg".into()
            }
        );
    }

    #[test]
    fn test_bad_line_is_an_error_not_a_panic() {
        let calc = Calculator::new();
        let err = evaluate_line(&calc, "what is this").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_help_lists_everything() {
        let help = help_text(&Calculator::new());
        assert!(help.contains("log10"));
        assert!(help.contains("/c"));
        assert!(help.contains("Temperature units: C, F, K"));
        assert!(help.contains("l <text> - search history"));
    }
}
