//! Error types for the calculator core.

use thiserror::Error;

/// Coarse classification of a [`CalcError`], used by shells to pick how an
/// error is presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Parse,
    UnsupportedSymbol,
    Validation,
    Arithmetic,
    Conversion,
}

/// Errors raised while parsing, evaluating or converting.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CalcError {
    #[error("Malformed expression: {0}")]
    Parse(String),

    #[error("Unsupported operator: {0}")]
    UnsupportedOperator(String),

    #[error("Unsupported function: {0}")]
    UnsupportedFunction(String),

    #[error("{function}: {message}")]
    Validation { function: String, message: String },

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Modulo by zero")]
    ModuloByZero,

    #[error("Unsupported unit conversion: {from} -> {to}")]
    UnsupportedConversion { from: String, to: String },
}

impl CalcError {
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn validation(function: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            function: function.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse(_) => ErrorKind::Parse,
            Self::UnsupportedOperator(_) | Self::UnsupportedFunction(_) => {
                ErrorKind::UnsupportedSymbol
            }
            Self::Validation { .. } => ErrorKind::Validation,
            Self::DivisionByZero | Self::ModuloByZero => ErrorKind::Arithmetic,
            Self::UnsupportedConversion { .. } => ErrorKind::Conversion,
        }
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_are_distinguishable() {
        assert_eq!(CalcError::parse("x").kind(), ErrorKind::Parse);
        assert_eq!(
            CalcError::UnsupportedFunction("foo".into()).kind(),
            ErrorKind::UnsupportedSymbol
        );
        assert_eq!(
            CalcError::validation("sqrt", "negative").kind(),
            ErrorKind::Validation
        );
        assert_eq!(CalcError::ModuloByZero.kind(), ErrorKind::Arithmetic);
    }

    #[test]
    fn test_display() {
        let err = CalcError::UnsupportedConversion {
            from: "m".into(),
            to: "kg".into(),
        };
        assert_eq!(err.to_string(), "Unsupported unit conversion: m -> kg");
    }
}
