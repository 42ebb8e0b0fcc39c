//! Numeric operands and literal parsing.
//!
//! A literal is real unless it carries an imaginary marker (`j` or `J`),
//! in which case it is parsed as a complex number. Accepted forms:
//! - `3`, `-2.5`, `1e-3` (real)
//! - `2j`, `-j`, `1.5e2j` (pure imaginary)
//! - `1+2j`, `3-1j`, `1e2+j` (real part followed by signed imaginary part)

use crate::error::{CalcError, Result};
use lazy_static::lazy_static;
use num_complex::Complex64;
use regex::Regex;
use std::fmt;

/// Unsigned real literal: digits, optional fraction, optional exponent.
pub(crate) const REAL_LITERAL: &str = r"\d+(?:\.\d+)?(?:[eE][+-]?\d+)?";

lazy_static! {
    static ref COMPLEX_LITERAL: Regex = Regex::new(&format!(
        r"^(?:(?P<re>[+-]?{r})(?P<im>[+-](?:{r})?)[jJ]|(?P<pure>[+-]?(?:{r})?)[jJ]|(?P<real>[+-]?{r}))$",
        r = REAL_LITERAL
    ))
    .unwrap();
}

/// Whether an operand is real or complex.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperandKind {
    Real,
    Complex,
}

/// A parsed numeric value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Operand {
    Real(f64),
    Complex(Complex64),
}

impl Operand {
    pub fn complex(re: f64, im: f64) -> Self {
        Self::Complex(Complex64::new(re, im))
    }

    pub fn kind(&self) -> OperandKind {
        match self {
            Self::Real(_) => OperandKind::Real,
            Self::Complex(_) => OperandKind::Complex,
        }
    }

    /// Widen to a complex number; real values get a zero imaginary part.
    pub fn to_complex(self) -> Complex64 {
        match self {
            Self::Real(x) => Complex64::new(x, 0.0),
            Self::Complex(z) => z,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            Self::Real(x) => Some(*x),
            Self::Complex(_) => None,
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Self::Real(x) => *x == 0.0,
            Self::Complex(z) => z.re == 0.0 && z.im == 0.0,
        }
    }

    /// Parse a single numeric literal (see module docs for accepted forms).
    pub fn parse(text: &str) -> Result<Self> {
        let caps = COMPLEX_LITERAL
            .captures(text)
            .ok_or_else(|| CalcError::parse(format!("invalid number '{}'", text)))?;

        if let Some(real) = caps.name("real") {
            return Ok(Self::Real(parse_f64(real.as_str())?));
        }
        if let Some(pure) = caps.name("pure") {
            return Ok(Self::complex(0.0, parse_imaginary(pure.as_str())?));
        }

        // Both groups are present whenever the first alternative matched.
        match (caps.name("re"), caps.name("im")) {
            (Some(re), Some(im)) => Ok(Self::complex(
                parse_f64(re.as_str())?,
                parse_imaginary(im.as_str())?,
            )),
            _ => Err(CalcError::parse(format!("invalid number '{}'", text))),
        }
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<Complex64> for Operand {
    fn from(value: Complex64) -> Self {
        Self::Complex(value)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Real(x) => write!(f, "{}", format_general(*x, 6)),
            Self::Complex(z) => {
                let sign = if z.im.is_sign_negative() { '-' } else { '+' };
                write!(
                    f,
                    "{}{}{}j",
                    format_general(z.re, 6),
                    sign,
                    format_general(z.im.abs(), 6)
                )
            }
        }
    }
}

fn parse_f64(text: &str) -> Result<f64> {
    text.parse::<f64>()
        .map_err(|e| CalcError::parse(format!("invalid number '{}': {}", text, e)))
}

/// Imaginary coefficient; a bare sign (or nothing) stands for 1.
fn parse_imaginary(text: &str) -> Result<f64> {
    match text {
        "" | "+" => Ok(1.0),
        "-" => Ok(-1.0),
        _ => parse_f64(text),
    }
}

/// Format a number with `precision` significant digits, switching to
/// scientific notation for very large or very small magnitudes and
/// dropping trailing zeros.
pub fn format_general(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_positive() { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let precision = precision.max(1);
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_real_literals() {
        assert_eq!(Operand::parse("3").unwrap(), Operand::Real(3.0));
        assert_eq!(Operand::parse("-2.5").unwrap(), Operand::Real(-2.5));
        assert_eq!(Operand::parse("+1e-3").unwrap(), Operand::Real(0.001));
        assert_eq!(Operand::parse("2.5E3").unwrap(), Operand::Real(2500.0));
    }

    #[test]
    fn test_parse_complex_literals() {
        assert_eq!(Operand::parse("2j").unwrap(), Operand::complex(0.0, 2.0));
        assert_eq!(Operand::parse("-j").unwrap(), Operand::complex(0.0, -1.0));
        assert_eq!(Operand::parse("1+2j").unwrap(), Operand::complex(1.0, 2.0));
        assert_eq!(Operand::parse("3-1j").unwrap(), Operand::complex(3.0, -1.0));
        assert_eq!(Operand::parse("1e2+J").unwrap(), Operand::complex(100.0, 1.0));
        assert_eq!(Operand::parse("1+0j").unwrap().kind(), OperandKind::Complex);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for text in ["", "abc", "1.", ".5", "1e", "1++2j", "2jj", "1 2"] {
            let err = Operand::parse(text).unwrap_err();
            assert!(matches!(err, CalcError::Parse(_)), "{text:?} -> {err:?}");
        }
    }

    #[test]
    fn test_format_general() {
        assert_eq!(format_general(8.0, 6), "8");
        assert_eq!(format_general(0.5, 6), "0.5");
        assert_eq!(format_general(1.0 / 3.0, 6), "0.333333");
        assert_eq!(format_general(212.0, 6), "212");
        assert_eq!(format_general(273.15, 6), "273.15");
        assert_eq!(format_general(1234567.0, 6), "1.23457e+06");
        assert_eq!(format_general(0.00001, 6), "1e-05");
        assert_eq!(format_general(-42.125, 6), "-42.125");
        assert_eq!(format_general(f64::INFINITY, 6), "inf");
    }

    #[test]
    fn test_display_complex() {
        assert_eq!(Operand::complex(5.0, 5.0).to_string(), "5+5j");
        assert_eq!(Operand::complex(3.0, -1.0).to_string(), "3-1j");
        assert_eq!(Operand::Real(2.5).to_string(), "2.5");
    }
}
