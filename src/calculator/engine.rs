//! Operator and function dispatch.
//!
//! The [`Calculator`] owns two lookup tables built once in [`Calculator::new`]:
//! binary operators keyed by symbol, and unary functions keyed by lowercase
//! name. Complex support (`+c -c *c /c`, `abs_c`, `real`, `imag`) is
//! registered into the same tables at construction.

use super::value::{Operand, OperandKind};
use crate::error::{CalcError, Result};
use num_complex::Complex64;
use std::collections::HashMap;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

#[derive(Clone, Copy, Debug)]
struct OperatorEntry {
    op: BinaryOp,
    kind: OperandKind,
}

/// Implementation of a unary function, typed by the operand kind it accepts.
#[derive(Clone, Copy)]
enum FunctionImpl {
    Real(fn(f64) -> f64),
    /// Accepts either kind.
    Any(fn(Operand) -> Operand),
    /// Complex input, real output.
    Complex(fn(Complex64) -> f64),
}

#[derive(Clone, Copy)]
struct FunctionEntry {
    imp: FunctionImpl,
    validator: fn(&Operand) -> bool,
    message: &'static str,
}

/// Stateless calculator holding the operator and function tables.
pub struct Calculator {
    operators: HashMap<&'static str, OperatorEntry>,
    functions: HashMap<&'static str, FunctionEntry>,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    pub fn new() -> Self {
        let mut operators = HashMap::new();
        for (symbol, op) in [
            ("+", BinaryOp::Add),
            ("-", BinaryOp::Sub),
            ("*", BinaryOp::Mul),
            ("/", BinaryOp::Div),
            ("%", BinaryOp::Rem),
            ("^", BinaryOp::Pow),
        ] {
            operators.insert(
                symbol,
                OperatorEntry {
                    op,
                    kind: OperandKind::Real,
                },
            );
        }

        let mut functions = HashMap::new();
        functions.insert(
            "sqrt",
            FunctionEntry {
                imp: FunctionImpl::Real(f64::sqrt),
                validator: |v| v.as_real().is_some_and(|x| x >= 0.0),
                message: "square root requires a non-negative real number",
            },
        );
        functions.insert(
            "sin",
            FunctionEntry {
                imp: FunctionImpl::Real(|deg| deg.to_radians().sin()),
                validator: is_real,
                message: "angle must be a real number of degrees",
            },
        );
        functions.insert(
            "cos",
            FunctionEntry {
                imp: FunctionImpl::Real(|deg| deg.to_radians().cos()),
                validator: is_real,
                message: "angle must be a real number of degrees",
            },
        );
        functions.insert(
            "tan",
            FunctionEntry {
                imp: FunctionImpl::Real(|deg| deg.to_radians().tan()),
                validator: |v| v.as_real().is_some_and(|x| x % 90.0 != 0.0),
                message: "angle must not be a multiple of 90 degrees",
            },
        );
        functions.insert(
            "log",
            FunctionEntry {
                imp: FunctionImpl::Real(f64::ln),
                validator: is_positive_real,
                message: "logarithm requires a positive real number",
            },
        );
        functions.insert(
            "log10",
            FunctionEntry {
                imp: FunctionImpl::Real(f64::log10),
                validator: is_positive_real,
                message: "logarithm requires a positive real number",
            },
        );
        functions.insert(
            "abs",
            FunctionEntry {
                imp: FunctionImpl::Any(|v| match v {
                    Operand::Real(x) => Operand::Real(x.abs()),
                    Operand::Complex(z) => Operand::Real(z.norm()),
                }),
                validator: |_| true,
                message: "",
            },
        );

        let mut calc = Self {
            operators,
            functions,
        };
        calc.register_complex();
        calc
    }

    fn register_complex(&mut self) {
        for (symbol, op) in [
            ("+c", BinaryOp::Add),
            ("-c", BinaryOp::Sub),
            ("*c", BinaryOp::Mul),
            ("/c", BinaryOp::Div),
        ] {
            self.operators.insert(
                symbol,
                OperatorEntry {
                    op,
                    kind: OperandKind::Complex,
                },
            );
        }

        let complex_functions: [(&'static str, fn(Complex64) -> f64); 3] = [
            ("abs_c", Complex64::norm),
            ("real", |z| z.re),
            ("imag", |z| z.im),
        ];
        for (name, imp) in complex_functions {
            self.functions.insert(
                name,
                FunctionEntry {
                    imp: FunctionImpl::Complex(imp),
                    validator: |v| v.kind() == OperandKind::Complex,
                    message: "complex number required",
                },
            );
        }
    }

    /// Apply the binary operator `operator` to `a` and `b`.
    ///
    /// Complex-suffixed operators widen both operands to complex. A plain
    /// operator given a complex operand is dispatched to its complex
    /// counterpart; `%` has none and is rejected.
    pub fn calculate(&self, a: Operand, b: Operand, operator: &str) -> Result<Operand> {
        let entry = self
            .operators
            .get(operator)
            .copied()
            .ok_or_else(|| CalcError::UnsupportedOperator(operator.to_string()))?;

        let complex = entry.kind == OperandKind::Complex
            || a.kind() == OperandKind::Complex
            || b.kind() == OperandKind::Complex;

        debug!(operator, ?a, ?b, complex, "calculate");

        if b.is_zero() {
            match entry.op {
                BinaryOp::Div => return Err(CalcError::DivisionByZero),
                BinaryOp::Rem => return Err(CalcError::ModuloByZero),
                _ => {}
            }
        }

        if complex {
            return complex_op(entry.op, a.to_complex(), b.to_complex(), operator);
        }

        // Both operands are real here.
        let (x, y) = (a.to_complex().re, b.to_complex().re);
        Ok(match entry.op {
            BinaryOp::Add => Operand::Real(x + y),
            BinaryOp::Sub => Operand::Real(x - y),
            BinaryOp::Mul => Operand::Real(x * y),
            BinaryOp::Div => Operand::Real(x / y),
            BinaryOp::Rem => Operand::Real(floored_rem(x, y)),
            BinaryOp::Pow => real_pow(x, y),
        })
    }

    /// Apply the function `name` (case-insensitive) to `value`.
    ///
    /// Trigonometric functions take degrees.
    pub fn process_function(&self, name: &str, value: Operand) -> Result<Operand> {
        let key = name.to_lowercase();
        let entry = self
            .functions
            .get(key.as_str())
            .copied()
            .ok_or_else(|| CalcError::UnsupportedFunction(name.to_string()))?;

        if !(entry.validator)(&value) {
            return Err(CalcError::validation(key, entry.message));
        }

        debug!(function = %key, ?value, "process_function");

        match (entry.imp, value) {
            (FunctionImpl::Real(f), Operand::Real(x)) => Ok(Operand::Real(f(x))),
            (FunctionImpl::Complex(f), Operand::Complex(z)) => Ok(Operand::Real(f(z))),
            (FunctionImpl::Any(f), v) => Ok(f(v)),
            _ => Err(CalcError::validation(key, entry.message)),
        }
    }

    /// Supported function names, sorted.
    pub fn function_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.functions.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Supported operator symbols, sorted.
    pub fn operator_symbols(&self) -> Vec<&'static str> {
        let mut symbols: Vec<_> = self.operators.keys().copied().collect();
        symbols.sort_unstable();
        symbols
    }
}

fn is_real(value: &Operand) -> bool {
    value.kind() == OperandKind::Real
}

fn is_positive_real(value: &Operand) -> bool {
    value.as_real().is_some_and(|x| x > 0.0)
}

fn complex_op(op: BinaryOp, a: Complex64, b: Complex64, symbol: &str) -> Result<Operand> {
    let z = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => a / b,
        BinaryOp::Pow => a.powc(b),
        BinaryOp::Rem => {
            return Err(CalcError::validation(
                symbol,
                "modulo is not defined for complex numbers",
            ));
        }
    };
    Ok(Operand::Complex(z))
}

/// Remainder whose sign follows the divisor.
fn floored_rem(x: f64, y: f64) -> f64 {
    let r = x % y;
    if r != 0.0 && (r < 0.0) != (y < 0.0) {
        r + y
    } else {
        r
    }
}

/// Real exponentiation. A negative base with a non-integer exponent has no
/// real result, so the principal complex value is returned instead.
fn real_pow(base: f64, exponent: f64) -> Operand {
    if base < 0.0 && exponent.fract() != 0.0 && exponent.is_finite() {
        Operand::Complex(Complex64::new(base, 0.0).powf(exponent))
    } else {
        Operand::Real(base.powf(exponent))
    }
}
