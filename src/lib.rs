//! # scicalc
//!
//! Scientific calculator core: expression parsing and evaluation over real
//! and complex numbers, unit conversion, and a bounded calculation history.
//!
//! Accepted input:
//! - function calls: `sin(30)`, `sqrt 16`, `abs_c(3+4j)` (angles in degrees)
//! - binary operations: `3+5`, `2.5e3 * -1.5`, `7 % 3`, `2 ^ 10`
//! - complex operations: `(1+2j)*(3-1j)`, `1 +c 2j`
//! - unit conversions: `100 km to m`, `32 F in C`

pub mod calculator;
pub mod config;
pub mod error;
pub mod history;
pub mod shell;
pub mod units;

pub use calculator::{CalcResult, Calculator, Expression, Operand, evaluate_expression};
pub use error::{CalcError, ErrorKind, Result};
pub use history::History;
pub use units::convert;
