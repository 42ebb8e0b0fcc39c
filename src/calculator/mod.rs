//! Calculator module for evaluating mathematical expressions.
//!
//! This module provides functionality to:
//! - Parse real and complex numeric literals
//! - Classify input into function calls and binary operations
//! - Dispatch to the operator and function tables
//! - Format results for display and history

mod engine;
mod evaluation;
mod parser;
mod value;

pub use engine::Calculator;
pub use evaluation::{CalcResult, evaluate_expression};
pub use parser::{Expression, normalize, parse};
pub use value::{Operand, OperandKind, format_general};
