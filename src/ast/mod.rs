//! Abstract syntax tree for translation expressions
//!
//! Lightweight node types produced by the parser and consumed by the
//! evaluator and the identifier walk.

mod expression;

pub use expression::*;
