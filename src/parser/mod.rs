//! Parsing module for the compiler front end.
//!
//! This module contains the parser that turns the token sequence into an
//! abstract syntax tree. It handles:
//!
//! - Precedence climbing over a fixed table of operator groups
//! - Post-hoc tree rotation to repair left-operand precedence
//! - Parenthesised sub-expressions and the synthetic call-join operator
//! - Global variable declarations, datatype parsing and modifiers
//! - Registering declaration symbols as top-level nodes finish

pub mod datatype;
pub mod expr;
pub mod parser;
pub mod precedence;

#[cfg(test)]
mod tests;
