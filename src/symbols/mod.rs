//! Scope and symbol management for the compiler front end.
//!
//! This module contains the lexical scope stack used while parsing
//! declarations and the symbol tables built from finished declaration
//! nodes. It handles:
//!
//! - Nested scopes with parent links and running size accounting
//! - Entity lookup walking outwards through enclosing scopes
//! - Symbol registration with non-fatal duplicate handling
//! - Saving and restoring whole symbol tables for nested units

pub mod resolver;
pub mod scope;
