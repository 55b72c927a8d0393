//! Error types and error handling for the compiler front end.
//!
//! This module defines the error values used throughout the front end:
//!
//! - Error structures with source position information
//! - Specific error variants for the lexical and parse phases
//! - Error formatting and display functionality
//! - Helpful error messages and suggestions

pub mod errors;
