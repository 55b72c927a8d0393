//! Lexical analysis module for the compiler front end.
//!
//! This module contains the lexer (tokenizer) that converts source code
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization through a hand-rolled state machine over a character source
//! - Recognition of keywords, identifiers, literals, operators and symbols
//! - Hexadecimal and binary literal forms and numeric type suffixes
//! - Token position tracking for error reporting
//! - Comment and whitespace handling, including the whitespace-follows flag
//! - Capturing the raw text between unmatched parentheses

pub mod lexer;
pub mod source;
pub mod tokens;
