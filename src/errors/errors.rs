use std::fmt::Display;

use thiserror::Error;

use crate::Pos;

/// A fatal front-end error: the taxonomy kind plus the source position it
/// was raised at. Lexical and parse errors abort the whole compilation;
/// there is no recovery and no partial AST.
#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorKind,
    position: Pos,
}

impl Error {
    pub fn new(error_kind: ErrorKind, position: Pos) -> Self {
        Error {
            internal_error: error_kind,
            position,
        }
    }

    pub fn get_position(&self) -> &Pos {
        &self.position
    }

    pub fn get_kind(&self) -> &ErrorKind {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorKind::UnexpectedCharacter { .. } => "UnexpectedCharacter",
            ErrorKind::UnterminatedCharLiteral => "UnterminatedCharLiteral",
            ErrorKind::UnterminatedBlockComment => "UnterminatedBlockComment",
            ErrorKind::InvalidBinaryDigit { .. } => "InvalidBinaryDigit",
            ErrorKind::NumberOutOfRange { .. } => "NumberOutOfRange",
            ErrorKind::InvalidOperator { .. } => "InvalidOperator",
            ErrorKind::UnmatchedClosingBracket => "UnmatchedClosingBracket",
            ErrorKind::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorKind::UnexpectedEndOfInput => "UnexpectedEndOfInput",
            ErrorKind::UnexpectedSecondaryDatatype { .. } => "UnexpectedSecondaryDatatype",
            ErrorKind::UnsupportedDeclaration { .. } => "UnsupportedDeclaration",
            ErrorKind::FailedToReadFile { .. } => "FailedToReadFile",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorKind::UnexpectedCharacter { .. } => ErrorTip::None,
            ErrorKind::UnterminatedCharLiteral => ErrorTip::Suggestion(String::from(
                "Character literals must be closed with a matching `'`",
            )),
            ErrorKind::UnterminatedBlockComment => ErrorTip::Suggestion(String::from(
                "Block comments must be closed with `*/` before the end of the file",
            )),
            ErrorKind::InvalidBinaryDigit { digit } => ErrorTip::Suggestion(format!(
                "Binary literals may only contain 0 and 1, found `{}`",
                digit
            )),
            ErrorKind::NumberOutOfRange { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorKind::InvalidOperator { operator } => {
                ErrorTip::Suggestion(format!("`{}` is not a valid operator", operator))
            }
            ErrorKind::UnmatchedClosingBracket => ErrorTip::Suggestion(String::from(
                "A closing `)` was found with no matching `(` before it",
            )),
            ErrorKind::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorKind::UnexpectedEndOfInput => ErrorTip::None,
            ErrorKind::UnexpectedSecondaryDatatype { datatype } => ErrorTip::Suggestion(format!(
                "`{}` cannot follow this type, only float, double, short and long accept a secondary datatype",
                datatype
            )),
            ErrorKind::UnsupportedDeclaration { keyword } => ErrorTip::Suggestion(format!(
                "Declarations starting from `{}` are not handled by the front end yet",
                keyword
            )),
            ErrorKind::FailedToReadFile { .. } => ErrorTip::None,
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum ErrorKind {
    #[error("unexpected character: {character:?}")]
    UnexpectedCharacter { character: char },
    #[error("unterminated character literal")]
    UnterminatedCharLiteral,
    #[error("unterminated block comment")]
    UnterminatedBlockComment,
    #[error("invalid binary digit: {digit:?}")]
    InvalidBinaryDigit { digit: char },
    #[error("number out of range: {token:?}")]
    NumberOutOfRange { token: String },
    #[error("invalid operator: {operator:?}")]
    InvalidOperator { operator: String },
    #[error("closing bracket with no matching open")]
    UnmatchedClosingBracket,
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("unexpected secondary datatype: {datatype:?}")]
    UnexpectedSecondaryDatatype { datatype: String },
    #[error("unsupported declaration: {keyword:?}")]
    UnsupportedDeclaration { keyword: String },
    #[error("failed to read file: {path:?}")]
    FailedToReadFile { path: String },
}
