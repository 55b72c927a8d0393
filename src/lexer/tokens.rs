use lazy_static::lazy_static;
use std::{collections::HashSet, fmt::Display};

use crate::Pos;

lazy_static! {
    pub static ref KEYWORDS: HashSet<&'static str> = {
        let mut set = HashSet::new();
        set.insert("unsigned");
        set.insert("signed");
        set.insert("char");
        set.insert("short");
        set.insert("int");
        set.insert("long");
        set.insert("float");
        set.insert("double");
        set.insert("void");
        set.insert("struct");
        set.insert("union");
        set.insert("static");
        set.insert("__ignore_typecheck__");
        set.insert("return");
        set.insert("include");
        set.insert("sizeof");
        set.insert("if");
        set.insert("else");
        set.insert("while");
        set.insert("for");
        set.insert("do");
        set.insert("break");
        set.insert("continue");
        set.insert("switch");
        set.insert("case");
        set.insert("default");
        set.insert("goto");
        set.insert("typedef");
        set.insert("const");
        set.insert("extern");
        set.insert("restrict");
        set
    };
    pub static ref PRIMITIVE_TYPES: HashSet<&'static str> = {
        let mut set = HashSet::new();
        set.insert("void");
        set.insert("char");
        set.insert("short");
        set.insert("int");
        set.insert("long");
        set.insert("float");
        set.insert("double");
        set
    };
    pub static ref VALID_OPERATORS: HashSet<&'static str> = {
        let mut set = HashSet::new();
        set.insert("+");
        set.insert("-");
        set.insert("*");
        set.insert("/");
        set.insert("%");
        set.insert("!");
        set.insert("^");
        set.insert("~");
        set.insert("?");
        set.insert("=");
        set.insert("==");
        set.insert("!=");
        set.insert(">");
        set.insert("<");
        set.insert(">=");
        set.insert("<=");
        set.insert(">>");
        set.insert("<<");
        set.insert("&&");
        set.insert("||");
        set.insert("&");
        set.insert("|");
        set.insert("(");
        set.insert("[");
        set.insert(",");
        set.insert(".");
        set.insert("...");
        set.insert("->");
        set.insert("+=");
        set.insert("-=");
        set.insert("*=");
        set.insert("/=");
        set.insert("%=");
        set.insert("&=");
        set.insert("|=");
        set.insert("^=");
        set.insert("++");
        set.insert("--");
        set
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Identifier,
    Keyword,
    Operator,
    Symbol,
    Number,
    String,
    Comment,
    Newline,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Subtype tag for numeric literals, decided by the literal's suffix.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum NumberKind {
    Normal,
    Long,
    Float,
    Double,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Char(char),
    Str(String),
    Num { value: u64, kind: NumberKind },
}

impl Display for TokenValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenValue::Char(c) => write!(f, "{}", c),
            TokenValue::Str(s) => write!(f, "{}", s),
            TokenValue::Num { value, .. } => write!(f, "{}", value),
        }
    }
}

/// One lexical unit. Tokens are immutable once produced: the lexer creates
/// them, the token sequence owns them and everything downstream only reads.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: TokenValue,
    pub pos: Pos,
    /// True when the token is directly followed by a space or tab.
    pub whitespace: bool,
    /// Snapshot of the raw text seen so far between the outermost unmatched
    /// parentheses; set only for tokens lexed at expression-nesting depth > 0.
    pub between_brackets: Option<String>,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{ kind: {}, value: {} }}", self.kind, self.value)
    }
}

impl Token {
    pub fn text(&self) -> Option<&str> {
        match &self.value {
            TokenValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text() == Some(keyword)
    }

    pub fn is_symbol(&self, symbol: char) -> bool {
        self.kind == TokenKind::Symbol && self.value == TokenValue::Char(symbol)
    }

    pub fn is_operator(&self, op: &str) -> bool {
        self.kind == TokenKind::Operator && self.text() == Some(op)
    }

    /// Newlines, comments and the backslash line-continuation symbol are all
    /// invisible to the parser's token cursor.
    pub fn is_newline_or_comment(&self) -> bool {
        self.kind == TokenKind::Newline || self.kind == TokenKind::Comment || self.is_symbol('\\')
    }

    pub fn is_primitive_keyword(&self) -> bool {
        self.kind == TokenKind::Keyword
            && self
                .text()
                .map_or(false, |text| PRIMITIVE_TYPES.contains(text))
    }
}
