use crate::ast::node::{NodeId, NodeKind};
use crate::errors::errors::{Error, ErrorKind};
use crate::lexer::tokens::{Token, TokenKind};
use crate::process::CompileProcess;

use super::datatype::parse_keyword_for_global;
use super::expr::parse_expressionable;

/// Set while parsing a declaration's initializer, where a top-level `,`
/// separates declarators instead of acting as the comma operator.
pub const HISTORY_FLAG_IN_DECLARATION: u32 = 0b10;

/// Flags carried down through recursive parse calls. Copied, never
/// shared: each sub-parse gets its own view of the surrounding context.
#[derive(Debug, Clone, Copy)]
pub struct History {
    pub flags: u32,
}

impl History {
    pub fn new(flags: u32) -> Self {
        History { flags }
    }

    /// A copy for a nested parse.
    pub fn down(&self) -> Self {
        *self
    }

    pub fn with(&self, flags: u32) -> Self {
        History {
            flags: self.flags | flags,
        }
    }

    pub fn without(&self, flags: u32) -> Self {
        History {
            flags: self.flags & !flags,
        }
    }

    pub fn has(&self, flags: u32) -> bool {
        self.flags & flags != 0
    }
}

/// Cursor over the token sequence. Newlines, comments and line
/// continuations are skipped transparently.
pub struct Parser<'a> {
    pub process: &'a mut CompileProcess,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn skip_nl_or_comment(&mut self) {
        while self
            .process
            .tokens
            .get(self.pos)
            .map_or(false, |token| token.is_newline_or_comment())
        {
            self.pos += 1;
        }
    }

    pub fn peek_next(&mut self) -> Option<&Token> {
        self.skip_nl_or_comment();
        self.process.tokens.get(self.pos)
    }

    /// Consumes the next visible token, recording its position as the
    /// process position for error reporting.
    pub fn next_token(&mut self) -> Option<Token> {
        self.skip_nl_or_comment();
        let token = self.process.tokens.get(self.pos)?.clone();
        self.process.pos = token.pos.clone();
        self.pos += 1;
        Some(token)
    }

    pub fn next_is_op(&mut self, op: &str) -> bool {
        self.peek_next().map_or(false, |token| token.is_operator(op))
    }

    pub fn next_is_symbol(&mut self, symbol: char) -> bool {
        self.peek_next().map_or(false, |token| token.is_symbol(symbol))
    }

    pub fn expect_op(&mut self, op: &str) -> Result<Token, Error> {
        let token = match self.next_token() {
            Some(token) => token,
            None => {
                return Err(Error::new(
                    ErrorKind::UnexpectedEndOfInput,
                    self.process.pos.clone(),
                ))
            }
        };
        if !token.is_operator(op) {
            return Err(Error::new(
                ErrorKind::UnexpectedToken {
                    token: token.value.to_string(),
                },
                token.pos,
            ));
        }
        Ok(token)
    }

    pub fn expect_sym(&mut self, symbol: char) -> Result<Token, Error> {
        let token = match self.next_token() {
            Some(token) => token,
            None => {
                return Err(Error::new(
                    ErrorKind::UnexpectedEndOfInput,
                    self.process.pos.clone(),
                ))
            }
        };
        if !token.is_symbol(symbol) {
            return Err(Error::new(
                ErrorKind::UnexpectedToken {
                    token: token.value.to_string(),
                },
                token.pos,
            ));
        }
        Ok(token)
    }

    /// Parses one top-level construct, or `None` at the end of input.
    fn parse_next(&mut self) -> Result<Option<NodeId>, Error> {
        let token = match self.peek_next() {
            Some(token) => token.clone(),
            None => return Ok(None),
        };

        match token.kind {
            TokenKind::Number | TokenKind::Identifier | TokenKind::String => {
                parse_expressionable(self, History::new(0))?;
            }
            TokenKind::Keyword => {
                parse_keyword_for_global(self)?;
            }
            TokenKind::Symbol if token.is_symbol(';') => {
                self.next_token();
                self.process.nodes.create(NodeKind::Blank, token.pos);
            }
            _ => {
                return Err(Error::new(
                    ErrorKind::UnexpectedToken {
                        token: token.value.to_string(),
                    },
                    token.pos,
                ));
            }
        }

        Ok(self.process.nodes.peek_or_null())
    }
}

/// Parses the whole token sequence into top-level nodes, registering the
/// symbols each finished node declares.
pub fn parse(process: &mut CompileProcess) -> Result<(), Error> {
    let mut parser = Parser { process, pos: 0 };

    while let Some(node) = parser.parse_next()? {
        parser.process.nodes.push_result(node);
        let process = &mut *parser.process;
        process.symbols.build_for_node(&process.nodes, node);
    }

    Ok(())
}
