use crate::errors::errors::{Error, ErrorKind};

use super::source::CharSource;
use super::tokens::{NumberKind, Token, TokenKind, TokenValue, KEYWORDS, VALID_OPERATORS};

/// Hand-rolled state machine over a character source. Dispatches on the
/// first character of each token and keeps track of the expression-nesting
/// depth so tokens inside parentheses can carry the raw captured text.
pub struct Lexer<'a> {
    source: &'a mut dyn CharSource,
    tokens: Vec<Token>,
    current_expression_count: i32,
    parentheses_buffer: String,
}

fn is_operator_char(c: char) -> bool {
    matches!(
        c,
        '+' | '-'
            | '*'
            | '/'
            | '>'
            | '<'
            | '^'
            | '%'
            | '!'
            | '='
            | '~'
            | '|'
            | '&'
            | '('
            | '['
            | '.'
            | ','
            | '?'
    )
}

// These never combine into a multi-character operator.
fn op_treated_as_one(c: char) -> bool {
    matches!(c, '(' | '[' | ',' | '.' | '*' | '?')
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a mut dyn CharSource) -> Self {
        Lexer {
            source,
            tokens: Vec::new(),
            current_expression_count: 0,
            parentheses_buffer: String::new(),
        }
    }

    fn next_char(&mut self) -> Option<char> {
        let c = self.source.next_char();
        if self.current_expression_count > 0 {
            if let Some(c) = c {
                self.parentheses_buffer.push(c);
            }
        }
        c
    }

    fn peek_char(&mut self) -> Option<char> {
        self.source.peek_char()
    }

    fn push_char(&mut self, c: char) {
        self.source.push_char(c);
        if self.current_expression_count > 0 {
            self.parentheses_buffer.pop();
        }
    }

    fn make_token(&self, kind: TokenKind, value: TokenValue) -> Token {
        Token {
            kind,
            value,
            pos: self.source.pos(),
            whitespace: false,
            between_brackets: if self.current_expression_count > 0 {
                Some(self.parentheses_buffer.clone())
            } else {
                None
            },
        }
    }

    fn new_expression(&mut self) {
        self.current_expression_count += 1;
        if self.current_expression_count == 1 {
            self.parentheses_buffer.clear();
        }
    }

    fn finish_expression(&mut self) -> Result<(), Error> {
        self.current_expression_count -= 1;
        if self.current_expression_count < 0 {
            return Err(Error::new(
                ErrorKind::UnmatchedClosingBracket,
                self.source.pos(),
            ));
        }
        Ok(())
    }

    fn read_next_token(&mut self) -> Result<Option<Token>, Error> {
        let c = match self.peek_char() {
            Some(c) => c,
            None => return Ok(None),
        };

        let token = match c {
            '0'..='9' => self.make_number_token()?,
            // A lone `b`/`x` right after a bare `0` re-interprets the zero
            // as a base prefix; anything else falls through to identifiers.
            'x' | 'b' => self.make_special_number_token()?,
            'a'..='z' | 'A'..='Z' | '_' => self.make_identifier_or_keyword(),
            '/' => return self.handle_slash(),
            c if is_operator_char(c) => self.make_operator_or_string()?,
            '"' => self.make_string_token('"', '"'),
            '\'' => self.make_quote_token()?,
            ' ' | '\t' => return self.handle_whitespace(),
            '\n' => self.make_newline_token(),
            '{' | '}' | ':' | ';' | '#' | '\\' | ')' | ']' => self.make_symbol_token()?,
            _ => {
                return Err(Error::new(
                    ErrorKind::UnexpectedCharacter { character: c },
                    self.source.pos(),
                ))
            }
        };

        Ok(Some(token))
    }

    fn handle_whitespace(&mut self) -> Result<Option<Token>, Error> {
        if let Some(last_token) = self.tokens.last_mut() {
            last_token.whitespace = true;
        }
        self.next_char();
        self.read_next_token()
    }

    fn read_number_kind(&mut self) -> NumberKind {
        match self.peek_char() {
            Some('L') => {
                self.next_char();
                NumberKind::Long
            }
            Some('f') => {
                self.next_char();
                NumberKind::Float
            }
            _ => NumberKind::Normal,
        }
    }

    fn make_number_token(&mut self) -> Result<Token, Error> {
        let mut digits = String::new();
        while let Some(c) = self.peek_char() {
            if !c.is_ascii_digit() {
                break;
            }
            digits.push(c);
            self.next_char();
        }

        let value = digits.parse::<u64>().map_err(|_| {
            Error::new(
                ErrorKind::NumberOutOfRange {
                    token: digits.clone(),
                },
                self.source.pos(),
            )
        })?;
        let kind = self.read_number_kind();
        Ok(self.make_token(TokenKind::Number, TokenValue::Num { value, kind }))
    }

    fn make_special_number_token(&mut self) -> Result<Token, Error> {
        // Only a previously emitted bare `0` turns `x`/`b` into a base
        // prefix; otherwise this is the start of an identifier.
        let after_zero = match self.tokens.last() {
            Some(token) => {
                token.kind == TokenKind::Number
                    && matches!(
                        token.value,
                        TokenValue::Num {
                            value: 0,
                            kind: NumberKind::Normal
                        }
                    )
            }
            None => false,
        };
        if !after_zero {
            return Ok(self.make_identifier_or_keyword());
        }

        self.tokens.pop();
        match self.peek_char() {
            Some('x') => self.make_hexadecimal_number_token(),
            Some('b') => self.make_binary_number_token(),
            _ => Ok(self.make_identifier_or_keyword()),
        }
    }

    fn make_hexadecimal_number_token(&mut self) -> Result<Token, Error> {
        self.next_char(); // the `x`

        let mut digits = String::new();
        while let Some(c) = self.peek_char() {
            if !c.is_ascii_hexdigit() {
                break;
            }
            digits.push(c);
            self.next_char();
        }

        let value = if digits.is_empty() {
            0
        } else {
            u64::from_str_radix(&digits, 16).map_err(|_| {
                Error::new(
                    ErrorKind::NumberOutOfRange {
                        token: format!("0x{}", digits),
                    },
                    self.source.pos(),
                )
            })?
        };
        let kind = self.read_number_kind();
        Ok(self.make_token(TokenKind::Number, TokenValue::Num { value, kind }))
    }

    fn make_binary_number_token(&mut self) -> Result<Token, Error> {
        self.next_char(); // the `b`

        let mut digits = String::new();
        while let Some(c) = self.peek_char() {
            if !c.is_ascii_digit() {
                break;
            }
            digits.push(c);
            self.next_char();
        }

        for c in digits.chars() {
            if c != '0' && c != '1' {
                return Err(Error::new(
                    ErrorKind::InvalidBinaryDigit { digit: c },
                    self.source.pos(),
                ));
            }
        }

        let value = if digits.is_empty() {
            0
        } else {
            u64::from_str_radix(&digits, 2).map_err(|_| {
                Error::new(
                    ErrorKind::NumberOutOfRange {
                        token: format!("0b{}", digits),
                    },
                    self.source.pos(),
                )
            })?
        };
        let kind = self.read_number_kind();
        Ok(self.make_token(TokenKind::Number, TokenValue::Num { value, kind }))
    }

    fn make_identifier_or_keyword(&mut self) -> Token {
        let mut buffer = String::new();
        while let Some(c) = self.peek_char() {
            if !c.is_ascii_alphanumeric() && c != '_' {
                break;
            }
            buffer.push(c);
            self.next_char();
        }

        let kind = if KEYWORDS.contains(buffer.as_str()) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        self.make_token(kind, TokenValue::Str(buffer))
    }

    fn read_op(&mut self) -> Result<String, Error> {
        let first = match self.next_char() {
            Some(c) => c,
            None => return Err(Error::new(ErrorKind::UnexpectedEndOfInput, self.source.pos())),
        };

        let mut op = String::from(first);
        let mut single_operator = true;

        if first == '.' && self.peek_char() == Some('.') {
            // `...` is the only operator reaching three characters; a lone
            // `..` flushes back below and leaves two `.` tokens.
            op.push('.');
            self.next_char();
            single_operator = false;
            if self.peek_char() == Some('.') {
                op.push('.');
                self.next_char();
            }
        } else if !op_treated_as_one(first) {
            if let Some(second) = self.peek_char() {
                if is_operator_char(second) {
                    op.push(second);
                    self.next_char();
                    single_operator = false;
                }
            }
        }

        if !single_operator && !VALID_OPERATORS.contains(op.as_str()) {
            // Flush everything but the first character back onto the source.
            while op.len() > 1 {
                if let Some(c) = op.pop() {
                    self.push_char(c);
                }
            }
        }

        if !VALID_OPERATORS.contains(op.as_str()) {
            return Err(Error::new(
                ErrorKind::InvalidOperator { operator: op },
                self.source.pos(),
            ));
        }

        Ok(op)
    }

    fn make_operator_or_string(&mut self) -> Result<Token, Error> {
        // `#include <...>` switches `<` into a string delimiter.
        if self.peek_char() == Some('<') {
            let after_include = self
                .tokens
                .last()
                .map_or(false, |token| token.is_keyword("include"));
            if after_include {
                return Ok(self.make_string_token('<', '>'));
            }
        }

        let op = self.read_op()?;
        let token = self.make_token(TokenKind::Operator, TokenValue::Str(op.clone()));
        if op == "(" {
            self.new_expression();
        }
        Ok(token)
    }

    fn make_string_token(&mut self, _start_delim: char, end_delim: char) -> Token {
        self.next_char(); // opening delimiter

        let mut buffer = String::new();
        while let Some(c) = self.next_char() {
            if c == end_delim {
                break;
            }
            if c == '\\' {
                // Skip the backslash, take the next character verbatim.
                if let Some(escaped) = self.next_char() {
                    buffer.push(escaped);
                }
                continue;
            }
            buffer.push(c);
        }

        self.make_token(TokenKind::String, TokenValue::Str(buffer))
    }

    fn make_quote_token(&mut self) -> Result<Token, Error> {
        self.next_char(); // opening quote

        let mut c = match self.next_char() {
            Some(c) => c,
            None => {
                return Err(Error::new(
                    ErrorKind::UnterminatedCharLiteral,
                    self.source.pos(),
                ))
            }
        };
        if c == '\\' {
            let escaped = match self.next_char() {
                Some(escaped) => escaped,
                None => {
                    return Err(Error::new(
                        ErrorKind::UnterminatedCharLiteral,
                        self.source.pos(),
                    ))
                }
            };
            c = match escaped {
                'n' => '\n',
                't' => '\t',
                '\\' => '\\',
                '\'' => '\'',
                other => other,
            };
        }

        if self.next_char() != Some('\'') {
            return Err(Error::new(
                ErrorKind::UnterminatedCharLiteral,
                self.source.pos(),
            ));
        }

        Ok(self.make_token(TokenKind::Number, TokenValue::Char(c)))
    }

    fn handle_slash(&mut self) -> Result<Option<Token>, Error> {
        self.next_char(); // the `/`

        let token = match self.peek_char() {
            Some('/') => {
                self.next_char();
                self.make_line_comment()
            }
            Some('*') => {
                self.next_char();
                self.make_block_comment()?
            }
            _ => {
                // Just a division operator after all.
                self.push_char('/');
                self.make_operator_or_string()?
            }
        };

        Ok(Some(token))
    }

    fn make_line_comment(&mut self) -> Token {
        let mut buffer = String::new();
        while let Some(c) = self.peek_char() {
            if c == '\n' {
                break;
            }
            buffer.push(c);
            self.next_char();
        }
        self.make_token(TokenKind::Comment, TokenValue::Str(buffer))
    }

    fn make_block_comment(&mut self) -> Result<Token, Error> {
        let mut buffer = String::new();
        loop {
            match self.next_char() {
                None => {
                    return Err(Error::new(
                        ErrorKind::UnterminatedBlockComment,
                        self.source.pos(),
                    ))
                }
                Some('*') => {
                    if self.peek_char() == Some('/') {
                        self.next_char();
                        break;
                    }
                    buffer.push('*');
                }
                Some(c) => buffer.push(c),
            }
        }
        Ok(self.make_token(TokenKind::Comment, TokenValue::Str(buffer)))
    }

    fn make_newline_token(&mut self) -> Token {
        self.next_char();
        self.make_token(TokenKind::Newline, TokenValue::Char('\n'))
    }

    fn make_symbol_token(&mut self) -> Result<Token, Error> {
        let c = match self.next_char() {
            Some(c) => c,
            None => return Err(Error::new(ErrorKind::UnexpectedEndOfInput, self.source.pos())),
        };
        if c == ')' {
            self.finish_expression()?;
        }
        Ok(self.make_token(TokenKind::Symbol, TokenValue::Char(c)))
    }
}

/// Produces the ordered, exhaustive token sequence for a whole source, or
/// the first lexical error hit. The sequence itself is a valid artifact for
/// tooling and tests, not just parser input.
pub fn tokenize(source: &mut dyn CharSource) -> Result<Vec<Token>, Error> {
    let mut lexer = Lexer::new(source);

    while let Some(token) = lexer.read_next_token()? {
        lexer.tokens.push(token);
    }

    Ok(lexer.tokens)
}
