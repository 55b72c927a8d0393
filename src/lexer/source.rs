use std::rc::Rc;

use crate::Pos;

/// Capability interface the lexer pulls characters through. The lexer never
/// depends on a concrete reader, only on this trait.
///
/// `push_char` follows `ungetc` semantics: a pushed-back character must be
/// the very next one returned by `next_char` or `peek_char`. One character
/// of un-consumption is all the lexer ever needs.
pub trait CharSource {
    fn next_char(&mut self) -> Option<char>;
    fn peek_char(&mut self) -> Option<char>;
    fn push_char(&mut self, c: char);
    fn pos(&self) -> Pos;
}

/// An in-memory character source over a string buffer, tracking line and
/// column as characters are consumed.
pub struct StringSource {
    chars: Vec<char>,
    index: usize,
    line: u32,
    col: u32,
    filename: Rc<String>,
}

impl StringSource {
    pub fn new(source: &str, filename: Rc<String>) -> Self {
        StringSource {
            chars: source.chars().collect(),
            index: 0,
            line: 1,
            col: 1,
            filename,
        }
    }
}

impl CharSource for StringSource {
    fn next_char(&mut self) -> Option<char> {
        let c = *self.chars.get(self.index)?;
        self.index += 1;
        if c == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(c)
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.get(self.index).copied()
    }

    fn push_char(&mut self, c: char) {
        debug_assert!(self.index > 0, "push_char with nothing consumed");
        self.index -= 1;
        self.chars[self.index] = c;
        if self.col > 1 {
            self.col -= 1;
        }
    }

    fn pos(&self) -> Pos {
        Pos::new(self.line, self.col, Rc::clone(&self.filename))
    }
}
