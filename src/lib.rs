#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::errors::errors::{Error, ErrorKind, ErrorTip};
use crate::lexer::lexer::tokenize;
use crate::lexer::source::StringSource;
use crate::parser::parser::parse;
use crate::process::CompileProcess;

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod parser;
pub mod process;
pub mod symbols;

/// A line/column position inside a source file. Lines and columns are
/// 1-based; a `null()` position has line 0 and no real filename.
#[derive(Debug, Clone)]
pub struct Pos {
    pub line: u32,
    pub col: u32,
    pub filename: Rc<String>,
}

impl Pos {
    pub fn new(line: u32, col: u32, filename: Rc<String>) -> Self {
        Pos {
            line,
            col,
            filename,
        }
    }

    pub fn null() -> Self {
        Pos {
            line: 0,
            col: 0,
            filename: Rc::new(String::from("<null>")),
        }
    }
}

/// Runs the whole front end over an in-memory source buffer: lexical
/// analysis, then parsing. The returned process holds the token sequence,
/// the node arena with the top-level parse result, the scope stack, the
/// symbol tables and any accumulated warnings.
pub fn compile_source(source: &str, filename: &str, flags: u32) -> Result<CompileProcess, Error> {
    let mut process = CompileProcess::new(filename, flags);
    let mut reader = StringSource::new(source, Rc::clone(&process.filename));
    process.tokens = tokenize(&mut reader)?;
    parse(&mut process)?;
    Ok(process)
}

/// Reads a file and compiles it through `compile_source`.
pub fn compile_file(path: &str, flags: u32) -> Result<CompileProcess, Error> {
    let source = std::fs::read_to_string(path).map_err(|_| {
        Error::new(
            ErrorKind::FailedToReadFile {
                path: path.to_string(),
            },
            Pos::null(),
        )
    })?;
    let filename = path.split('/').last().unwrap_or(path);
    compile_source(&source, filename, flags)
}

pub fn get_line_at(source: &str, line: u32) -> Option<&str> {
    if line == 0 {
        return None;
    }
    source.lines().nth((line - 1) as usize)
}

pub fn display_error(error: &Error, source: &str) {
    /*
        Error: name (tip)
        -> test.c:2:9
           |
         2 | int a = #;
           | --------^
    */

    let position = error.get_position();

    if let ErrorTip::None = error.get_tip() {
        println!("Error: {}", error.get_error_name());
    } else {
        println!("Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    println!("-> {}:{}:{}", position.filename, position.line, position.col);

    let line_text = match get_line_at(source, position.line) {
        Some(line_text) => line_text,
        None => return,
    };

    let line_string = position.line.to_string();
    let padding = line_string.len() + 2;
    println!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    println!("{} | {}", line_string, line_text_removed.trim_end());

    let arrows = (position.col as usize)
        .saturating_sub(removed_whitespace)
        .max(1);

    println!("{:>padding$} {:->arrows$}", "|", "^");
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_get_line_at() {
        let source = "int a;\nint b;\nint c;\n";
        assert_eq!(super::get_line_at(source, 1), Some("int a;"));
        assert_eq!(super::get_line_at(source, 3), Some("int c;"));
        assert_eq!(super::get_line_at(source, 4), None);
        assert_eq!(super::get_line_at(source, 0), None);
    }

    #[test]
    fn test_remove_starting_whitespace() {
        let (text, removed) = super::remove_starting_whitespace("    int a;");
        assert_eq!(text, "int a;");
        assert_eq!(removed, 4);

        let (text, removed) = super::remove_starting_whitespace("int a;");
        assert_eq!(text, "int a;");
        assert_eq!(removed, 0);
    }
}
