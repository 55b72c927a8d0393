//! The compilation context threaded through every front-end stage.

use std::rc::Rc;

use crate::ast::builder::NodeBuilder;
use crate::ast::node::NodeId;
use crate::lexer::tokens::Token;
use crate::symbols::resolver::SymbolTables;
use crate::symbols::scope::ScopeStack;
use crate::Pos;

/// All state a compilation accumulates: the token sequence, the node
/// arena, scopes, symbol tables and collected warnings. Stages receive
/// this explicitly; there is no global state.
#[derive(Debug)]
pub struct CompileProcess {
    pub flags: u32,
    pub filename: Rc<String>,
    /// Position of the token most recently consumed by the parser.
    pub pos: Pos,
    pub tokens: Vec<Token>,
    pub nodes: NodeBuilder,
    pub scopes: ScopeStack<NodeId>,
    pub symbols: SymbolTables,
    pub warnings: Vec<String>,
    next_type_index: u32,
}

impl CompileProcess {
    pub fn new(filename: &str, flags: u32) -> Self {
        let filename = Rc::new(filename.to_string());
        CompileProcess {
            flags,
            pos: Pos::new(1, 1, Rc::clone(&filename)),
            filename,
            tokens: Vec::new(),
            nodes: NodeBuilder::new(),
            scopes: ScopeStack::new(),
            symbols: SymbolTables::new(),
            warnings: Vec::new(),
            next_type_index: 0,
        }
    }

    /// Records a non-fatal diagnostic; compilation continues.
    pub fn warn(&mut self, message: String) {
        self.warnings.push(message);
    }

    /// A fresh generated name for an anonymous struct or union.
    pub fn next_type_name(&mut self) -> String {
        self.next_type_index += 1;
        format!("__tmp_type_{}", self.next_type_index)
    }
}
