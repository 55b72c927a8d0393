use crate::ast::builder::NodeBuilder;
use crate::ast::node::{NodeId, NodeKind};

#[derive(Debug, Clone, PartialEq)]
pub enum SymbolKind {
    /// Declared by a node in the tree.
    Node(NodeId),
    NativeFunction,
    Unknown,
}

#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
}

impl Symbol {
    pub fn node(&self) -> Option<NodeId> {
        match self.kind {
            SymbolKind::Node(id) => Some(id),
            _ => None,
        }
    }
}

/// The current symbol table plus a save stack for nested translation
/// units. Lookups only consult the current table.
#[derive(Debug)]
pub struct SymbolTables {
    table: Vec<Symbol>,
    saved: Vec<Vec<Symbol>>,
}

impl SymbolTables {
    pub fn new() -> Self {
        SymbolTables {
            table: Vec::new(),
            saved: Vec::new(),
        }
    }

    /// Saves the current table and starts an empty one.
    pub fn new_table(&mut self) {
        self.saved.push(std::mem::take(&mut self.table));
    }

    /// Discards the current table and restores the last saved one.
    pub fn end_table(&mut self) {
        if let Some(previous) = self.saved.pop() {
            self.table = previous;
        }
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.table.iter().find(|symbol| symbol.name == name)
    }

    /// Registers a symbol in the current table. Duplicate names are left
    /// alone and reported with `None`; redeclaration is not fatal.
    pub fn register(&mut self, name: &str, kind: SymbolKind) -> Option<&Symbol> {
        if self.get(name).is_some() {
            return None;
        }
        self.table.push(Symbol {
            name: name.to_string(),
            kind,
        });
        self.table.last()
    }

    pub fn get_native_function(&self, name: &str) -> Option<&Symbol> {
        self.get(name)
            .filter(|symbol| symbol.kind == SymbolKind::NativeFunction)
    }

    /// Registers the symbols a finished top-level node declares. Nodes
    /// that declare nothing are ignored.
    pub fn build_for_node(&mut self, nodes: &NodeBuilder, id: NodeId) {
        match &nodes.node(id).kind {
            NodeKind::Variable { .. }
            | NodeKind::Function { .. }
            | NodeKind::Struct { .. }
            | NodeKind::Union { .. } => {
                if let Some(name) = nodes.node(id).declaration_name() {
                    self.register(name, SymbolKind::Node(id));
                }
            }
            NodeKind::VariableList { variables } => {
                for &variable in variables {
                    self.build_for_node(nodes, variable);
                }
            }
            _ => {}
        }
    }
}

impl Default for SymbolTables {
    fn default() -> Self {
        Self::new()
    }
}
