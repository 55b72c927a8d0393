use crate::Pos;

use super::datatype::Datatype;

/// Index of a node inside the builder's arena.
pub type NodeId = usize;

/// Set on nodes created while an expression is being parsed.
pub const NODE_FLAG_INSIDE_EXPRESSION: u32 = 0b1;

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Expression {
        left: NodeId,
        right: NodeId,
        op: String,
    },
    Parentheses {
        exp: NodeId,
    },
    Number {
        value: u64,
    },
    Identifier {
        name: String,
    },
    String {
        value: String,
    },
    Variable {
        datatype: Datatype,
        name: String,
        value: Option<NodeId>,
    },
    VariableList {
        variables: Vec<NodeId>,
    },
    Function {
        datatype: Datatype,
        name: String,
        body: Option<NodeId>,
    },
    Body {
        statements: Vec<NodeId>,
    },
    Return {
        exp: Option<NodeId>,
    },
    If {
        condition: NodeId,
        body: NodeId,
        next: Option<NodeId>,
    },
    Else {
        body: NodeId,
    },
    While {
        condition: NodeId,
        body: NodeId,
    },
    DoWhile {
        body: NodeId,
        condition: NodeId,
    },
    For {
        init: Option<NodeId>,
        condition: Option<NodeId>,
        loop_exp: Option<NodeId>,
        body: NodeId,
    },
    Continue,
    Break,
    Switch {
        exp: NodeId,
        body: NodeId,
    },
    Case {
        exp: NodeId,
    },
    Default,
    Goto {
        label: String,
    },
    Unary {
        op: String,
        operand: NodeId,
    },
    Ternary {
        condition: NodeId,
        true_exp: NodeId,
        false_exp: NodeId,
    },
    Label {
        name: String,
    },
    Struct {
        name: String,
        body: Option<NodeId>,
    },
    Union {
        name: String,
        body: Option<NodeId>,
    },
    Bracket {
        inner: NodeId,
    },
    Cast {
        datatype: Datatype,
        operand: NodeId,
    },
    Blank,
}

/// One node in the arena. `owner` and `function` point at the enclosing
/// body and function nodes once a node has been claimed by one.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub flags: u32,
    pub pos: Pos,
    pub owner: Option<NodeId>,
    pub function: Option<NodeId>,
}

impl Node {
    pub fn is_expression(&self) -> bool {
        matches!(self.kind, NodeKind::Expression { .. })
    }

    /// Whether this node can take part in an expression tree.
    pub fn is_expressionable(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::Expression { .. }
                | NodeKind::Parentheses { .. }
                | NodeKind::Unary { .. }
                | NodeKind::Ternary { .. }
                | NodeKind::Number { .. }
                | NodeKind::Identifier { .. }
                | NodeKind::String { .. }
        )
    }

    /// Whether this node produces a value a surrounding expression can
    /// consume, e.g. as the callee of a function call.
    pub fn is_value_type(&self) -> bool {
        self.is_expressionable()
    }

    /// The declared name, for nodes that introduce one.
    pub fn declaration_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Variable { name, .. }
            | NodeKind::Function { name, .. }
            | NodeKind::Struct { name, .. }
            | NodeKind::Union { name, .. } => Some(name),
            _ => None,
        }
    }
}
