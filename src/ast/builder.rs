use crate::Pos;

use super::node::{Node, NodeId, NodeKind};

/// Arena plus the two stacks the parser assembles trees on.
///
/// Every created node lands on the working stack; sub-parsers pop their
/// operands off it and push the combined node back. Finished top-level
/// nodes are moved onto the result list, which keeps source order.
#[derive(Debug)]
pub struct NodeBuilder {
    nodes: Vec<Node>,
    working: Vec<NodeId>,
    result: Vec<NodeId>,
}

impl NodeBuilder {
    pub fn new() -> Self {
        NodeBuilder {
            nodes: Vec::new(),
            working: Vec::new(),
            result: Vec::new(),
        }
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    /// Creates a node in the arena and pushes it onto the working stack.
    pub fn create(&mut self, kind: NodeKind, pos: Pos) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            kind,
            flags: 0,
            pos,
            owner: None,
            function: None,
        });
        self.working.push(id);
        id
    }

    pub fn push(&mut self, id: NodeId) {
        self.working.push(id);
    }

    /// Pops the working stack. When the popped node is also the most
    /// recent result node, it is removed from the result list too: a node
    /// consumed as an operand stops being a top-level result.
    pub fn pop(&mut self) -> Option<NodeId> {
        let id = self.working.pop()?;
        if self.result.last() == Some(&id) {
            self.result.pop();
        }
        Some(id)
    }

    pub fn peek_or_null(&self) -> Option<NodeId> {
        self.working.last().copied()
    }

    /// Peeks the working stack, ignoring a top node that cannot take part
    /// in an expression.
    pub fn peek_expressionable_or_null(&self) -> Option<NodeId> {
        let id = self.peek_or_null()?;
        if self.node(id).is_expressionable() {
            Some(id)
        } else {
            None
        }
    }

    pub fn push_result(&mut self, id: NodeId) {
        self.result.push(id);
    }

    pub fn result(&self) -> &[NodeId] {
        &self.result
    }

    pub fn working_len(&self) -> usize {
        self.working.len()
    }
}

impl Default for NodeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
