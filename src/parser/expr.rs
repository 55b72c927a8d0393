//! Expression parsing: single tokens, binary operators, parentheses and
//! the rotation pass that repairs operator precedence after the fact.

use crate::ast::builder::NodeBuilder;
use crate::ast::node::{NodeId, NodeKind, NODE_FLAG_INSIDE_EXPRESSION};
use crate::errors::errors::{Error, ErrorKind};
use crate::lexer::tokens::{TokenKind, TokenValue};

use super::parser::{History, Parser, HISTORY_FLAG_IN_DECLARATION};
use super::precedence::left_op_has_priority;

/// Parses as much of an expression as the token stream allows, extending
/// the node on top of the working stack.
pub fn parse_expressionable(parser: &mut Parser, history: History) -> Result<(), Error> {
    while parse_expressionable_single(parser, history)? {}
    Ok(())
}

/// Parses one expression step. Returns false when the next token cannot
/// extend the current expression.
pub fn parse_expressionable_single(parser: &mut Parser, history: History) -> Result<bool, Error> {
    let history = history.with(NODE_FLAG_INSIDE_EXPRESSION);

    let token = match parser.peek_next() {
        Some(token) => token,
        None => return Ok(false),
    };

    match token.kind {
        TokenKind::Number | TokenKind::String => {
            parse_single_token_to_node(parser)?;
            Ok(true)
        }
        TokenKind::Identifier => {
            parse_identifier(parser)?;
            Ok(true)
        }
        TokenKind::Operator => parse_exp(parser, history),
        _ => Ok(false),
    }
}

fn parse_exp(parser: &mut Parser, history: History) -> Result<bool, Error> {
    if parser.next_is_op("(") {
        parse_parentheses(parser, history)?;
        return Ok(true);
    }
    parse_exp_normal(parser, history)
}

/// Parses `<left> op <right>` where the left operand is already on the
/// working stack. A binary operator with no left operand marks a
/// statement boundary instead of an error.
fn parse_exp_normal(parser: &mut Parser, history: History) -> Result<bool, Error> {
    let op_token = match parser.peek_next() {
        Some(token) => token.clone(),
        None => return Ok(false),
    };
    let op = match op_token.text() {
        Some(op) => op.to_string(),
        None => return Ok(false),
    };

    // In a declaration a top-level `,` introduces the next declarator, so
    // the initializer expression ends here.
    if op == "," && history.has(HISTORY_FLAG_IN_DECLARATION) {
        return Ok(false);
    }

    let left = match parser.process.nodes.peek_expressionable_or_null() {
        Some(left) => left,
        None => return Ok(false),
    };

    parser.next_token();

    parser.process.nodes.pop();
    parser.process.nodes.node_mut(left).flags |= NODE_FLAG_INSIDE_EXPRESSION;

    let depth = parser.process.nodes.working_len();
    parse_expressionable(parser, history.down())?;
    if parser.process.nodes.working_len() <= depth {
        return Err(Error::new(
            ErrorKind::UnexpectedToken { token: op },
            op_token.pos,
        ));
    }

    let right = match parser.process.nodes.pop() {
        Some(right) => right,
        None => {
            return Err(Error::new(
                ErrorKind::UnexpectedToken { token: op },
                op_token.pos,
            ))
        }
    };
    parser.process.nodes.node_mut(right).flags |= NODE_FLAG_INSIDE_EXPRESSION;

    let node = parser
        .process
        .nodes
        .create(NodeKind::Expression { left, right, op }, op_token.pos);
    parser.process.nodes.pop();

    reorder_expression(&mut parser.process.nodes, node);
    parser.process.nodes.push(node);

    Ok(true)
}

/// Parses `( ... )`. When a value sits on top of the working stack the
/// result is joined to it with the synthetic `()` call operator.
fn parse_parentheses(parser: &mut Parser, history: History) -> Result<(), Error> {
    let open_token = parser.expect_op("(")?;

    let left_node = match parser.process.nodes.peek_or_null() {
        Some(id) if parser.process.nodes.node(id).is_value_type() => {
            parser.process.nodes.pop();
            Some(id)
        }
        _ => None,
    };

    // Parentheses reopen the comma operator, e.g. call arguments inside
    // an initializer.
    let depth = parser.process.nodes.working_len();
    parse_expressionable(parser, history.without(HISTORY_FLAG_IN_DECLARATION))?;
    parser.expect_sym(')')?;

    if parser.process.nodes.working_len() <= depth {
        return Err(Error::new(
            ErrorKind::UnexpectedToken {
                token: "(".to_string(),
            },
            open_token.pos,
        ));
    }

    let exp = match parser.process.nodes.pop() {
        Some(exp) => exp,
        None => {
            return Err(Error::new(
                ErrorKind::UnexpectedToken {
                    token: "(".to_string(),
                },
                open_token.pos,
            ))
        }
    };

    let paren = parser
        .process
        .nodes
        .create(NodeKind::Parentheses { exp }, open_token.pos.clone());

    if let Some(left) = left_node {
        parser.process.nodes.pop();
        let node = parser.process.nodes.create(
            NodeKind::Expression {
                left,
                right: paren,
                op: "()".to_string(),
            },
            open_token.pos,
        );
        parser.process.nodes.pop();
        reorder_expression(&mut parser.process.nodes, node);
        parser.process.nodes.push(node);
    }

    Ok(())
}

/// Rewrites `left op (r_left r_op r_right)` into
/// `(left op r_left) r_op r_right` when `op` binds at least as tightly as
/// `r_op`, then recurses into both new children. Parentheses nodes are
/// opaque: rotation never reaches through them.
pub fn reorder_expression(nodes: &mut NodeBuilder, node_id: NodeId) {
    let (left, right, op) = match &nodes.node(node_id).kind {
        NodeKind::Expression { left, right, op } => (*left, *right, op.clone()),
        _ => return,
    };

    if nodes.node(left).is_expression() || !nodes.node(right).is_expression() {
        return;
    }

    let right_op = match &nodes.node(right).kind {
        NodeKind::Expression { op, .. } => op.clone(),
        _ => return,
    };

    if left_op_has_priority(&op, &right_op) {
        shift_children_left(nodes, node_id);

        let (new_left, new_right) = match &nodes.node(node_id).kind {
            NodeKind::Expression { left, right, .. } => (*left, *right),
            _ => return,
        };
        reorder_expression(nodes, new_left);
        reorder_expression(nodes, new_right);
    }
}

/// The rotation itself: the node's operator and left child move down into
/// a new left subtree, and the right child's operator becomes the root.
fn shift_children_left(nodes: &mut NodeBuilder, node_id: NodeId) {
    let (left, right, op) = match &nodes.node(node_id).kind {
        NodeKind::Expression { left, right, op } => (*left, *right, op.clone()),
        _ => return,
    };
    let (right_left, right_right, right_op) = match &nodes.node(right).kind {
        NodeKind::Expression { left, right, op } => (*left, *right, op.clone()),
        _ => return,
    };

    let pos = nodes.node(node_id).pos.clone();
    let new_left = nodes.create(
        NodeKind::Expression {
            left,
            right: right_left,
            op,
        },
        pos,
    );
    nodes.pop();
    nodes.node_mut(new_left).flags |= NODE_FLAG_INSIDE_EXPRESSION;

    nodes.node_mut(node_id).kind = NodeKind::Expression {
        left: new_left,
        right: right_right,
        op: right_op,
    };
}

/// Converts a literal token into its node.
pub fn parse_single_token_to_node(parser: &mut Parser) -> Result<NodeId, Error> {
    let token = match parser.next_token() {
        Some(token) => token,
        None => {
            return Err(Error::new(
                ErrorKind::UnexpectedEndOfInput,
                parser.process.pos.clone(),
            ))
        }
    };

    let kind = match (&token.kind, &token.value) {
        (TokenKind::Number, TokenValue::Num { value, .. }) => NodeKind::Number { value: *value },
        (TokenKind::Number, TokenValue::Char(c)) => NodeKind::Number { value: *c as u64 },
        (TokenKind::Identifier, TokenValue::Str(name)) => {
            NodeKind::Identifier { name: name.clone() }
        }
        (TokenKind::String, TokenValue::Str(value)) => NodeKind::String {
            value: value.clone(),
        },
        _ => {
            return Err(Error::new(
                ErrorKind::UnexpectedToken {
                    token: token.value.to_string(),
                },
                token.pos,
            ))
        }
    };

    Ok(parser.process.nodes.create(kind, token.pos))
}

pub fn parse_identifier(parser: &mut Parser) -> Result<NodeId, Error> {
    parse_single_token_to_node(parser)
}
