//! The operator precedence table and the priority rule driving tree
//! rotation.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    LeftToRight,
    RightToLeft,
}

pub struct OpPrecedenceGroup {
    pub operators: &'static [&'static str],
    pub associativity: Associativity,
}

pub const TOTAL_OPERATOR_GROUPS: usize = 14;

/// Groups ordered strongest-binding first. `()` is the synthetic operator
/// joining a callee to a parenthesised argument list.
pub static OP_PRECEDENCE: [OpPrecedenceGroup; TOTAL_OPERATOR_GROUPS] = [
    OpPrecedenceGroup {
        operators: &["++", "--", "()", "[]", ".", "->"],
        associativity: Associativity::LeftToRight,
    },
    OpPrecedenceGroup {
        operators: &["*", "/", "%"],
        associativity: Associativity::LeftToRight,
    },
    OpPrecedenceGroup {
        operators: &["+", "-"],
        associativity: Associativity::LeftToRight,
    },
    OpPrecedenceGroup {
        operators: &["<<", ">>"],
        associativity: Associativity::LeftToRight,
    },
    OpPrecedenceGroup {
        operators: &["<", "<=", ">", ">="],
        associativity: Associativity::LeftToRight,
    },
    OpPrecedenceGroup {
        operators: &["==", "!="],
        associativity: Associativity::LeftToRight,
    },
    OpPrecedenceGroup {
        operators: &["&"],
        associativity: Associativity::LeftToRight,
    },
    OpPrecedenceGroup {
        operators: &["^"],
        associativity: Associativity::LeftToRight,
    },
    OpPrecedenceGroup {
        operators: &["|"],
        associativity: Associativity::LeftToRight,
    },
    OpPrecedenceGroup {
        operators: &["&&"],
        associativity: Associativity::LeftToRight,
    },
    OpPrecedenceGroup {
        operators: &["||"],
        associativity: Associativity::LeftToRight,
    },
    OpPrecedenceGroup {
        operators: &["?", ":"],
        associativity: Associativity::RightToLeft,
    },
    OpPrecedenceGroup {
        operators: &["=", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^="],
        associativity: Associativity::RightToLeft,
    },
    OpPrecedenceGroup {
        operators: &[","],
        associativity: Associativity::LeftToRight,
    },
];

/// The group index for an operator spelling, or `None` for spellings the
/// table does not cover.
pub fn precedence_for_op(op: &str) -> Option<(usize, &'static OpPrecedenceGroup)> {
    OP_PRECEDENCE
        .iter()
        .enumerate()
        .find(|(_, group)| group.operators.contains(&op))
}

/// Whether the operator already at the root of a freshly built expression
/// binds at least as tightly as the one inside its right child. When it
/// does, the tree needs rotating so the left operator is applied first.
pub fn left_op_has_priority(left_op: &str, right_op: &str) -> bool {
    if left_op == right_op {
        return false;
    }

    let (left_group, group) = match precedence_for_op(left_op) {
        Some(found) => found,
        None => return false,
    };
    let (right_group, _) = match precedence_for_op(right_op) {
        Some(found) => found,
        None => return false,
    };

    if group.associativity == Associativity::RightToLeft {
        return false;
    }

    left_group <= right_group
}
