//! Unit tests for the parser.
//!
//! These drive the whole front end through `compile_source` and inspect
//! the resulting node arena, scopes and symbol tables.

use crate::ast::datatype::{
    DatatypeKind, DATATYPE_FLAG_IS_POINTER, DATATYPE_FLAG_IS_SIGNED,
    DATATYPE_FLAG_STRUCT_UNION_NO_NAME,
};
use crate::ast::node::{NodeId, NodeKind};
use crate::compile_source;
use crate::errors::errors::ErrorKind;
use crate::process::CompileProcess;

fn compile(source: &str) -> CompileProcess {
    compile_source(source, "test.c", 0).unwrap()
}

fn expression_parts(process: &CompileProcess, id: NodeId) -> (NodeId, NodeId, String) {
    match &process.nodes.node(id).kind {
        NodeKind::Expression { left, right, op } => (*left, *right, op.clone()),
        other => panic!("expected an expression, got {:?}", other),
    }
}

fn number_of(process: &CompileProcess, id: NodeId) -> u64 {
    match process.nodes.node(id).kind {
        NodeKind::Number { value } => value,
        ref other => panic!("expected a number, got {:?}", other),
    }
}

#[test]
fn test_parse_respects_precedence_without_rotation() {
    // 1 + 2 * 3 naturally nests as 1 + (2 * 3).
    let process = compile("1 + 2 * 3;");

    let root = process.nodes.result()[0];
    let (left, right, op) = expression_parts(&process, root);

    assert_eq!(op, "+");
    assert_eq!(number_of(&process, left), 1);

    let (right_left, right_right, right_op) = expression_parts(&process, right);
    assert_eq!(right_op, "*");
    assert_eq!(number_of(&process, right_left), 2);
    assert_eq!(number_of(&process, right_right), 3);
}

#[test]
fn test_parse_rotates_for_left_priority() {
    // 1 * 2 + 3 first builds 1 * (2 + 3) and is rotated to (1 * 2) + 3.
    let process = compile("1 * 2 + 3;");

    let root = process.nodes.result()[0];
    let (left, right, op) = expression_parts(&process, root);

    assert_eq!(op, "+");
    assert_eq!(number_of(&process, right), 3);

    let (left_left, left_right, left_op) = expression_parts(&process, left);
    assert_eq!(left_op, "*");
    assert_eq!(number_of(&process, left_left), 1);
    assert_eq!(number_of(&process, left_right), 2);
}

#[test]
fn test_parentheses_block_rotation() {
    let process = compile("1 * (2 + 3);");

    let root = process.nodes.result()[0];
    let (left, right, op) = expression_parts(&process, root);

    assert_eq!(op, "*");
    assert_eq!(number_of(&process, left), 1);
    assert!(matches!(
        process.nodes.node(right).kind,
        NodeKind::Parentheses { .. }
    ));
}

#[test]
fn test_call_uses_join_operator() {
    let process = compile("f(1 + 2);");

    let root = process.nodes.result()[0];
    let (left, right, op) = expression_parts(&process, root);

    assert_eq!(op, "()");
    assert!(matches!(
        process.nodes.node(left).kind,
        NodeKind::Identifier { ref name } if name == "f"
    ));
    assert!(matches!(
        process.nodes.node(right).kind,
        NodeKind::Parentheses { .. }
    ));
}

#[test]
fn test_parse_simple_variable() {
    let process = compile("int x;");

    let root = process.nodes.result()[0];
    match &process.nodes.node(root).kind {
        NodeKind::Variable {
            datatype,
            name,
            value,
        } => {
            assert_eq!(name, "x");
            assert_eq!(datatype.kind, DatatypeKind::Int);
            assert_eq!(datatype.size, 4);
            assert!(datatype.flags & DATATYPE_FLAG_IS_SIGNED != 0);
            assert!(value.is_none());
        }
        other => panic!("expected a variable, got {:?}", other),
    }
}

#[test]
fn test_parse_variable_with_initializer() {
    let process = compile("int x = 5 + 5 * 2;");

    let root = process.nodes.result()[0];
    let value = match &process.nodes.node(root).kind {
        NodeKind::Variable { value, .. } => value.unwrap(),
        other => panic!("expected a variable, got {:?}", other),
    };

    let (left, right, op) = expression_parts(&process, value);
    assert_eq!(op, "+");
    assert_eq!(number_of(&process, left), 5);

    let (_, _, right_op) = expression_parts(&process, right);
    assert_eq!(right_op, "*");
}

#[test]
fn test_parse_variable_list() {
    let process = compile("int a, b, c;");

    let root = process.nodes.result()[0];
    let variables = match &process.nodes.node(root).kind {
        NodeKind::VariableList { variables } => variables.clone(),
        other => panic!("expected a variable list, got {:?}", other),
    };

    assert_eq!(variables.len(), 3);
    let names: Vec<&str> = variables
        .iter()
        .filter_map(|&id| process.nodes.node(id).declaration_name())
        .collect();
    assert_eq!(names, vec!["a", "b", "c"]);

    // Each variable also landed in the current scope.
    assert_eq!(process.scopes.current().entities().len(), 3);
    assert_eq!(process.scopes.current().size(), 12);

    // And each is reachable through the symbol table.
    assert!(process.symbols.get("a").is_some());
    assert!(process.symbols.get("c").is_some());
}

#[test]
fn test_parse_variable_list_with_initializers() {
    // The `,` after an initializer starts the next declarator; it is not
    // the comma operator.
    let process = compile("int a = 1, b = 2;");

    let root = process.nodes.result()[0];
    let variables = match &process.nodes.node(root).kind {
        NodeKind::VariableList { variables } => variables.clone(),
        other => panic!("expected a variable list, got {:?}", other),
    };
    assert_eq!(variables.len(), 2);

    for (&id, expected) in variables.iter().zip([1u64, 2u64]) {
        match &process.nodes.node(id).kind {
            NodeKind::Variable { value, .. } => {
                assert_eq!(number_of(&process, value.unwrap()), expected);
            }
            other => panic!("expected a variable, got {:?}", other),
        }
    }

    assert!(process.symbols.get("a").is_some());
    assert!(process.symbols.get("b").is_some());
    assert_eq!(process.scopes.current().entities().len(), 2);
}

#[test]
fn test_initializer_call_arguments_keep_the_comma_operator() {
    let process = compile("int x = f(1, 2), y;");

    let root = process.nodes.result()[0];
    let variables = match &process.nodes.node(root).kind {
        NodeKind::VariableList { variables } => variables.clone(),
        other => panic!("expected a variable list, got {:?}", other),
    };
    assert_eq!(variables.len(), 2);

    // The first initializer is the call, commas and all.
    let value = match &process.nodes.node(variables[0]).kind {
        NodeKind::Variable { value, .. } => value.unwrap(),
        other => panic!("expected a variable, got {:?}", other),
    };
    let (_, _, op) = expression_parts(&process, value);
    assert_eq!(op, "()");

    assert!(process.symbols.get("x").is_some());
    assert!(process.symbols.get("y").is_some());
}

#[test]
fn test_identical_operators_do_not_rotate() {
    // "+" has no priority over itself: 1 + 2 + 3 stays right-nested.
    let process = compile("1 + 2 + 3;");

    let root = process.nodes.result()[0];
    let (left, right, op) = expression_parts(&process, root);

    assert_eq!(op, "+");
    assert_eq!(number_of(&process, left), 1);

    let (right_left, right_right, right_op) = expression_parts(&process, right);
    assert_eq!(right_op, "+");
    assert_eq!(number_of(&process, right_left), 2);
    assert_eq!(number_of(&process, right_right), 3);
}

#[test]
fn test_parenthesized_operand_interior_is_untouched() {
    let process = compile("1 + (2 + 3);");

    let root = process.nodes.result()[0];
    let (left, right, op) = expression_parts(&process, root);

    assert_eq!(op, "+");
    assert_eq!(number_of(&process, left), 1);

    let exp = match &process.nodes.node(right).kind {
        NodeKind::Parentheses { exp } => *exp,
        other => panic!("expected parentheses, got {:?}", other),
    };
    let (inner_left, inner_right, inner_op) = expression_parts(&process, exp);
    assert_eq!(inner_op, "+");
    assert_eq!(number_of(&process, inner_left), 2);
    assert_eq!(number_of(&process, inner_right), 3);
}

#[test]
fn test_parse_unsigned_long_int_pointer() {
    let process = compile("unsigned long int *ptr = 10;");

    let root = process.nodes.result()[0];
    match &process.nodes.node(root).kind {
        NodeKind::Variable { datatype, value, .. } => {
            assert_eq!(datatype.kind, DatatypeKind::Long);
            assert_eq!(datatype.size, 8);
            assert_eq!(datatype.pointer_depth, 1);
            assert!(datatype.flags & DATATYPE_FLAG_IS_POINTER != 0);
            assert!(datatype.flags & DATATYPE_FLAG_IS_SIGNED == 0);
            assert_eq!(
                datatype.secondary.as_ref().map(|s| s.kind),
                Some(DatatypeKind::Int)
            );
            assert!(value.is_some());
        }
        other => panic!("expected a variable, got {:?}", other),
    }
}

#[test]
fn test_long_long_warns_and_stays_32_bit() {
    let process = compile("long long x;");

    let root = process.nodes.result()[0];
    match &process.nodes.node(root).kind {
        NodeKind::Variable { datatype, .. } => {
            assert_eq!(datatype.size, 4);
        }
        other => panic!("expected a variable, got {:?}", other),
    }
    assert_eq!(process.warnings.len(), 1);
    assert!(process.warnings[0].contains("long long"));
}

#[test]
fn test_parse_struct_variable() {
    let process = compile("struct point p;");

    let root = process.nodes.result()[0];
    match &process.nodes.node(root).kind {
        NodeKind::Variable { datatype, name, .. } => {
            assert_eq!(name, "p");
            assert_eq!(datatype.kind, DatatypeKind::Struct);
            assert_eq!(datatype.type_str, "point");
        }
        other => panic!("expected a variable, got {:?}", other),
    }
}

#[test]
fn test_struct_body_is_unsupported() {
    let error = compile_source("struct point { int x; };", "test.c", 0).unwrap_err();

    assert!(matches!(
        error.get_kind(),
        ErrorKind::UnsupportedDeclaration { .. }
    ));
}

#[test]
fn test_anonymous_struct_gets_generated_name() {
    let process = compile("struct *p;");

    let root = process.nodes.result()[0];
    match &process.nodes.node(root).kind {
        NodeKind::Variable { datatype, .. } => {
            assert_eq!(datatype.type_str, "__tmp_type_1");
            assert!(datatype.flags & DATATYPE_FLAG_STRUCT_UNION_NO_NAME != 0);
            assert_eq!(datatype.pointer_depth, 1);
        }
        other => panic!("expected a variable, got {:?}", other),
    }
}

#[test]
fn test_duplicate_declaration_keeps_first_symbol() {
    let process = compile("int x; int x;");

    assert_eq!(process.nodes.result().len(), 2);
    let first = process.nodes.result()[0];
    assert_eq!(process.symbols.get("x").and_then(|s| s.node()), Some(first));
}

#[test]
fn test_statement_keyword_at_global_level_is_unsupported() {
    let error = compile_source("return 5;", "test.c", 0).unwrap_err();

    assert!(matches!(
        error.get_kind(),
        ErrorKind::UnsupportedDeclaration { ref keyword } if keyword == "return"
    ));
}

#[test]
fn test_lone_semicolon_is_a_blank_node() {
    let process = compile(";");

    let root = process.nodes.result()[0];
    assert_eq!(process.nodes.node(root).kind, NodeKind::Blank);
}

#[test]
fn test_operator_with_no_left_operand_fails() {
    let error = compile_source("(1 + 2);", "test.c", 0).unwrap_err();

    assert!(matches!(error.get_kind(), ErrorKind::UnexpectedToken { .. }));
}

#[test]
fn test_trailing_operator_fails() {
    let error = compile_source("1 +", "test.c", 0).unwrap_err();

    assert!(matches!(error.get_kind(), ErrorKind::UnexpectedToken { .. }));
}
