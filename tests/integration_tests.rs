//! Integration tests for the end-to-end front end.
//!
//! These tests verify that the complete pipeline works from source code
//! through tokenization and parsing, including the token artifacts, the
//! node arena, scopes, symbols and error reporting.

use minicc::{
    ast::node::NodeKind,
    compile_source,
    errors::errors::ErrorKind,
    lexer::tokens::TokenKind,
};

#[test]
fn test_compile_simple_program() {
    let source = "int x = 42;";
    let process = compile_source(source, "test.c", 0).unwrap();

    assert_eq!(process.nodes.result().len(), 1);
    assert!(process.symbols.get("x").is_some());
    assert_eq!(process.scopes.current().entities().len(), 1);
}

#[test]
fn test_compile_multiple_declarations() {
    let source = "int a = 1;\nint b = 2;\nint c = a + b;\n";
    let process = compile_source(source, "test.c", 0).unwrap();

    assert_eq!(process.nodes.result().len(), 3);
    assert!(process.symbols.get("a").is_some());
    assert!(process.symbols.get("b").is_some());
    assert!(process.symbols.get("c").is_some());
}

#[test]
fn test_compile_preserves_token_artifacts() {
    let source = "// setup\nint total = (5 + 10);\n";
    let process = compile_source(source, "test.c", 0).unwrap();

    // The token sequence survives as an artifact, comments included.
    assert_eq!(process.tokens[0].kind, TokenKind::Comment);
    assert!(process
        .tokens
        .iter()
        .any(|token| token.between_brackets.as_deref() == Some("5 + 10")));
}

#[test]
fn test_compile_expression_statement() {
    let source = "10 + 20 * 30;";
    let process = compile_source(source, "test.c", 0).unwrap();

    let root = process.nodes.result()[0];
    match &process.nodes.node(root).kind {
        NodeKind::Expression { op, .. } => assert_eq!(op, "+"),
        other => panic!("expected an expression, got {:?}", other),
    }
}

#[test]
fn test_compile_call_expression() {
    let source = "printf(\"total: %i\\n\");";
    let process = compile_source(source, "test.c", 0).unwrap();

    let root = process.nodes.result()[0];
    match &process.nodes.node(root).kind {
        NodeKind::Expression { op, .. } => assert_eq!(op, "()"),
        other => panic!("expected a call expression, got {:?}", other),
    }
}

#[test]
fn test_compile_mixed_program() {
    let source = "\
/* globals */
int counter = 0;
unsigned long size = 0x10;
struct config cfg;
";
    let process = compile_source(source, "test.c", 0).unwrap();

    assert!(process.symbols.get("counter").is_some());
    assert!(process.symbols.get("size").is_some());
    assert!(process.symbols.get("cfg").is_some());
}

#[test]
fn test_compile_reports_lexical_errors() {
    let error = compile_source("int a = $;", "test.c", 0).unwrap_err();

    assert!(matches!(
        error.get_kind(),
        ErrorKind::UnexpectedCharacter { character: '$' }
    ));
    assert_eq!(error.get_position().line, 1);
}

#[test]
fn test_compile_reports_parse_errors() {
    let error = compile_source("int ;", "test.c", 0).unwrap_err();

    assert!(matches!(error.get_kind(), ErrorKind::UnexpectedToken { .. }));
}

#[test]
fn test_compile_collects_warnings() {
    let source = "long long big = 5;";
    let process = compile_source(source, "test.c", 0).unwrap();

    assert_eq!(process.warnings.len(), 1);
}

#[test]
fn test_error_positions_point_into_the_source() {
    let source = "int a = 1;\nint b = 0b12;\n";
    let error = compile_source(source, "test.c", 0).unwrap_err();

    assert!(matches!(
        error.get_kind(),
        ErrorKind::InvalidBinaryDigit { digit: '2' }
    ));
    assert_eq!(error.get_position().line, 2);
    assert_eq!(*error.get_position().filename, "test.c");
}
