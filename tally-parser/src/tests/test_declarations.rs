use crate::{ast::*, parse_line};

#[test]
fn test_bare_constant_is_declaration() {
    assert!(parse_line("42").unwrap().is_declaration());
    assert!(parse_line("\"text\"").unwrap().is_declaration());
    assert!(parse_line("true").unwrap().is_declaration());
}

#[test]
fn test_arithmetic_is_not_declaration() {
    assert!(!parse_line("1 + 2").unwrap().is_declaration());
    assert!(!parse_line("-5").unwrap().is_declaration());
    assert!(!parse_line("(5)").unwrap().is_declaration());
    assert!(!parse_line("x").unwrap().is_declaration());
}

#[test]
fn test_assignment_of_constant_is_declaration() {
    let line = parse_line("rent = 1200").unwrap();
    assert!(line.is_declaration());

    match line.statement.unwrap().kind {
        StatementKind::Assignment(assignment) => {
            assert_eq!(assignment.name.name, "rent");
            assert!(assignment.value.is_constant());
        }
        other => panic!("Expected assignment, got: {:?}", other),
    }
}

#[test]
fn test_assignment_of_expression_is_not_declaration() {
    assert!(!parse_line("total = rent * 12").unwrap().is_declaration());
}

#[test]
fn test_function_definition_is_declaration() {
    let line = parse_line("area(w, h) = w * h").unwrap();
    assert!(line.is_declaration());

    match line.statement.unwrap().kind {
        StatementKind::FunctionAssignment(function) => {
            assert_eq!(function.name.name, "area");
            let names: Vec<_> = function.parameters.iter().map(|p| p.name.as_str()).collect();
            assert_eq!(names, vec!["w", "h"]);
        }
        other => panic!("Expected function definition, got: {:?}", other),
    }
}

#[test]
fn test_function_without_parameters() {
    let line = parse_line("answer() = 42").unwrap();

    match line.statement.unwrap().kind {
        StatementKind::FunctionAssignment(function) => assert!(function.parameters.is_empty()),
        other => panic!("Expected function definition, got: {:?}", other),
    }
}

#[test]
fn test_call_is_not_mistaken_for_definition() {
    let line = parse_line("area(w, h)").unwrap();
    assert!(matches!(
        line.statement.unwrap().kind,
        StatementKind::Expression(_)
    ));
}

#[test]
fn test_equality_is_not_assignment() {
    let line = parse_line("x == 3").unwrap();
    assert!(matches!(
        line.statement.unwrap().kind,
        StatementKind::Expression(_)
    ));
}
