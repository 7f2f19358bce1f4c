// Tests for whole notepad lines as users type them

use tally_parser::*;

#[test]
fn test_parse_typical_budget_lines() {
    let lines = [
        "rent = 1200",
        "food = 85 * 4",
        "rent + food",
        "  last * 12",
        "split(amount, people) = amount / people",
        "split(rent, 3)",
        "# notes are ignored",
        "",
    ];

    for input in lines {
        assert!(parse_line(input).is_ok(), "failed to parse {input:?}");
    }
}

#[test]
fn test_carriage_returns_are_whitespace() {
    for input in ["1\r", "rent = 1200\r", "  last * 12\r", "# note\r", "\r"] {
        assert!(parse_line(input).is_ok(), "failed to parse {input:?}");
    }
    assert!(parse_line("1\r").unwrap().statement.is_some());
}

#[test]
fn test_syntax_error_is_a_diagnostic() {
    use miette::Diagnostic;

    let error = parse_line("2 * * 3").unwrap_err();

    assert!(matches!(error, ParseError::Syntax { .. }));
    assert_eq!(
        error.code().map(|code| code.to_string()),
        Some("tally::parse::syntax_error".to_string())
    );
    assert!(error.to_string().contains("(char 5)"), "got: {error}");
}

#[test]
fn test_block_header_is_not_an_expression() {
    // Block headers are recognised by the engine before the parser sees them
    assert!(parse_line("total:").is_err());
}

#[test]
fn test_error_columns_count_characters() {
    let error = parse_line("\"€\" +").unwrap_err();
    assert!(error.to_string().contains("(char 6)"), "got: {error}");
}
