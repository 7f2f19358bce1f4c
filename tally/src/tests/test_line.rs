use crate::line::{Line, block_name, indent_of};

#[test]
fn test_indent_counts_leading_pairs() {
    assert_eq!(indent_of("1"), 0);
    assert_eq!(indent_of("  1"), 1);
    assert_eq!(indent_of("    1"), 2);
    assert_eq!(indent_of("   1"), 1);
    assert_eq!(indent_of("  \t\t1"), 2);
    assert_eq!(indent_of("  "), 1);
    assert_eq!(indent_of(""), 0);
}

#[test]
fn test_indent_requires_two_leading_spaces() {
    assert_eq!(indent_of(" 1"), 0);
    assert_eq!(indent_of("\t\t1"), 0);
    assert_eq!(indent_of(" \t 1"), 0);
}

#[test]
fn test_block_names() {
    assert_eq!(block_name("total:"), Some("total".to_string()));
    assert_eq!(block_name("  my total :  "), Some("my total".to_string()));
    assert_eq!(block_name("x = 1"), None);
    assert_eq!(block_name("todo: # later"), None);
    assert_eq!(block_name("# section:"), None);
}

#[test]
fn test_line_span_counts_characters() {
    let line = Line::new(2, "\"héllo\"", 10);

    assert_eq!(line.position_start, 10);
    assert_eq!(line.position_end, 17);
    assert_eq!(line.indent, 0);
    assert!(!line.has_error());
    assert!(!line.is_selected());
}
