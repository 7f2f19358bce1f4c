use crate::line::Line;
use crate::selection::{Selection, annotate, byte_offset};
use pretty_assertions::assert_eq;

#[test]
fn test_selection_is_ordered_and_clamped() {
    assert_eq!(Selection::new(8, 3, 5), Selection { start: 3, end: 5 });
    assert_eq!(Selection::new(2, 4, 10), Selection { start: 2, end: 4 });
    assert_eq!(Selection::caret(20, 5), Selection { start: 5, end: 5 });
}

#[test]
fn test_overlap_is_inclusive_at_both_boundaries() {
    let line = Line::new(0, "0123456789", 10);

    assert!(Selection { start: 20, end: 20 }.touches(&line));
    assert!(Selection { start: 0, end: 10 }.touches(&line));
    assert!(Selection { start: 12, end: 14 }.touches(&line));
    assert!(!Selection { start: 21, end: 25 }.touches(&line));
    assert!(!Selection { start: 0, end: 9 }.touches(&line));
}

#[test]
fn test_caret_selects_only_the_line_it_touches() {
    let mut lines = vec![Line::new(0, "ab", 0), Line::new(1, "cd", 3)];

    annotate(&mut lines, Selection { start: 2, end: 2 }, "ab\ncd");
    assert_eq!(lines[0].selected, Some(true));
    assert_eq!(lines[1].selected, Some(false));

    annotate(&mut lines, Selection { start: 3, end: 3 }, "ab\ncd");
    assert_eq!(lines[0].selected, Some(false));
    assert_eq!(lines[1].selected, Some(true));
}

#[test]
fn test_selection_text_counts_characters() {
    let mut lines = vec![Line::new(0, "héllo", 0)];

    let text = annotate(&mut lines, Selection { start: 1, end: 3 }, "héllo");
    assert_eq!(text, "él");

    let text = annotate(&mut lines, Selection { start: 2, end: 2 }, "héllo");
    assert_eq!(text, "");
}

#[test]
fn test_byte_offsets() {
    assert_eq!(byte_offset("héllo", 0), 0);
    assert_eq!(byte_offset("héllo", 2), 3);
    assert_eq!(byte_offset("héllo", 5), 6);
    assert_eq!(byte_offset("héllo", 99), 6);
}
