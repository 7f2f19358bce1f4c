use pretty_assertions::assert_eq;
use tally::{LineType, ParseCache, recompute, render::classify};
use tally_interpreter::{MathOracle, Value};

fn evaluate(raw: &str) -> tally::Evaluation {
    recompute(raw, &mut ParseCache::new(), &MathOracle::new())
}

fn number(n: f64) -> Option<Value> {
    Some(Value::Number(n))
}

#[test]
fn warm_cache_gives_identical_results() {
    let raw = "a = 2\nb = a * 3\ntotal:\n  a\n  b\n  c\nlast + 1\n1 +";
    let oracle = MathOracle::new();
    let mut cache = ParseCache::new();

    let cold = recompute(raw, &mut cache, &oracle);
    let warm = recompute(raw, &mut cache, &oracle);

    let outcome = |evaluation: &tally::Evaluation| {
        evaluation
            .lines
            .iter()
            .map(|line| (line.result.clone(), line.error.clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(outcome(&cold), outcome(&warm));
    assert_eq!(cold.scope, warm.scope);
}

#[test]
fn second_pass_is_served_from_the_cache() {
    let oracle = MathOracle::new();
    let mut cache = ParseCache::new();

    recompute("1\n2\nt:\n  3", &mut cache, &oracle);
    let misses = cache.stats().cache_misses;
    recompute("1\n2\nt:\n  3", &mut cache, &oracle);

    assert_eq!(misses, 3);
    assert_eq!(cache.stats().cache_misses, 3);
    assert_eq!(cache.stats().cache_hits, 3);
}

#[test]
fn block_sums_its_indented_lines() {
    let evaluation = evaluate("total:\n  1\n  2\n  3");
    let block = &evaluation.lines[0];

    assert_eq!(block.summing.as_deref(), Some("total"));
    assert_eq!(block.result, number(6.0));
    assert_eq!(block.children, vec![1, 2, 3]);
    assert!(!block.closed);
}

#[test]
fn less_indented_line_closes_the_block() {
    let evaluation = evaluate("total:\n  1\n2");
    let block = &evaluation.lines[0];

    assert!(block.closed);
    assert_eq!(block.result, number(1.0));
    assert_eq!(block.children, vec![1]);
    assert_eq!(evaluation.lines[2].result, number(2.0));
    assert_eq!(evaluation.scope.get("total"), Some(&Value::Number(1.0)));
}

#[test]
fn closed_block_is_usable_below() {
    let evaluation = evaluate("total:\n  10\n  20\ntotal * 2");

    assert_eq!(evaluation.lines[3].result, number(60.0));
}

#[test]
fn blank_line_closes_a_block() {
    let evaluation = evaluate("t:\n  1\n\n  2");

    assert!(evaluation.lines[0].closed);
    assert_eq!(evaluation.lines[0].result, number(1.0));
    assert_eq!(evaluation.lines[0].children, vec![1]);
    assert_eq!(evaluation.lines[3].result, number(2.0));
}

#[test]
fn nested_block_contributes_to_its_parent() {
    let evaluation = evaluate("outer:\n  inner:\n    1\n    2\n  3");
    let (outer, inner) = (&evaluation.lines[0], &evaluation.lines[1]);

    assert!(inner.closed);
    assert_eq!(inner.result, number(3.0));
    assert_eq!(inner.children, vec![2, 3]);

    assert!(!outer.closed);
    assert_eq!(outer.result, number(6.0));
    assert_eq!(outer.children, vec![1, 4]);
}

#[test]
fn blocks_open_at_the_end_still_contribute() {
    let evaluation = evaluate("outer:\n  inner:\n    5");

    assert!(!evaluation.lines[1].closed);
    assert_eq!(evaluation.lines[1].result, number(5.0));
    assert_eq!(evaluation.lines[0].result, number(5.0));
    assert_eq!(evaluation.lines[0].children, vec![1]);
}

#[test]
fn equal_indent_closes_even_when_opening_a_block() {
    let evaluation = evaluate("a:\n  1\nb:\n  2");

    assert!(evaluation.lines[0].closed);
    assert_eq!(evaluation.lines[0].result, number(1.0));
    assert_eq!(evaluation.lines[0].children, vec![1]);
    assert_eq!(evaluation.lines[2].result, number(2.0));
    assert_eq!(evaluation.lines[2].children, vec![3]);
    assert_eq!(evaluation.scope.get("a"), Some(&Value::Number(1.0)));
}

#[test]
fn errors_stay_on_their_line() {
    let evaluation = evaluate("1 +\n2 * 3");

    assert!(evaluation.lines[0].has_error());
    assert_eq!(evaluation.lines[0].result, None);
    assert_eq!(evaluation.lines[1].result, number(6.0));
    assert_eq!(evaluation.scope.last(), Some(&Value::Number(6.0)));
}

#[test]
fn failed_lines_do_not_update_last() {
    let evaluation = evaluate("5\nmissing * 2\nlast");

    assert!(evaluation.lines[1].has_error());
    assert_eq!(evaluation.lines[2].result, number(5.0));
}

#[test]
fn failed_lines_do_not_contribute_to_sums() {
    let evaluation = evaluate("total:\n  4\n  oops +\n  6");

    assert_eq!(evaluation.lines[0].result, number(10.0));
    assert_eq!(evaluation.lines[0].children, vec![1, 3]);
    assert!(!evaluation.lines[0].has_error());
}

#[test]
fn incompatible_values_fail_the_block() {
    let evaluation = evaluate("list:\n  \"a\"\n  1");
    let block = &evaluation.lines[0];

    assert!(block.has_error());
    assert_eq!(block.result, number(1.0));
    assert!(!evaluation.lines[1].has_error());
}

#[test]
fn last_starts_at_zero() {
    let evaluation = evaluate("last + 1");

    assert_eq!(evaluation.lines[0].result, number(1.0));
}

#[test]
fn block_openers_do_not_update_last() {
    let evaluation = evaluate("7\ntotal:\nlast");

    assert_eq!(evaluation.lines[2].result, number(7.0));
}

#[test]
fn line_spans_count_characters() {
    let evaluation = evaluate("\"€\"\n\n12");
    let spans: Vec<_> = evaluation
        .lines
        .iter()
        .map(|line| (line.position_start, line.position_end))
        .collect();

    assert_eq!(spans, vec![(0, 3), (4, 4), (5, 7)]);
}

#[test]
fn commented_colon_is_not_a_block() {
    let evaluation = evaluate("# note:\n  1");

    assert_eq!(evaluation.lines[0].summing, None);
    assert!(!evaluation.lines[0].has_error());
    assert_eq!(evaluation.lines[1].result, number(1.0));
}

#[test]
fn bare_constants_are_not_worth_a_hint() {
    let oracle = MathOracle::new();
    let evaluation = evaluate("42\n2 + 2\nx = 3\n# note\n");
    let types: Vec<_> = evaluation
        .lines
        .iter()
        .map(|line| classify(line, &evaluation.lines, &oracle))
        .collect();

    assert_eq!(
        types,
        vec![
            LineType::Empty,
            LineType::Result,
            LineType::Empty,
            LineType::Empty,
            LineType::Empty,
        ]
    );
}

#[test]
fn blocks_always_show_their_sum() {
    let oracle = MathOracle::new();
    let evaluation = evaluate("total:\n  1");

    assert_eq!(
        classify(&evaluation.lines[0], &evaluation.lines, &oracle),
        LineType::Result
    );
}

#[test]
fn block_error_is_hidden_when_a_child_failed() {
    let oracle = MathOracle::new();
    let evaluation = evaluate("total:\n  sub:\n    \"a\"\n  \"b\"");
    let lines = &evaluation.lines;

    assert!(lines[0].has_error());
    assert!(lines[1].has_error());
    assert_eq!(lines[0].children, vec![1, 3]);
    assert_eq!(classify(&lines[0], lines, &oracle), LineType::Empty);
    assert_eq!(classify(&lines[1], lines, &oracle), LineType::Error);
}

#[test]
fn default_document_evaluates_cleanly() {
    let evaluation = evaluate(tally::DEFAULT_DOCUMENT);

    assert!(evaluation.lines.iter().all(|line| !line.has_error()));
    assert_eq!(evaluation.scope.get("monthly"), Some(&Value::Number(1670.0)));
    assert_eq!(evaluation.scope.get("yearly"), Some(&Value::Number(20040.0)));
}

#[test]
fn crlf_documents_evaluate_like_lf_ones() {
    let evaluation = evaluate("rent = 1200\r\ntotal:\r\n  rent\r\n  300\r\ntotal * 2\r");

    assert!(evaluation.lines.iter().all(|line| !line.has_error()));
    assert_eq!(evaluation.lines[1].summing.as_deref(), Some("total"));
    assert_eq!(evaluation.lines[4].result, number(3000.0));
}
