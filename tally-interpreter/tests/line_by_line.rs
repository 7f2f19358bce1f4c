//! Evaluating a notepad document line by line through the public API

use pretty_assertions::assert_eq;
use tally_interpreter::{LAST, MathOracle, Oracle, Scope, Value};

/// Evaluate every line against one scope, updating `last` after each value
fn run(document: &str) -> (Vec<Result<Option<Value>, String>>, Scope) {
    let oracle = MathOracle::new();
    let mut scope = Scope::seeded();

    let results = document
        .lines()
        .map(|code| {
            let result = oracle
                .parse(code)
                .and_then(|parsed| oracle.compile(&parsed))
                .and_then(|compiled| oracle.evaluate(&compiled, &mut scope))
                .map_err(|error| error.to_string());
            if let Ok(Some(value)) = &result {
                scope.set(LAST, value.clone());
            }
            result
        })
        .collect();

    (results, scope)
}

#[test]
fn budget_document() {
    let (results, scope) = run("# budget\nrent = 1200\nfood = 300\nrent + food\nlast / 2");

    assert_eq!(
        results,
        vec![
            Ok(None),
            Ok(Some(Value::Number(1200.0))),
            Ok(Some(Value::Number(300.0))),
            Ok(Some(Value::Number(1500.0))),
            Ok(Some(Value::Number(750.0))),
        ]
    );
    assert_eq!(scope.last(), Some(&Value::Number(750.0)));
}

#[test]
fn errors_stay_on_their_line() {
    let (results, scope) = run("1 +\nmissing\n2 * 3");

    assert!(results[0].is_err());
    assert_eq!(results[1], Err("Undefined symbol missing".to_string()));
    assert_eq!(results[2], Ok(Some(Value::Number(6.0))));
    assert_eq!(scope.last(), Some(&Value::Number(6.0)));
}

#[test]
fn bindings_keep_definition_order() {
    let (_, scope) = run("b = 2\na = 1\nf(x) = x");

    let names: Vec<&str> = scope.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["last", "b", "a", "f"]);
}
