use crate::{InterpreterSession, OracleError, RuntimeError, TestHarnessError};

fn runtime_error(harness: &mut InterpreterSession, code: &str) -> RuntimeError {
    match harness.evaluate(code) {
        Err(TestHarnessError::Oracle {
            source: OracleError::Runtime(error),
        }) => error,
        other => panic!("Expected runtime error for `{}`, got: {:?}", code, other),
    }
}

#[test]
fn test_undefined_symbol() {
    let mut harness = InterpreterSession::new();
    let error = runtime_error(&mut harness, "apples + 1");

    assert!(matches!(error, RuntimeError::UndefinedSymbol { ref name, .. } if name == "apples"));
    assert_eq!(error.to_string(), "Undefined symbol apples");
}

#[test]
fn test_undefined_function() {
    let mut harness = InterpreterSession::new();
    let error = runtime_error(&mut harness, "frobnicate(2)");

    assert_eq!(error.to_string(), "Undefined function frobnicate");
}

#[test]
fn test_calling_a_number() {
    let mut harness = InterpreterSession::new();
    harness.evaluate("x = 5").unwrap();

    let error = runtime_error(&mut harness, "x(1)");
    assert_eq!(error.to_string(), "x is not a function");
}

#[test]
fn test_builtin_arity_is_a_compile_error() {
    let mut harness = InterpreterSession::new();
    let error = runtime_error(&mut harness, "sqrt(1, 2)");

    assert_eq!(
        error.to_string(),
        "Wrong number of arguments in function sqrt (2 provided, 1 expected)"
    );
}

#[test]
fn test_user_function_arity() {
    let mut harness = InterpreterSession::new();
    harness.evaluate("f(a, b) = a + b").unwrap();

    let error = runtime_error(&mut harness, "f(1)");
    assert_eq!(
        error.to_string(),
        "Wrong number of arguments in function f (1 provided, 2 expected)"
    );
}

#[test]
fn test_invalid_operation() {
    let mut harness = InterpreterSession::new();
    let error = runtime_error(&mut harness, "\"a\" - 1");

    assert_eq!(error.to_string(), "Cannot apply - to string and number");
    assert!(matches!(error, RuntimeError::InvalidOperation { span: Some(_), .. }));
}

#[test]
fn test_string_argument_to_builtin() {
    let mut harness = InterpreterSession::new();
    let error = runtime_error(&mut harness, "sqrt(\"four\")");

    assert_eq!(error.to_string(), "Cannot apply sqrt to string");
}

#[test]
fn test_invalid_factorial() {
    let mut harness = InterpreterSession::new();

    assert!(matches!(
        runtime_error(&mut harness, "(-1)!"),
        RuntimeError::InvalidFactorial { .. }
    ));
    assert!(matches!(
        runtime_error(&mut harness, "2.5!"),
        RuntimeError::InvalidFactorial { .. }
    ));
}

#[test]
fn test_unbounded_recursion_is_stopped() {
    let mut harness = InterpreterSession::new();
    harness.evaluate("loop(x) = loop(x + 1)").unwrap();

    let error = runtime_error(&mut harness, "loop(0)");
    assert_eq!(error, RuntimeError::RecursionLimit { max_depth: 100 });
}

#[test]
fn test_failed_assignment_leaves_scope_untouched() {
    let mut harness = InterpreterSession::new();

    runtime_error(&mut harness, "y = missing * 2");

    assert!(harness.get_variable("y").is_err());
}
