//! Acceptance tests for the Tally interpreter
//!
//! These tests drive the parser → compiler → evaluator pipeline one line at a
//! time, the way the notepad engine does.

pub mod test_runtime_errors;
