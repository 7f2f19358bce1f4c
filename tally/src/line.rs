//! One evaluated line of a notepad document

use tally_interpreter::{Compiled, Parsed, Value};

/// Width of one indentation unit, in spaces
pub const INDENT_UNIT: &str = "  ";

/// A line of the document together with everything computed for it
///
/// Positions are character offsets into the raw text. The span is half-open
/// and excludes the terminating newline, so `position_end` of one line is one
/// less than `position_start` of the next.
#[derive(Debug, Clone)]
pub struct Line {
    pub index: usize,
    pub code: String,
    pub position_start: usize,
    pub position_end: usize,

    /// Number of leading two-space units
    pub indent: usize,

    /// Name of the block this line opens, if it is a `name:` line
    pub summing: Option<String>,

    /// Whether a later line terminated this block
    pub closed: bool,

    /// Indices of the lines folded into this block
    pub children: Vec<usize>,

    pub result: Option<Value>,

    /// Failure message; empty when the line is fine
    pub error: String,

    /// Set by the selection tracker
    pub selected: Option<bool>,

    pub parsed: Option<Parsed>,
    pub compiled: Option<Compiled>,
}

impl Line {
    pub fn new(index: usize, code: &str, position_start: usize) -> Self {
        let length = code.chars().count();
        Self {
            index,
            code: code.to_string(),
            position_start,
            position_end: position_start + length,
            indent: indent_of(code),
            summing: None,
            closed: false,
            children: Vec::new(),
            result: None,
            error: String::new(),
            selected: None,
            parsed: None,
            compiled: None,
        }
    }

    pub fn is_block(&self) -> bool {
        self.summing.is_some()
    }

    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }

    pub fn is_selected(&self) -> bool {
        self.selected == Some(true)
    }
}

/// Indentation level of a line of code
///
/// Only lines starting with two literal spaces are indented. The level is the
/// number of whitespace pairs in the leading whitespace run.
pub fn indent_of(code: &str) -> usize {
    if !code.starts_with(INDENT_UNIT) {
        return 0;
    }
    code.chars().take_while(|c| c.is_whitespace()).count() / 2
}

/// Name of the block a line opens, if it opens one
///
/// A block opener ends in a colon and contains no comment marker.
pub fn block_name(code: &str) -> Option<String> {
    if code.contains('#') {
        return None;
    }
    code.trim()
        .strip_suffix(':')
        .map(|name| name.trim().to_string())
}
