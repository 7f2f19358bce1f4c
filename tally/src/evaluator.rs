//! Line evaluator
//!
//! Splits the raw text into lines and evaluates them top to bottom in a single
//! pass, threading one scope through the whole document. Lines ending in a
//! colon open summation blocks that collect the values of the more-indented
//! lines below them.

use crate::cache::ParseCache;
use crate::line::{self, Line};
use tally_interpreter::{LAST, Oracle, Scope, Value};

/// Outcome of one evaluation pass
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub lines: Vec<Line>,

    /// Scope as it stood after the last line
    pub scope: Scope,
}

/// Evaluate a whole document
///
/// Every pass starts from a fresh scope seeded with `last = 0`. The cache
/// outlives the pass and is shared with later ones.
pub fn recompute<O>(raw: &str, cache: &mut ParseCache, oracle: &O) -> Evaluation
where
    O: Oracle + ?Sized,
{
    let mut pass = Pass {
        lines: Vec::new(),
        scope: Scope::seeded(),
        open: Vec::new(),
        oracle,
    };

    let mut position = 0;
    for (index, code) in raw.split('\n').enumerate() {
        let line = Line::new(index, code, position);
        position = line.position_end + 1;
        pass.push(line, cache);
    }
    pass.finish();

    tracing::debug!(
        lines = pass.lines.len(),
        cached = cache.len(),
        hits = cache.stats().cache_hits,
        misses = cache.stats().cache_misses,
        "recomputed document"
    );

    Evaluation {
        lines: pass.lines,
        scope: pass.scope,
    }
}

struct Pass<'o, O: ?Sized> {
    lines: Vec<Line>,
    scope: Scope,

    /// Indices of open blocks; indents strictly increase towards the top
    open: Vec<usize>,

    oracle: &'o O,
}

impl<O> Pass<'_, O>
where
    O: Oracle + ?Sized,
{
    fn push(&mut self, mut line: Line, cache: &mut ParseCache) {
        while let Some(&top) = self.open.last() {
            if self.lines[top].indent < line.indent {
                break;
            }
            self.open.pop();
            self.close(top);
        }

        let index = self.lines.len();

        if let Some(name) = line::block_name(&line.code) {
            line.summing = Some(name);
            line.result = Some(self.oracle.zero());
            self.lines.push(line);
            self.open.push(index);
            return;
        }

        match cache.get_or_compile(&line.code, self.oracle) {
            Ok(entry) => {
                match self.oracle.evaluate(&entry.compiled, &mut self.scope) {
                    Ok(result) => line.result = result,
                    Err(error) => line.error = error.to_string(),
                }
                line.parsed = Some(entry.parsed);
                line.compiled = Some(entry.compiled);
            }
            Err(error) => line.error = error.to_string(),
        }

        let result = line.result.clone();
        self.lines.push(line);

        if let Some(value) = result {
            self.fold(index, &value);
            self.scope.set(LAST, value);
        }
    }

    /// Terminate a block and bind its sum in scope
    fn close(&mut self, index: usize) {
        let block = &mut self.lines[index];
        block.closed = true;

        let Some(result) = block.result.clone() else {
            return;
        };
        if let Some(name) = &block.summing {
            tracing::trace!(block = %name, %result, "closed block");
            self.scope.set(name.clone(), result.clone());
        }
        self.fold(index, &result);
    }

    /// Add a value into the innermost open block, if any
    fn fold(&mut self, child: usize, value: &Value) {
        let Some(&parent) = self.open.last() else {
            return;
        };

        let oracle = self.oracle;
        let block = &mut self.lines[parent];
        block.children.push(child);

        let current = block.result.clone().unwrap_or_else(|| oracle.zero());
        match oracle.add(&current, value) {
            Ok(sum) => block.result = Some(sum),
            Err(error) => block.error = error.to_string(),
        }
    }

    /// Unwind blocks still open at the end of the document
    ///
    /// They stay unclosed, but each still contributes to its parent.
    fn finish(&mut self) {
        while let Some(index) = self.open.pop() {
            if let Some(result) = self.lines[index].result.clone() {
                self.fold(index, &result);
            }
        }
    }
}
