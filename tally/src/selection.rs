//! Selection tracker
//!
//! Marks the lines a selection touches. This is the cheap path taken on every
//! cursor movement; it never consults the oracle.

use crate::line::Line;

/// Selection bounds in character offsets, `start <= end`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// Selection between two offsets, ordered and clamped to `length`
    pub fn new(start: usize, end: usize, length: usize) -> Self {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        Self {
            start: start.min(length),
            end: end.min(length),
        }
    }

    pub fn caret(offset: usize, length: usize) -> Self {
        Self::new(offset, offset, length)
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.is_collapsed()
    }

    /// Whether the selection touches a line span
    ///
    /// Boundaries are inclusive on both sides, so a caret sitting on a line
    /// break touches the lines either side of it.
    pub fn touches(&self, line: &Line) -> bool {
        line.position_end >= self.start && line.position_start <= self.end
    }

    /// The selected part of `raw`
    pub fn text(&self, raw: &str) -> String {
        raw.chars().skip(self.start).take(self.len()).collect()
    }
}

/// Byte index of the character at offset `chars`, or the end of `text`
pub fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map_or(text.len(), |(index, _)| index)
}

/// Flag every line the selection touches and return the selected text
pub fn annotate(lines: &mut [Line], selection: Selection, raw: &str) -> String {
    for line in lines.iter_mut() {
        line.selected = Some(selection.touches(line));
    }
    selection.text(raw)
}
