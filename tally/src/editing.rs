//! Editing intents
//!
//! Keyboard behaviour layered on top of `Session::replace_selection`. Each
//! handler reports whether it consumed the intent, so the host knows to
//! suppress its own default handling of the key.

use crate::line::{INDENT_UNIT, Line};
use crate::session::Session;
use tally_interpreter::Oracle;

/// A decoded keyboard intent
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Newline that keeps the indentation of the current line
    Enter,
    /// Indent the selected lines
    Indent,
    /// Outdent the selected lines
    Outdent,
    /// Duplicate the current line, or the selected text
    Duplicate,
    /// Bump a selected number up by 1, or by 10 with `shift`
    Increment { shift: bool },
    /// Bump a selected number down by 1, or by 10 with `shift`
    Decrement { shift: bool },
    /// Typed text replacing the selection
    Insert(String),
}

/// Modifier keys held with a key press
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub control: bool,
    pub meta: bool,
}

impl Intent {
    /// Decode a key press, using browser-style key names
    ///
    /// Returns `None` for keys with no notepad-specific behaviour.
    pub fn from_key(key: &str, modifiers: Modifiers) -> Option<Intent> {
        let command = modifiers.control || modifiers.meta;
        match key {
            // `в` sits on the D key of a Russian layout
            "d" | "D" | "в" if command => Some(Intent::Duplicate),
            _ if command => None,
            "Enter" => Some(Intent::Enter),
            "Tab" if modifiers.shift => Some(Intent::Outdent),
            "Tab" => Some(Intent::Indent),
            "ArrowUp" => Some(Intent::Increment {
                shift: modifiers.shift,
            }),
            "ArrowDown" => Some(Intent::Decrement {
                shift: modifiers.shift,
            }),
            text if text.chars().count() == 1 => Some(Intent::Insert(text.to_string())),
            _ => None,
        }
    }
}

impl<O: Oracle> Session<O> {
    /// Handle an editing intent; returns whether it was consumed
    pub fn handle_intent(&mut self, intent: Intent) -> bool {
        // Act on where the cursor is now, not where it was at the last tick
        self.flush_selection();

        tracing::trace!(?intent, "handling intent");
        match intent {
            Intent::Enter => self.insert_newline(),
            Intent::Indent => {
                self.add_indent();
                true
            }
            Intent::Outdent => {
                self.remove_indent();
                true
            }
            Intent::Duplicate => self.duplicate_selection(),
            Intent::Increment { shift } => self.step_number(if shift { 10.0 } else { 1.0 }),
            Intent::Decrement { shift } => self.step_number(if shift { -10.0 } else { -1.0 }),
            Intent::Insert(text) => {
                self.replace_selection(&text, false);
                true
            }
        }
    }

    /// Insert a newline indented like the last selected line, one level
    /// deeper after a block opener
    pub fn insert_newline(&mut self) -> bool {
        let Some(line) = self.lines().iter().rev().find(|line| line.is_selected()) else {
            return false;
        };

        let depth = line.indent + usize::from(line.is_block());
        let insert = format!("\n{}", INDENT_UNIT.repeat(depth));
        self.replace_selection(&insert, false);
        true
    }

    /// Duplicate the current line below itself, or the selected text after
    /// itself, keeping the copy selected
    pub fn duplicate_selection(&mut self) -> bool {
        let selection = self.selection();

        if selection.is_collapsed() {
            let Some(line) = self.lines().iter().find(|line| line.is_selected()) else {
                return false;
            };
            let (end, insert) = (line.position_end, format!("\n{}", line.code));

            self.apply_selection(end, end);
            self.replace_selection(&insert, false);
        } else {
            let text = self.selection_text().to_string();

            self.apply_selection(selection.end, selection.end);
            self.replace_selection(&text, true);
        }
        true
    }

    /// Indent every selected line by one unit
    pub fn add_indent(&mut self) {
        let selected: Vec<&Line> = self.lines().iter().filter(|line| line.is_selected()).collect();
        let (Some(first), Some(last)) = (selected.first(), selected.last()) else {
            return;
        };

        let region = (first.position_start, last.position_end);
        let affected = selected.len();
        let replacement = selected
            .iter()
            .map(|line| format!("{INDENT_UNIT}{}", line.code))
            .collect::<Vec<_>>()
            .join("\n");

        let selection = self.selection();
        let start = selection.start + INDENT_UNIT.len();
        let end = selection.end + affected * INDENT_UNIT.len();

        self.apply_selection(region.0, region.1);
        self.replace_selection(&replacement, false);
        self.apply_selection(start, end);
    }

    /// Remove one indentation unit from every selected line that has one
    ///
    /// Selected lines without a leading unit are kept as they are.
    pub fn remove_indent(&mut self) {
        let selected: Vec<&Line> = self.lines().iter().filter(|line| line.is_selected()).collect();

        let (Some(first), Some(last)) = (
            selected.iter().position(|line| is_indented(line)),
            selected.iter().rposition(|line| is_indented(line)),
        ) else {
            return;
        };

        let region = (selected[first].position_start, selected[last].position_end);
        let affected = selected[first..=last]
            .iter()
            .filter(|line| is_indented(line))
            .count();
        let replacement = selected[first..=last]
            .iter()
            .map(|line| line.code.strip_prefix(INDENT_UNIT).unwrap_or(&line.code))
            .collect::<Vec<_>>()
            .join("\n");

        let selection = self.selection();
        let start = selection.start.saturating_sub(INDENT_UNIT.len());
        let end = selection.end.saturating_sub(affected * INDENT_UNIT.len());

        self.apply_selection(region.0, region.1);
        self.replace_selection(&replacement, false);
        self.apply_selection(start, end.max(start));
    }

    /// Add `step` to a selected number, keeping the result selected
    ///
    /// Only applies when the selection is exactly a number such as `12`,
    /// `-3` or `4.5`.
    pub fn step_number(&mut self, step: f64) -> bool {
        let text = self.selection_text();
        if !is_plain_number(text) {
            return false;
        }
        let Ok(value) = text.parse::<f64>() else {
            return false;
        };

        let stepped = (value + step).to_string();
        self.replace_selection(&stepped, true);
        true
    }
}

fn is_indented(line: &Line) -> bool {
    line.code.starts_with(INDENT_UNIT)
}

/// Whether `text` is an optionally negative decimal such as `-12.5` or `7.`
fn is_plain_number(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (digits, ""),
    };

    !whole.is_empty()
        && whole.chars().all(|c| c.is_ascii_digit())
        && fraction.chars().all(|c| c.is_ascii_digit())
}
