//! Unit tests for the notepad engine building blocks

pub mod test_debounce;
pub mod test_line;
pub mod test_selection;
