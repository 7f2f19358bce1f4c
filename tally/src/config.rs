//! Notepad configuration

/// Document shown when the store holds nothing yet
pub const DEFAULT_DOCUMENT: &str = "\
# Welcome to tally
# Every line is evaluated as you type

rent = 1200
food = 340
rent + food

# Lines ending in a colon sum the indented lines below them
monthly:
  rent
  food
  utilities:
    45
    60
  25

yearly = monthly * 12

# Functions and built-ins
discount(price, percent) = price * (1 - percent / 100)
discount(120, 15)
sqrt(2) * pi
";

/// Configuration for a notepad session
#[derive(Debug, Clone, PartialEq)]
pub struct NotepadConfig {
    /// Quiet period before a burst of selection changes is applied
    pub debounce_window_ms: u64,

    /// Maximum number of distinct line texts kept in the parse cache
    pub cache_capacity: usize,

    /// Key the document is persisted under
    pub storage_key: String,

    /// Decimal places shown for numeric results
    pub result_precision: usize,

    /// Document used when the store is empty
    pub default_document: String,
}

impl Default for NotepadConfig {
    fn default() -> Self {
        Self {
            debounce_window_ms: 50,
            cache_capacity: 4096,
            storage_key: "input".to_string(),
            result_precision: 10,
            default_document: DEFAULT_DOCUMENT.to_string(),
        }
    }
}
