//! Error types for the notepad engine.
//!
//! Line-level failures never surface here; they are stored as text on the
//! affected line. These errors only come from the persistence boundary.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum NotepadError {
    #[error("IO error: {source}")]
    #[diagnostic(code(tally::store::io))]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Malformed store file: {source}")]
    #[diagnostic(
        code(tally::store::json),
        help("The store is a JSON object; delete the file to start over")
    )]
    Json {
        #[from]
        source: serde_json::Error,
    },

    #[error("Store file {} was written by an unsupported version ({found})", path.display())]
    #[diagnostic(code(tally::store::version))]
    UnsupportedVersion { path: PathBuf, found: u32 },
}

pub type Result<T> = std::result::Result<T, NotepadError>;
