//! Tally: a live notepad calculator engine
//!
//! Every line of a notepad document is evaluated as the user types. A pass
//! goes raw text → line evaluator → selection tracker → renderer, and the
//! resulting markup is broadcast to subscribers. Cursor movements take the
//! short path through the selection tracker and renderer only.

pub mod broadcast;
pub mod cache;
pub mod config;
pub mod debounce;
pub mod editing;
pub mod error;
pub mod evaluator;
pub mod line;
pub mod render;
pub mod selection;
pub mod session;
pub mod store;

#[cfg(test)]
#[path = "tests/mod.rs"]
mod tests;

pub use broadcast::MarkupBroadcast;
pub use cache::{CacheEntry, CacheStats, ParseCache};
pub use config::{DEFAULT_DOCUMENT, NotepadConfig};
pub use debounce::{Debouncer, Millis};
pub use editing::{Intent, Modifiers};
pub use error::NotepadError;
pub use evaluator::{Evaluation, recompute};
pub use line::Line;
pub use render::{LineType, RenderedLine, Renderer, Token, TokenClass};
pub use selection::{Selection, annotate};
pub use session::{ItemState, Session};
pub use store::{JsonFileStore, MemoryStore, Store};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a tracing subscriber filtered by `RUST_LOG`
///
/// Does nothing unless `RUST_LOG` is set, and only ever runs once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
