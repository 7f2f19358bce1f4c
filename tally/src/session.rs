//! Session state
//!
//! A `Session` owns everything one notepad needs between events: the raw
//! text, the parse cache, the current selection and the lines of the last
//! pass. Edits run the full pipeline (evaluate, track selection, render);
//! cursor movements only re-run the selection tracker and the renderer.

use crate::broadcast::MarkupBroadcast;
use crate::cache::{CacheStats, ParseCache};
use crate::config::NotepadConfig;
use crate::debounce::{Debouncer, Millis};
use crate::evaluator;
use crate::line::Line;
use crate::render::Renderer;
use crate::selection::{self, Selection};
use crate::store::Store;
use tally_interpreter::{MathOracle, Oracle, Scope};
use tokio::sync::broadcast;

/// Mutable state of one notepad
#[derive(Debug)]
pub struct ItemState {
    pub raw: String,

    /// Text currently selected
    pub selection: String,

    pub lines: Vec<Line>,
    pub cache: ParseCache,
    pub selection_start: usize,
    pub selection_end: usize,

    /// Incremented every time the selection tracker runs
    pub last: u64,

    /// Number of lines in the last pass
    pub height: usize,
}

impl ItemState {
    fn new(cache_capacity: usize) -> Self {
        Self {
            raw: String::new(),
            selection: String::new(),
            lines: Vec::new(),
            cache: ParseCache::with_capacity(cache_capacity),
            selection_start: 0,
            selection_end: 0,
            last: 0,
            height: 0,
        }
    }

    /// Length of the raw text in characters
    pub fn length(&self) -> usize {
        self.raw.chars().count()
    }

    pub fn selection_bounds(&self) -> Selection {
        Selection {
            start: self.selection_start,
            end: self.selection_end,
        }
    }
}

pub struct Session<O = MathOracle> {
    state: ItemState,
    scope: Scope,
    markup: String,
    oracle: O,
    store: Box<dyn Store>,
    config: NotepadConfig,
    renderer: Renderer,
    debounce: Debouncer<Selection>,
    broadcast: MarkupBroadcast,
    passes: usize,
}

impl<O: std::fmt::Debug> std::fmt::Debug for Session<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("oracle", &self.oracle)
            .field("config", &self.config)
            .field("passes", &self.passes)
            .finish_non_exhaustive()
    }
}

impl Session<MathOracle> {
    /// Session over the built-in expression language with an in-memory store
    pub fn in_memory(config: NotepadConfig) -> Self {
        Self::new(
            MathOracle::new(),
            Box::new(crate::store::MemoryStore::new()),
            config,
        )
    }
}

impl<O: Oracle> Session<O> {
    /// Empty session; nothing is evaluated until the first edit
    pub fn new(oracle: O, store: Box<dyn Store>, config: NotepadConfig) -> Self {
        Self {
            state: ItemState::new(config.cache_capacity),
            scope: Scope::seeded(),
            markup: String::new(),
            oracle,
            store,
            renderer: Renderer::new(config.result_precision),
            debounce: Debouncer::new(config.debounce_window_ms),
            broadcast: MarkupBroadcast::new(),
            passes: 0,
            config,
        }
    }

    /// Session seeded with the stored document, or the default one
    ///
    /// Call `initialize` once the display is ready to run the first pass.
    pub fn open(oracle: O, store: Box<dyn Store>, config: NotepadConfig) -> Self {
        let mut session = Self::new(oracle, store, config);

        let key = session.config.storage_key.clone();
        session.state.raw = match session.store.load(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => session.config.default_document.clone(),
            Err(error) => {
                tracing::warn!(%error, "failed to load stored document, using the default");
                session.config.default_document.clone()
            }
        };
        session
    }

    /// Run the first full pass over the current text
    pub fn initialize(&mut self) {
        tracing::debug!(length = self.state.length(), "initializing notepad");
        self.recalculate();
    }

    /// Apply an edit event carrying the whole text and the selection
    ///
    /// Returns false, doing nothing, when neither the text nor the selection
    /// changed. Otherwise the text is persisted and fully re-evaluated.
    pub fn apply_edit(&mut self, raw: &str, selection_start: usize, selection_end: usize) -> bool {
        let selection = Selection::new(selection_start, selection_end, raw.chars().count());
        if raw == self.state.raw && selection == self.state.selection_bounds() {
            return false;
        }

        // The edit carries the newest selection
        self.debounce.take();

        self.state.raw = raw.to_string();
        self.persist();
        self.state.selection_start = selection.start;
        self.state.selection_end = selection.end;
        self.recalculate();
        true
    }

    /// Immediately re-run the selection tracker and the renderer
    pub fn apply_selection(&mut self, selection_start: usize, selection_end: usize) {
        let selection = Selection::new(selection_start, selection_end, self.state.length());
        self.read_selection(selection);
    }

    /// Report a cursor movement; applied by `tick` once movements settle
    pub fn request_selection(&mut self, selection_start: usize, selection_end: usize, now: Millis) {
        self.debounce.request(
            Selection {
                start: selection_start,
                end: selection_end,
            },
            now,
        );
    }

    /// Advance the session clock, applying a settled selection request
    ///
    /// Returns whether the selection tracker ran.
    pub fn tick(&mut self, now: Millis) -> bool {
        match self.debounce.poll(now) {
            Some(selection) => {
                tracing::trace!(now, ?selection, "debounced selection fired");
                self.apply_selection(selection.start, selection.end);
                true
            }
            None => false,
        }
    }

    /// Apply a pending selection request without waiting for its deadline
    pub fn flush_selection(&mut self) -> bool {
        match self.debounce.take() {
            Some(selection) => {
                self.apply_selection(selection.start, selection.end);
                true
            }
            None => false,
        }
    }

    /// Replace the selected text
    ///
    /// The cursor ends up after the inserted text, or the inserted text stays
    /// selected when `select` is true.
    pub fn replace_selection(&mut self, replacement: &str, select: bool) {
        let selection = self.state.selection_bounds();
        let raw = &self.state.raw;

        let start = selection::byte_offset(raw, selection.start);
        let end = selection::byte_offset(raw, selection.end);
        let updated = format!("{}{}{}", &raw[..start], replacement, &raw[end..]);

        let inserted_end = selection.start + replacement.chars().count();
        let caret_start = if select { selection.start } else { inserted_end };
        self.apply_edit(&updated, caret_start, inserted_end);
    }

    /// Receive the markup of every render from now on
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.broadcast.subscribe()
    }

    pub fn state(&self) -> &ItemState {
        &self.state
    }

    pub fn raw(&self) -> &str {
        &self.state.raw
    }

    pub fn lines(&self) -> &[Line] {
        &self.state.lines
    }

    /// Markup of the last render
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Scope left by the last pass
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn selection(&self) -> Selection {
        self.state.selection_bounds()
    }

    pub fn selection_text(&self) -> &str {
        &self.state.selection
    }

    pub fn has_pending_selection(&self) -> bool {
        self.debounce.is_pending()
    }

    pub fn config(&self) -> &NotepadConfig {
        &self.config
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn cache_stats(&self) -> &CacheStats {
        self.state.cache.stats()
    }

    /// Number of full evaluation passes run so far
    pub fn passes(&self) -> usize {
        self.passes
    }

    fn recalculate(&mut self) {
        let evaluation = evaluator::recompute(&self.state.raw, &mut self.state.cache, &self.oracle);
        self.state.lines = evaluation.lines;
        self.state.height = self.state.lines.len();
        self.scope = evaluation.scope;
        self.passes += 1;

        self.read_selection(self.state.selection_bounds());
    }

    fn read_selection(&mut self, selection: Selection) {
        self.state.selection = selection::annotate(&mut self.state.lines, selection, &self.state.raw);
        self.state.selection_start = selection.start;
        self.state.selection_end = selection.end;
        self.state.last += 1;

        self.markup = self.renderer.render(&self.state.lines, &self.oracle);
        self.broadcast.publish(&self.markup);
    }

    fn persist(&mut self) {
        if let Err(error) = self.store.save(&self.config.storage_key, &self.state.raw) {
            tracing::warn!(%error, "failed to persist document");
        }
    }
}
