use pretty_assertions::assert_eq;
use std::io;
use tally::{
    JsonFileStore, MemoryStore, NotepadConfig, NotepadError, Selection, Session, Store,
    error::Result,
};
use tally_interpreter::{MathOracle, Value};

fn session() -> Session {
    Session::in_memory(NotepadConfig::default())
}

struct FailingStore;

impl Store for FailingStore {
    fn load(&self, _key: &str) -> Result<Option<String>> {
        Err(NotepadError::Io {
            source: io::Error::other("disk unavailable"),
        })
    }

    fn save(&mut self, _key: &str, _value: &str) -> Result<()> {
        Err(NotepadError::Io {
            source: io::Error::other("disk full"),
        })
    }
}

#[test]
fn open_reads_the_stored_document() {
    let store = MemoryStore::with_entry("input", "1 + 2");
    let mut session = Session::open(MathOracle::new(), Box::new(store), NotepadConfig::default());
    session.initialize();

    assert_eq!(session.raw(), "1 + 2");
    assert_eq!(session.lines()[0].result, Some(Value::Number(3.0)));
    assert_eq!(session.passes(), 1);
}

#[test]
fn open_falls_back_to_the_default_document() {
    let session = Session::open(
        MathOracle::new(),
        Box::new(MemoryStore::new()),
        NotepadConfig::default(),
    );

    assert_eq!(session.raw(), tally::DEFAULT_DOCUMENT);
}

#[test]
fn unreadable_store_falls_back_to_the_default_document() {
    let config = NotepadConfig {
        default_document: "40 + 2".to_string(),
        ..NotepadConfig::default()
    };
    let mut session = Session::open(MathOracle::new(), Box::new(FailingStore), config);
    session.initialize();

    assert_eq!(session.lines()[0].result, Some(Value::Number(42.0)));
}

#[test]
fn initialize_publishes_markup() {
    let store = MemoryStore::with_entry("input", "2 * 21");
    let mut session = Session::open(MathOracle::new(), Box::new(store), NotepadConfig::default());
    let mut updates = session.subscribe();

    session.initialize();

    let markup = updates.try_recv().unwrap();
    assert_eq!(markup, session.markup());
    assert!(markup.contains(">42</span>"));
}

#[test]
fn unchanged_edit_is_a_no_op() {
    let mut session = session();

    assert!(session.apply_edit("1 + 1", 5, 5));
    let passes = session.passes();
    let last = session.state().last;

    assert!(!session.apply_edit("1 + 1", 5, 5));
    assert_eq!(session.passes(), passes);
    assert_eq!(session.state().last, last);
}

#[test]
fn moving_the_selection_in_an_edit_reruns_the_pipeline() {
    let mut session = session();
    session.apply_edit("1 + 1", 5, 5);

    assert!(session.apply_edit("1 + 1", 0, 1));
    assert_eq!(session.passes(), 2);
    assert_eq!(session.selection_text(), "1");
}

#[test]
fn edits_are_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notepad.json");
    let mut session = Session::new(
        MathOracle::new(),
        Box::new(JsonFileStore::new(&path)),
        NotepadConfig::default(),
    );

    session.apply_edit("rent = 1200", 0, 0);

    let stored = JsonFileStore::new(&path).load("input").unwrap();
    assert_eq!(stored.as_deref(), Some("rent = 1200"));
}

#[test]
fn failing_store_does_not_stop_evaluation() {
    let mut session = Session::new(MathOracle::new(), Box::new(FailingStore), NotepadConfig::default());

    assert!(session.apply_edit("6 * 7", 0, 0));
    assert_eq!(session.lines()[0].result, Some(Value::Number(42.0)));
}

#[test]
fn selection_bounds_are_clamped_to_the_text() {
    let mut session = session();
    session.apply_edit("12", 1, 40);

    assert_eq!(session.selection(), Selection { start: 1, end: 2 });
    assert_eq!(session.selection_text(), "2");
}

#[test]
fn selection_bursts_run_the_tracker_once() {
    let mut session = session();
    session.apply_edit("1 + 1\n2 + 2\n3 + 3", 0, 0);
    let before = session.state().last;

    session.request_selection(1, 1, 0);
    session.request_selection(7, 7, 10);
    session.request_selection(13, 15, 20);

    assert!(!session.tick(69));
    assert_eq!(session.state().last, before);

    assert!(session.tick(70));
    assert_eq!(session.state().last, before + 1);
    assert_eq!(session.selection(), Selection { start: 13, end: 15 });

    assert!(!session.tick(500));
    assert_eq!(session.state().last, before + 1);
}

#[test]
fn selection_changes_do_not_re_evaluate() {
    let mut session = session();
    session.apply_edit("1 + 1\n2 + 2", 0, 0);
    let passes = session.passes();

    session.apply_selection(7, 7);

    assert_eq!(session.passes(), passes);
    let selected: Vec<_> = session.lines().iter().map(|line| line.is_selected()).collect();
    assert_eq!(selected, vec![false, true]);
}

#[test]
fn edits_cancel_pending_selection_requests() {
    let mut session = session();
    session.apply_edit("1", 0, 0);
    session.request_selection(1, 1, 0);

    session.apply_edit("12", 2, 2);

    assert!(!session.has_pending_selection());
    assert!(!session.tick(1000));
    assert_eq!(session.selection(), Selection { start: 2, end: 2 });
}

#[test]
fn selected_line_is_highlighted_and_hides_its_error() {
    let mut session = session();
    session.apply_edit("1 +\n2", 0, 0);

    assert!(session.markup().starts_with("<div class=\"empty highlight\">"));

    session.apply_selection(5, 5);
    assert!(session.markup().starts_with("<div class=\"error\">"));
    assert!(session.markup().contains("data-prefix=\" // \""));
}

#[test]
fn replace_selection_moves_the_caret_past_the_insert() {
    let mut session = session();
    session.apply_edit("1 + 2", 4, 5);

    session.replace_selection("40", false);

    assert_eq!(session.raw(), "1 + 40");
    assert_eq!(session.selection(), Selection { start: 6, end: 6 });
    assert_eq!(session.lines()[0].result, Some(Value::Number(41.0)));
}

#[test]
fn replace_selection_can_keep_the_insert_selected() {
    let mut session = session();
    session.apply_edit("1 + 2", 4, 5);

    session.replace_selection("40", true);

    assert_eq!(session.selection(), Selection { start: 4, end: 6 });
    assert_eq!(session.selection_text(), "40");
}

#[test]
fn every_subscriber_gets_every_render() {
    let mut session = session();
    let mut first = session.subscribe();
    let mut second = session.subscribe();
    drop(session.subscribe());

    session.apply_edit("1", 0, 0);
    session.apply_edit("2", 0, 0);

    for updates in [&mut first, &mut second] {
        assert!(updates.try_recv().unwrap().contains("data-code=\"1\""));
        assert!(updates.try_recv().unwrap().contains("data-code=\"2\""));
        assert!(updates.try_recv().is_err());
    }
}

#[test]
fn state_tracks_the_document_height() {
    let mut session = session();
    session.apply_edit("a = 1\nb = 2\n", 0, 0);

    assert_eq!(session.state().height, 3);
    assert_eq!(session.state().length(), 12);
    assert_eq!(session.scope().get("b"), Some(&Value::Number(2.0)));
}
