use rusqlite::ffi;
use std::cell::Cell;
use zenith_core::db::{open_db_in_memory, DbError};
use zenith_core::persistence::{COLUMN_NAMES_KEY, STATE_KEY};
use zenith_core::{
    FilterState, KvRepository, RepoError, RepoResult, SessionState, Slot, SqliteKvRepository,
    Subject, TrackerService, ViewData, ViewTab, Weightage,
};

/// Counts writes before delegating to SQLite.
struct CountingRepo<'conn> {
    inner: SqliteKvRepository<'conn>,
    puts: Cell<usize>,
}

impl<'conn> CountingRepo<'conn> {
    fn new(conn: &'conn rusqlite::Connection) -> Self {
        Self {
            inner: SqliteKvRepository::new(conn),
            puts: Cell::new(0),
        }
    }
}

impl KvRepository for CountingRepo<'_> {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        self.inner.get(key)
    }

    fn put(&self, key: &str, value: &str) -> RepoResult<()> {
        self.puts.set(self.puts.get() + 1);
        self.inner.put(key, value)
    }

    fn remove(&self, key: &str) -> RepoResult<()> {
        self.inner.remove(key)
    }
}

/// Storage that is readable (empty) but rejects every write.
struct ReadOnlyRepo;

fn readonly_failure() -> RepoError {
    RepoError::Db(DbError::Sqlite(rusqlite::Error::SqliteFailure(
        ffi::Error::new(ffi::SQLITE_READONLY),
        Some("attempt to write a readonly database".to_string()),
    )))
}

impl KvRepository for ReadOnlyRepo {
    fn get(&self, _key: &str) -> RepoResult<Option<String>> {
        Ok(None)
    }

    fn put(&self, _key: &str, _value: &str) -> RepoResult<()> {
        Err(readonly_failure())
    }

    fn remove(&self, _key: &str) -> RepoResult<()> {
        Err(readonly_failure())
    }
}

#[test]
fn mutations_are_restored_after_reopen() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::new(&conn);

    let (id, math_id) = {
        let mut service = TrackerService::open(&repo);
        let id = service.state().physics[2].id;
        let math_id = service.state().math[0].id;
        assert!(service.toggle_progress(id, Slot::First, Subject::Physics));
        assert!(service.toggle_today(id, Slot::Third, Subject::Physics));
        assert!(service.set_weightage(math_id, Subject::Math, Weightage::High));
        assert!(service.rename_chapter(math_id, "Sets & Relations"));
        assert!(service.rename_column(
            ViewTab::Subject(Subject::Physics),
            Slot::Second,
            "Problems"
        ));
        (id, math_id)
    };

    let reopened = TrackerService::open(&repo);
    let (subject, chapter) = reopened.chapter(id).unwrap();
    assert_eq!(subject, Subject::Physics);
    assert_eq!(chapter.progress, [true, false, false]);
    assert_eq!(chapter.todays_tasks, [false, false, true]);

    let (_, math) = reopened.chapter(math_id).unwrap();
    assert_eq!(math.weightage, Weightage::High);
    assert_eq!(math.name, "Sets & Relations");
    assert_eq!(reopened.column_names().physics.col2, "Problems");
}

#[test]
fn unchanged_mutations_do_not_write() {
    let conn = open_db_in_memory().unwrap();
    let repo = CountingRepo::new(&conn);
    let mut service = TrackerService::open(&repo);
    let after_open = repo.puts.get();
    let id = service.state().physics[0].id;

    assert!(!service.toggle_progress(id, Slot::First, Subject::Math));
    assert!(!service.set_weightage(id, Subject::Physics, Weightage::Med));
    assert!(!service.reorder(ViewTab::Today, &[id]));
    assert!(!service.rename_column(ViewTab::Today, Slot::First, "Ignored"));
    assert_eq!(repo.puts.get(), after_open);

    assert!(service.toggle_progress(id, Slot::First, Subject::Physics));
    assert_eq!(repo.puts.get(), after_open + 1);
}

#[test]
fn reorder_writes_new_ranking() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::new(&conn);
    let mut service = TrackerService::open(&repo);
    let mut order: Vec<_> = service.state().chemistry.iter().map(|c| c.id).collect();
    order.rotate_left(1);

    assert!(service.reorder(ViewTab::Subject(Subject::Chemistry), &order));

    let reopened = TrackerService::open(&repo);
    let stored: Vec<_> = reopened.state().chemistry.iter().map(|c| c.id).collect();
    assert_eq!(stored, order);
}

#[test]
fn write_failures_keep_in_memory_state() {
    let mut service = TrackerService::open(ReadOnlyRepo);
    let id = service.state().math[1].id;

    assert!(service.toggle_progress(id, Slot::Second, Subject::Math));
    assert!(service.rename_column(ViewTab::Subject(Subject::Math), Slot::First, "Lectures"));
    service.set_sync_client_id(Some("client"));

    assert_eq!(service.state().math[1].progress, [false, true, false]);
    assert_eq!(service.column_names().math.col1, "Lectures");
    assert_eq!(service.sync_client_id(), Some("client"));
}

#[test]
fn cycle_weightage_walks_the_ring() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::new(&conn);
    let mut service = TrackerService::open(&repo);
    let id = service.state().chemistry[3].id;

    let mut seen = Vec::new();
    for _ in 0..3 {
        assert!(service.cycle_weightage(id, Subject::Chemistry));
        seen.push(service.chapter(id).unwrap().1.weightage);
    }

    assert_eq!(seen, vec![Weightage::High, Weightage::Low, Weightage::Med]);
    assert!(!service.cycle_weightage(id, Subject::Physics));
}

#[test]
fn sync_client_id_survives_reopen_and_clears() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::new(&conn);

    let mut service = TrackerService::open(&repo);
    service.set_sync_client_id(Some("abc.apps"));
    assert_eq!(
        TrackerService::open(&repo).sync_client_id(),
        Some("abc.apps")
    );

    service.set_sync_client_id(None);
    assert_eq!(TrackerService::open(&repo).sync_client_id(), None);
}

#[test]
fn views_reflect_session_tab_and_filters() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::new(&conn);
    let mut service = TrackerService::open(&repo);
    let id = service.state().math[0].id;
    service.toggle_progress(id, Slot::First, Subject::Math);
    service.toggle_progress(id, Slot::Second, Subject::Math);
    service.toggle_progress(id, Slot::Third, Subject::Math);
    service.toggle_today(id, Slot::First, Subject::Math);

    let session = SessionState {
        tab: ViewTab::Today,
        filters: FilterState::default(),
    };
    let ViewData::Today(groups) = service.view(&session) else {
        panic!("today tab must produce groups");
    };
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].subject, Subject::Math);

    let stats = service.global_stats();
    assert_eq!(stats.completed, 3);
    assert_eq!(
        service.column_stats(ViewTab::Subject(Subject::Math)),
        [5, 5, 5]
    );
    assert_eq!(service.displayed_column_names(ViewTab::Today).col1, "Task 1");
}

#[test]
fn state_and_column_names_use_separate_keys() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::new(&conn);
    let mut service = TrackerService::open(&repo);

    service.rename_column(ViewTab::Subject(Subject::Physics), Slot::Third, "Mocks");

    assert!(repo.get(STATE_KEY).unwrap().is_some());
    let stored_columns = repo.get(COLUMN_NAMES_KEY).unwrap().unwrap();
    assert!(stored_columns.contains("Mocks"));
    assert!(!repo.get(STATE_KEY).unwrap().unwrap().contains("Mocks"));
}

#[test]
fn flat_column_record_is_rewritten_per_subject_on_first_change() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::new(&conn);
    repo.put(
        COLUMN_NAMES_KEY,
        r#"{"col1":"Notes","col2":"Drills","col3":"Mocks"}"#,
    )
    .unwrap();

    let mut service = TrackerService::open(&repo);
    assert!(repo.get(COLUMN_NAMES_KEY).unwrap().unwrap().starts_with(r#"{"col1""#));

    let id = service.state().physics[0].id;
    assert!(service.toggle_progress(id, Slot::First, Subject::Physics));

    let stored: serde_json::Value =
        serde_json::from_str(&repo.get(COLUMN_NAMES_KEY).unwrap().unwrap()).unwrap();
    for subject in Subject::ALL {
        assert_eq!(stored[subject.as_str()]["col1"], "Notes");
        assert_eq!(stored[subject.as_str()]["col3"], "Mocks");
    }
    assert!(stored.get("col1").is_none());
}

#[test]
fn flat_column_rewrite_happens_once() {
    let conn = open_db_in_memory().unwrap();
    let repo = CountingRepo::new(&conn);
    repo.inner
        .put(
            COLUMN_NAMES_KEY,
            r#"{"col1":"Notes","col2":"Drills","col3":"Mocks"}"#,
        )
        .unwrap();
    let mut service = TrackerService::open(&repo);
    let id = service.state().math[0].id;
    let after_open = repo.puts.get();

    assert!(service.toggle_today(id, Slot::Second, Subject::Math));
    assert_eq!(repo.puts.get(), after_open + 2);

    assert!(service.toggle_today(id, Slot::Second, Subject::Math));
    assert_eq!(repo.puts.get(), after_open + 3);
}
