use chrono::NaiveDate;
use worklog::db::log::load_log;
use worklog::db::pool::DbPool;
use worklog::db::repository::{EntryQuery, EntryRepository};
use worklog::errors::AppError;

mod common;
use common::{at, ids, insert_at, memory_repo};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_create_then_find_by_name_then_delete() {
    let repo = memory_repo();
    insert_at(&repo, "Bob", "Deploy", 15, "", at(2018, 4, 1, 8, 0));

    let entry = repo
        .create("test name", "test title", 1, "test notes")
        .unwrap();
    assert_eq!(entry.name, "test name");
    assert_eq!(entry.note, "test notes");

    let found = repo.by_name_contains("test name").unwrap();
    assert_eq!(ids(&found), vec![entry.id]);
    assert_eq!(repo.get(entry.id).unwrap(), entry);

    repo.delete(&entry).unwrap();
    assert!(repo.by_name_contains("test name").unwrap().is_empty());
    assert_eq!(repo.all_ordered_by_time_desc().unwrap().len(), 1);
}

#[test]
fn test_delete_twice_is_not_found() {
    let repo = memory_repo();
    let entry = repo.create("Ada", "Review", 30, "").unwrap();

    repo.delete(&entry).unwrap();
    match repo.delete(&entry) {
        Err(AppError::NotFound(id)) => assert_eq!(id, entry.id),
        other => panic!("expected NotFound, got {:?}", other),
    }
    assert!(matches!(repo.get(entry.id), Err(AppError::NotFound(_))));
}

#[test]
fn test_ids_are_not_reused_after_delete() {
    let repo = memory_repo();
    let first = repo.create("Ada", "One", 1, "").unwrap();
    repo.delete(&first).unwrap();
    let second = repo.create("Ada", "Two", 1, "").unwrap();
    assert!(second.id > first.id);
}

#[test]
fn test_empty_note_is_stored_as_empty_string() {
    let repo = memory_repo();
    let entry = repo.create("Ada", "Review", 0, "").unwrap();
    assert_eq!(repo.get(entry.id).unwrap().note, "");
}

#[test]
fn test_time_spent_matches_exactly_newest_first() {
    let repo = memory_repo();
    let older = repo.create("Ada", "Write report", 60, "").unwrap();
    let newer = repo.create("Ada", "Plan sprint", 60, "").unwrap();
    repo.create("Ada", "Standup", 15, "").unwrap();

    let hits = repo.by_time_spent(60).unwrap();
    assert_eq!(ids(&hits), vec![newer.id, older.id]);
    assert!(repo.by_time_spent(45).unwrap().is_empty());
}

#[test]
fn test_all_entries_are_ordered_by_timestamp_desc() {
    let repo = memory_repo();
    let mid = insert_at(&repo, "Ada", "B", 1, "", at(2018, 4, 11, 12, 0));
    let old = insert_at(&repo, "Ada", "A", 1, "", at(2018, 4, 10, 12, 0));
    let new = insert_at(&repo, "Ada", "C", 1, "", at(2018, 4, 12, 12, 0));

    let all = repo.all_ordered_by_time_desc().unwrap();
    assert_eq!(ids(&all), vec![new.id, mid.id, old.id]);
}

#[test]
fn test_exact_date_matches_whole_calendar_day() {
    let repo = memory_repo();
    let morning = insert_at(&repo, "Ada", "A", 1, "", at(2018, 4, 11, 0, 0));
    let night = insert_at(&repo, "Ada", "B", 1, "", at(2018, 4, 11, 23, 59));
    insert_at(&repo, "Ada", "C", 1, "", at(2018, 4, 12, 0, 0));

    let hits = repo.by_exact_date(day(2018, 4, 11)).unwrap();
    assert_eq!(ids(&hits), vec![night.id, morning.id]);
    assert!(repo.by_exact_date(day(2018, 4, 13)).unwrap().is_empty());
}

#[test]
fn test_date_range_is_inclusive_and_empty_when_reversed() {
    let repo = memory_repo();
    insert_at(&repo, "Ada", "A", 1, "", at(2018, 4, 10, 9, 0));
    let b = insert_at(&repo, "Ada", "B", 1, "", at(2018, 4, 11, 9, 0));
    let c = insert_at(&repo, "Ada", "C", 1, "", at(2018, 4, 20, 23, 30));
    insert_at(&repo, "Ada", "D", 1, "", at(2018, 4, 21, 0, 0));

    let hits = repo.by_date_range(day(2018, 4, 11), day(2018, 4, 20)).unwrap();
    assert_eq!(ids(&hits), vec![c.id, b.id]);

    let reversed = repo.by_date_range(day(2018, 4, 20), day(2018, 4, 11)).unwrap();
    assert!(reversed.is_empty());

    let single = repo.by_date_range(day(2018, 4, 20), day(2018, 4, 20)).unwrap();
    assert_eq!(ids(&single), vec![c.id]);
}

#[test]
fn test_title_or_note_search_is_case_sensitive() {
    let repo = memory_repo();
    let by_note = insert_at(&repo, "Ada", "Bugfix", 30, "Fixed Parser crash", at(2018, 4, 1, 9, 0));
    let by_title = insert_at(&repo, "Bob", "Parser cleanup", 45, "", at(2018, 4, 2, 9, 0));
    insert_at(&repo, "Eve", "Docs", 10, "typos", at(2018, 4, 3, 9, 0));

    let hits = repo.by_title_or_note_contains("Parser").unwrap();
    assert_eq!(ids(&hits), vec![by_title.id, by_note.id]);
    assert!(repo.by_title_or_note_contains("parser").unwrap().is_empty());
}

#[test]
fn test_name_search_matches_substrings() {
    let repo = memory_repo();
    let ada = insert_at(&repo, "Ada Lovelace", "A", 1, "", at(2018, 4, 1, 9, 0));
    let adam = insert_at(&repo, "Adam", "B", 1, "", at(2018, 4, 2, 9, 0));
    insert_at(&repo, "Bob", "C", 1, "", at(2018, 4, 3, 9, 0));

    assert_eq!(ids(&repo.by_name_contains("Ada").unwrap()), vec![adam.id, ada.id]);
    assert_eq!(
        repo.find(&EntryQuery::NameContains("Love".into())).unwrap()[0].id,
        ada.id
    );
}

#[test]
fn test_names_are_distinct_most_recent_first() {
    let repo = memory_repo();
    insert_at(&repo, "Ada", "A", 1, "", at(2018, 4, 1, 9, 0));
    insert_at(&repo, "Bob", "B", 1, "", at(2018, 4, 2, 9, 0));
    insert_at(&repo, "Ada", "C", 1, "", at(2018, 4, 3, 9, 0));

    assert_eq!(repo.names().unwrap(), vec!["Ada", "Bob"]);
}

#[test]
fn test_queries_do_not_mutate() {
    let repo = memory_repo();
    repo.create("Ada", "Review", 30, "notes").unwrap();

    for _ in 0..2 {
        repo.by_name_contains("Ada").unwrap();
        repo.by_time_spent(30).unwrap();
        repo.by_title_or_note_contains("notes").unwrap();
    }
    assert_eq!(repo.all_ordered_by_time_desc().unwrap().len(), 1);
}

#[test]
fn test_add_and_delete_are_audited() {
    let repo = memory_repo();
    let entry = repo.create("Ada", "Review", 30, "").unwrap();
    repo.delete(&entry).unwrap();

    let log = load_log(&repo.pool().conn).unwrap();
    let target = format!("entry #{}", entry.id);
    assert!(log.iter().any(|r| r.operation == "add" && r.target == target));
    assert!(log.iter().any(|r| r.operation == "del" && r.target == target));
}

#[test]
fn test_missing_schema_is_a_storage_error() {
    let repo = EntryRepository::new(DbPool::in_memory().unwrap());
    let err = repo.create("Ada", "Review", 30, "").unwrap_err();
    assert!(err.is_storage(), "unexpected error: {err}");
}

#[test]
fn test_audit_failure_is_collected_not_fatal() {
    let repo = memory_repo();
    repo.pool().conn.execute_batch("DROP TABLE log;").unwrap();

    let entry = repo.create("Ada", "Review", 30, "").unwrap();
    assert_eq!(repo.get(entry.id).unwrap(), entry);

    let warnings = repo.take_warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].starts_with("Failed to write internal log"));
    assert!(repo.take_warnings().is_empty());
}
