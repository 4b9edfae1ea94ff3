#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveDateTime};
use std::io::Cursor;
use std::path::Path;
use worklog::core::menu::MenuController;
use worklog::core::presenter::Layout;
use worklog::db::initialize::init_db;
use worklog::db::pool::DbPool;
use worklog::db::repository::EntryRepository;
use worklog::models::entry::{Entry, NewEntry};
use worklog::ui::console::Console;

pub type TestController = MenuController<Cursor<Vec<u8>>, Vec<u8>>;

/// Binary under test, isolated from the real `~/.worklog` config.
pub fn wl(home: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("worklog");
    cmd.env("HOME", home);
    cmd
}

/// Fresh in-memory repository with the full schema.
pub fn memory_repo() -> EntryRepository {
    let pool = DbPool::in_memory().expect("open in-memory db");
    init_db(&pool.conn).expect("init db");
    EntryRepository::new(pool)
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

/// Insert an entry with a fixed timestamp.
pub fn insert_at(
    repo: &EntryRepository,
    name: &str,
    title: &str,
    time: u32,
    note: &str,
    timestamp: NaiveDateTime,
) -> Entry {
    repo.insert(NewEntry {
        name: name.into(),
        title: title.into(),
        time,
        note: note.into(),
        timestamp,
    })
    .expect("insert entry")
}

pub fn controller(repo: EntryRepository, script: &str) -> TestController {
    let console = Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new(), false);
    MenuController::new(repo, console, Layout::default())
}

/// Run a whole session over `script`; returns the repository and everything written.
pub fn run_session(repo: EntryRepository, script: &str) -> (EntryRepository, String) {
    let mut ctl = controller(repo, script);
    ctl.run().expect("session should end cleanly");
    let (repo, console) = ctl.into_parts();
    let out = String::from_utf8(console.into_output()).expect("utf-8 output");
    (repo, out)
}

pub fn ids(entries: &[Entry]) -> Vec<i64> {
    entries.iter().map(|e| e.id).collect()
}
