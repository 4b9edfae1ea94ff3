//! Entry repository: the only component that reads or mutates `entries`.

use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::entry::{Entry, NewEntry, TIMESTAMP_FORMAT};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{Row, ToSql, params};
use std::cell::RefCell;

const SELECT_ENTRIES: &str = "SELECT id, name, title, time, note, timestamp FROM entries";
const ORDER_NEWEST_FIRST: &str = " ORDER BY timestamp DESC, id DESC";

/// A filter over `entries`. Every variant is ordered newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryQuery {
    All,
    NameContains(String),
    ExactDate(NaiveDate),
    /// Inclusive on both ends, compared on the `YYYY-MM-DD` day string.
    DateRange(NaiveDate, NaiveDate),
    TimeSpent(u32),
    TitleOrNoteContains(String),
}

impl EntryQuery {
    /// WHERE clause (without the keyword) and its positional parameters.
    fn condition(&self) -> Option<(&'static str, Vec<Box<dyn ToSql>>)> {
        let day = |d: &NaiveDate| d.format("%Y-%m-%d").to_string();

        match self {
            EntryQuery::All => None,
            EntryQuery::NameContains(s) => {
                Some(("instr(name, ?1) > 0", vec![Box::new(s.clone()) as Box<dyn ToSql>]))
            }
            EntryQuery::ExactDate(d) => Some((
                "substr(timestamp, 1, 10) = ?1",
                vec![Box::new(day(d)) as Box<dyn ToSql>],
            )),
            EntryQuery::DateRange(start, end) => Some((
                "substr(timestamp, 1, 10) >= ?1 AND substr(timestamp, 1, 10) <= ?2",
                vec![
                    Box::new(day(start)) as Box<dyn ToSql>,
                    Box::new(day(end)) as Box<dyn ToSql>,
                ],
            )),
            EntryQuery::TimeSpent(m) => Some(("time = ?1", vec![Box::new(*m) as Box<dyn ToSql>])),
            EntryQuery::TitleOrNoteContains(s) => Some((
                "(instr(title, ?1) > 0 OR instr(note, ?1) > 0)",
                vec![Box::new(s.clone()) as Box<dyn ToSql>],
            )),
        }
    }
}

pub fn map_row(row: &Row) -> rusqlite::Result<Entry> {
    let ts_str: String = row.get("timestamp")?;
    let timestamp = NaiveDateTime::parse_from_str(&ts_str, TIMESTAMP_FORMAT).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            5,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(ts_str.clone())),
        )
    })?;

    let time: i64 = row.get("time")?;
    let time = u32::try_from(time).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            rusqlite::types::Type::Integer,
            Box::new(AppError::InvalidTime(time.to_string())),
        )
    })?;

    Ok(Entry {
        id: row.get("id")?,
        name: row.get("name")?,
        title: row.get("title")?,
        time,
        note: row.get("note")?,
        timestamp,
    })
}

pub struct EntryRepository {
    pool: DbPool,
    warnings: RefCell<Vec<String>>,
}

impl EntryRepository {
    /// Takes ownership of an already initialized database handle.
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            warnings: RefCell::new(Vec::new()),
        }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Drain the warnings collected since the last call.
    pub fn take_warnings(&self) -> Vec<String> {
        self.warnings.take()
    }

    /// Persist a new entry stamped with the current time.
    pub fn create(&self, name: &str, title: &str, time: u32, note: &str) -> AppResult<Entry> {
        self.insert(NewEntry::now(name, title, time, note))
    }

    /// Persist an entry with an explicit timestamp.
    pub fn insert(&self, new: NewEntry) -> AppResult<Entry> {
        let conn = &self.pool.conn;
        conn.execute(
            "INSERT INTO entries (name, title, time, note, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                new.name,
                new.title,
                new.time,
                new.note,
                new.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            ],
        )?;

        let entry = Entry {
            id: conn.last_insert_rowid(),
            name: new.name,
            title: new.title,
            time: new.time,
            note: new.note,
            timestamp: new.timestamp,
        };

        self.audit(
            "add",
            &format!("entry #{}", entry.id),
            &format!("{} / {} ({} min)", entry.name, entry.title, entry.time),
        );

        Ok(entry)
    }

    /// Remove an entry permanently. Deleting twice yields `NotFound`.
    pub fn delete(&self, entry: &Entry) -> AppResult<()> {
        let removed = self
            .pool
            .conn
            .execute("DELETE FROM entries WHERE id = ?1", [entry.id])?;

        if removed == 0 {
            return Err(AppError::NotFound(entry.id));
        }

        self.audit(
            "del",
            &format!("entry #{}", entry.id),
            &format!("{} / {}", entry.name, entry.title),
        );
        Ok(())
    }

    pub fn find(&self, query: &EntryQuery) -> AppResult<Vec<Entry>> {
        let mut sql = SELECT_ENTRIES.to_string();
        let params: Vec<Box<dyn ToSql>> = match query.condition() {
            Some((cond, params)) => {
                sql.push_str(" WHERE ");
                sql.push_str(cond);
                params
            }
            None => Vec::new(),
        };
        sql.push_str(ORDER_NEWEST_FIRST);

        let mut stmt = self.pool.conn.prepare_cached(&sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(params.iter()), map_row)?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    pub fn all_ordered_by_time_desc(&self) -> AppResult<Vec<Entry>> {
        self.find(&EntryQuery::All)
    }

    pub fn by_name_contains(&self, substring: &str) -> AppResult<Vec<Entry>> {
        self.find(&EntryQuery::NameContains(substring.to_string()))
    }

    pub fn by_exact_date(&self, date: NaiveDate) -> AppResult<Vec<Entry>> {
        self.find(&EntryQuery::ExactDate(date))
    }

    pub fn by_date_range(&self, start: NaiveDate, end: NaiveDate) -> AppResult<Vec<Entry>> {
        self.find(&EntryQuery::DateRange(start, end))
    }

    pub fn by_time_spent(&self, minutes: u32) -> AppResult<Vec<Entry>> {
        self.find(&EntryQuery::TimeSpent(minutes))
    }

    pub fn by_title_or_note_contains(&self, substring: &str) -> AppResult<Vec<Entry>> {
        self.find(&EntryQuery::TitleOrNoteContains(substring.to_string()))
    }

    /// Distinct employee names, most recently active first.
    pub fn names(&self) -> AppResult<Vec<String>> {
        let mut stmt = self.pool.conn.prepare_cached(
            "SELECT name FROM entries GROUP BY name ORDER BY MAX(timestamp) DESC, name ASC",
        )?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    pub fn get(&self, id: i64) -> AppResult<Entry> {
        let sql = format!("{} WHERE id = ?1", SELECT_ENTRIES);
        let mut stmt = self.pool.conn.prepare_cached(&sql)?;
        stmt.query_row([id], map_row).map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => AppError::NotFound(id),
            other => AppError::Db(other),
        })
    }

    // Audit logging never fails the operation it describes.
    fn audit(&self, operation: &str, target: &str, message: &str) {
        if let Err(e) = ttlog(&self.pool.conn, operation, target, message) {
            self.warnings
                .borrow_mut()
                .push(format!("Failed to write internal log: {}", e));
        }
    }
}
