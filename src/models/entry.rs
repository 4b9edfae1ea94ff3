use chrono::{Local, NaiveDateTime, SubsecRound};

/// Storage format of `entries.timestamp`. Lexical order equals chronological order.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: i64,                  // ⇔ entries.id (INTEGER PRIMARY KEY AUTOINCREMENT)
    pub name: String,             // ⇔ entries.name (TEXT NOT NULL, non-empty)
    pub title: String,            // ⇔ entries.title (TEXT NOT NULL, non-empty)
    pub time: u32,                // ⇔ entries.time (INTEGER, minutes >= 0)
    pub note: String,             // ⇔ entries.note (TEXT, may be '')
    pub timestamp: NaiveDateTime, // ⇔ entries.timestamp (TEXT, TIMESTAMP_FORMAT)
}

/// Validated field values for an entry that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub name: String,
    pub title: String,
    pub time: u32,
    pub note: String,
    pub timestamp: NaiveDateTime,
}

impl NewEntry {
    /// Build a new entry stamped with the current local time,
    /// truncated to the stored precision.
    pub fn now(name: &str, title: &str, time: u32, note: &str) -> Self {
        Self {
            name: name.to_string(),
            title: title.to_string(),
            time,
            note: note.to_string(),
            timestamp: Local::now().naive_local().trunc_subsecs(6),
        }
    }
}

impl Entry {
    /// Header used when the entry is displayed, e.g. `2018-04-11, 09:30AM`.
    pub fn display_timestamp(&self) -> String {
        self.timestamp.format("%Y-%m-%d, %I:%M%p").to_string()
    }
}
