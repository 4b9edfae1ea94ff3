use crate::db::log::ttlog;
use crate::errors::AppResult;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists. Migrations record themselves there.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if the `entries` table exists.
fn entries_table_exists(conn: &Connection) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name='entries'")?;
    let exists: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Create the `entries` table.
fn create_entries_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS entries (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            name      TEXT NOT NULL CHECK(length(trim(name)) > 0),
            title     TEXT NOT NULL CHECK(length(trim(title)) > 0),
            time      INTEGER NOT NULL DEFAULT 0 CHECK(time >= 0),
            note      TEXT NOT NULL DEFAULT '',
            timestamp TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> AppResult<()> {
    ttlog(conn, "migration_applied", version, message)
}

/// Index used by every newest-first listing.
fn migrate_add_timestamp_index(conn: &Connection, notices: &mut Vec<String>) -> AppResult<()> {
    let version = "20240412_0001_entries_timestamp_index";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_entries_timestamp ON entries(timestamp DESC, id DESC);",
    )?;

    mark_applied(conn, version, "Added timestamp index to entries")?;

    notices.push(format!(
        "Migration applied: {} → added timestamp index to entries table",
        version
    ));

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db(). Returns one notice per schema
/// change, for the caller to display.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<Vec<String>> {
    let mut notices = Vec::new();
    ensure_log_table(conn)?;

    if !entries_table_exists(conn)? {
        create_entries_table(conn)?;
        notices.push("Created entries table.".to_string());
    }

    migrate_add_timestamp_index(conn, &mut notices)?;

    Ok(notices)
}
