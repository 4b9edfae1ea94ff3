use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use rusqlite::Connection;

/// Initialize the database.
/// Safe to call on every startup: all schema work lives in the migrations.
/// Returns the notices of the migrations applied by this call.
pub fn init_db(conn: &Connection) -> AppResult<Vec<String>> {
    run_pending_migrations(conn)
}
