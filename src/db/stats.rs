use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    let (count, minutes): (i64, i64) = pool.conn.query_row(
        "SELECT COUNT(*), IFNULL(SUM(time), 0) FROM entries",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;
    println!("{}• Total entries:{} {}{}{}", CYAN, RESET, GREEN, count, RESET);
    println!(
        "{}• Time logged:{} {}h {:02}m",
        CYAN,
        RESET,
        minutes / 60,
        minutes % 60
    );

    let names: i64 =
        pool.conn
            .query_row("SELECT COUNT(DISTINCT name) FROM entries", [], |row| row.get(0))?;
    println!("{}• Employees:{} {}", CYAN, RESET, names);

    let first: Option<String> = pool
        .conn
        .query_row(
            "SELECT substr(timestamp, 1, 10) FROM entries ORDER BY timestamp ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;
    let last: Option<String> = pool
        .conn
        .query_row(
            "SELECT substr(timestamp, 1, 10) FROM entries ORDER BY timestamp DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let none = format!("{GREY}--{RESET}");
    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", first.unwrap_or_else(|| none.clone()));
    println!("    to:   {}", last.unwrap_or(none));

    println!();
    Ok(())
}
