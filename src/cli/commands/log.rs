use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log::{LogRow, load_log};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;

/// Width of the "operation (target)" column.
const OP_WIDTH_MAX: usize = 40;

/// ANSI color per logged operation
fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "del" => Colour::Red,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let mut t: String = s.chars().take(max.saturating_sub(3)).collect();
        t.push_str("...");
        t
    } else {
        s.to_string()
    }
}

/// One printable line; padding is computed on the plain text, before coloring.
pub fn format_row(row: &LogRow, id_w: usize, date_w: usize, op_w: usize) -> String {
    let op_target = if row.target.is_empty() {
        row.operation.clone()
    } else {
        format!("{} ({})", row.operation, row.target)
    };
    let plain = truncate(&op_target, op_w);
    let padding = " ".repeat(op_w.saturating_sub(plain.chars().count()));

    let color = color_for_operation(&row.operation);
    let colored = match plain.split_once(' ') {
        Some((op, rest)) => format!("{} {}", color.paint(op), rest),
        None => color.paint(plain.as_str()).to_string(),
    };

    format!(
        "{:>id_w$}: {:<date_w$} | {}{} => {}",
        row.id,
        row.date,
        colored,
        padding,
        row.message,
        id_w = id_w,
        date_w = date_w
    )
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if !matches!(cmd, Commands::Log { print: true }) {
        return Ok(());
    }

    let pool = DbPool::new(&cfg.database_path().to_string_lossy())?;
    init_db(&pool.conn)?;
    let rows = load_log(&pool.conn)?;

    if rows.is_empty() {
        println!("📜 Internal log is empty.");
        return Ok(());
    }

    let id_w = rows.iter().map(|r| r.id.to_string().len()).max().unwrap_or(1);
    let date_w = rows.iter().map(|r| r.date.len()).max().unwrap_or(10);
    let op_w = rows
        .iter()
        .map(|r| r.operation.len() + r.target.len() + 3)
        .max()
        .unwrap_or(10)
        .min(OP_WIDTH_MAX);

    println!("📜 Internal log:\n");
    for row in &rows {
        println!("{}", format_row(row, id_w, date_w, op_w));
    }

    Ok(())
}
