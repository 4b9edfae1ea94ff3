use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::menu::MenuController;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::db::repository::EntryRepository;
use crate::errors::{AppError, AppResult};
use crate::ui::console::Console;
use crate::ui::messages::Level;
use std::fs;
use std::io::{self, IsTerminal};

/// Start the interactive session on stdin / stdout.
///
/// The database is created (with all migrations) if it does not exist yet,
/// opened once, and closed when the session ends.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let db_path = cfg.database_path();
    if let Some(parent) = db_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(AppError::Storage)?;
    }

    let pool = DbPool::new(&db_path.to_string_lossy())?;
    let notices = init_db(&pool.conn)?;
    let repo = EntryRepository::new(pool);

    let stdout = io::stdout();
    let clear_screen = cfg.clear_screen && !cli.test && stdout.is_terminal();
    let mut console = Console::new(io::stdin().lock(), stdout.lock(), clear_screen);
    for notice in notices {
        console.say(Level::Success, notice)?;
    }

    MenuController::new(repo, console, cfg.layout()).run()
}
