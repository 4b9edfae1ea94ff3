//! Search strategies: prompt, validate, then turn the input into an `EntryQuery`.

use crate::core::validator::{
    valid_date, valid_date_range, valid_free_text_search, valid_name, valid_time,
};
use crate::db::repository::{EntryQuery, EntryRepository};
use crate::errors::AppResult;
use crate::models::entry::Entry;
use crate::models::menu::SearchChoice;
use crate::ui::console::Console;
use crate::ui::messages::{Level, header};
use std::io::{BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStrategy {
    ByName,
    ByExactDate,
    ByDateRange,
    ByTimeSpent,
    ByTaskOrNote,
}

impl SearchStrategy {
    /// `None` for the return-to-main key.
    pub fn from_choice(choice: SearchChoice) -> Option<Self> {
        match choice {
            SearchChoice::ByName => Some(SearchStrategy::ByName),
            SearchChoice::ByDate => Some(SearchStrategy::ByExactDate),
            SearchChoice::ByDateRange => Some(SearchStrategy::ByDateRange),
            SearchChoice::ByTimeSpent => Some(SearchStrategy::ByTimeSpent),
            SearchChoice::ByTaskNote => Some(SearchStrategy::ByTaskOrNote),
            SearchChoice::Back => None,
        }
    }

    /// Collect valid input for this strategy. `None` when the input closed.
    pub fn ask<R: BufRead, W: Write>(
        self,
        console: &mut Console<R, W>,
        repo: &EntryRepository,
    ) -> AppResult<Option<EntryQuery>> {
        let query = match self {
            SearchStrategy::ByName => {
                show_names(console, repo)?;
                console
                    .prompt_until("\nPlease enter the name you want to search: ", valid_name)?
                    .map(EntryQuery::NameContains)
            }
            SearchStrategy::ByExactDate => console
                .prompt_until("\nEnter the date in YYYY-MM-DD format: ", valid_date)?
                .map(EntryQuery::ExactDate),
            SearchStrategy::ByDateRange => ask_date_range(console)?,
            SearchStrategy::ByTimeSpent => console
                .prompt_until("\nEnter the time you spent (minutes): ", valid_time)?
                .map(EntryQuery::TimeSpent),
            SearchStrategy::ByTaskOrNote => console
                .prompt_until("\nEnter task name or notes: ", valid_free_text_search)?
                .map(EntryQuery::TitleOrNoteContains),
        };
        Ok(query)
    }

    /// Ask, then run the query.
    pub fn run<R: BufRead, W: Write>(
        self,
        console: &mut Console<R, W>,
        repo: &EntryRepository,
    ) -> AppResult<Option<Vec<Entry>>> {
        match self.ask(console, repo)? {
            Some(query) => Ok(Some(repo.find(&query)?)),
            None => Ok(None),
        }
    }
}

fn show_names<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    repo: &EntryRepository,
) -> AppResult<()> {
    let names = repo.names()?;
    console.line(header("Employees"))?;
    if names.is_empty() {
        console.say(Level::Info, "No entries recorded yet.")?;
    }
    for name in names {
        console.line(format!("  {}", name))?;
    }
    Ok(())
}

/// Both dates are asked again whenever either one is invalid.
fn ask_date_range<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> AppResult<Option<EntryQuery>> {
    loop {
        let Some(first) = console.prompt("\nEnter the first date in YYYY-MM-DD format: ")? else {
            return Ok(None);
        };
        let Some(second) = console.prompt("Enter the second date in YYYY-MM-DD format: ")? else {
            return Ok(None);
        };
        match valid_date_range(&first, &second) {
            Ok((start, end)) => return Ok(Some(EntryQuery::DateRange(start, end))),
            Err(rejection) => console.say(Level::Warning, rejection)?,
        }
    }
}
