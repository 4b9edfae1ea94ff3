//! Input validators.
//!
//! Each function takes the raw text typed by the user and either returns the
//! parsed value or a `Rejection` whose reason is shown before re-prompting.
//! None of them panic or touch the database.

use crate::errors::Rejection;
use crate::models::menu::{
    self, MAIN_MENU, MainChoice, NEXT_ACTION_MENU, NextAction, SEARCH_MENU, SearchChoice,
};
use chrono::NaiveDate;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Result of reading the note field: empty notes are allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteInput {
    Content(String),
    Empty,
}

impl NoteInput {
    pub fn into_text(self) -> String {
        match self {
            NoteInput::Content(s) => s,
            NoteInput::Empty => String::new(),
        }
    }
}

pub fn valid_menu_choice(s: &str) -> Result<MainChoice, Rejection> {
    menu::lookup(MAIN_MENU, s).ok_or_else(|| {
        Rejection::new(format!(
            "'{}' is not a menu option. Use one of {}.",
            s.trim(),
            menu::keys(MAIN_MENU)
        ))
    })
}

pub fn valid_search_choice(s: &str) -> Result<SearchChoice, Rejection> {
    menu::lookup(SEARCH_MENU, s).ok_or_else(|| {
        Rejection::new(format!(
            "'{}' is not a search option. Use one of {}.",
            s.trim(),
            menu::keys(SEARCH_MENU)
        ))
    })
}

pub fn valid_next_action(s: &str) -> Result<NextAction, Rejection> {
    menu::lookup(NEXT_ACTION_MENU, s).ok_or_else(|| {
        Rejection::new(format!(
            "'{}' is not a valid action. Use one of {}.",
            s.trim(),
            menu::keys(NEXT_ACTION_MENU)
        ))
    })
}

fn non_empty(s: &str, what: &str) -> Result<String, Rejection> {
    let t = s.trim();
    if t.is_empty() {
        Err(Rejection::new(format!("The {} cannot be empty.", what)))
    } else {
        Ok(t.to_string())
    }
}

pub fn valid_name(s: &str) -> Result<String, Rejection> {
    non_empty(s, "employee's name")
}

pub fn valid_title(s: &str) -> Result<String, Rejection> {
    non_empty(s, "task name")
}

pub fn valid_free_text_search(s: &str) -> Result<String, Rejection> {
    non_empty(s, "search text")
}

/// Minutes spent: digits only, no sign.
pub fn valid_time(s: &str) -> Result<u32, Rejection> {
    let t = s.trim();
    if t.is_empty() || !t.chars().all(|c| c.is_ascii_digit()) {
        return Err(Rejection::new(format!(
            "'{}' is not a number of minutes. Please enter a whole number like 45.",
            t
        )));
    }
    t.parse::<u32>()
        .map_err(|_| Rejection::new(format!("{} minutes is too large.", t)))
}

pub fn valid_note(s: &str) -> NoteInput {
    let t = s.trim();
    if t.is_empty() {
        NoteInput::Empty
    } else {
        NoteInput::Content(t.to_string())
    }
}

pub fn valid_date(s: &str) -> Result<NaiveDate, Rejection> {
    let t = s.trim();
    NaiveDate::parse_from_str(t, DATE_FORMAT).map_err(|_| {
        Rejection::new(format!(
            "'{}' doesn't seem to be a valid date (expected YYYY-MM-DD).",
            t
        ))
    })
}

/// Both endpoints must parse; their order is not checked.
pub fn valid_date_range(a: &str, b: &str) -> Result<(NaiveDate, NaiveDate), Rejection> {
    match (valid_date(a), valid_date(b)) {
        (Ok(start), Ok(end)) => Ok((start, end)),
        (Err(e), Ok(_)) | (Ok(_), Err(e)) => Err(e),
        (Err(e1), Err(e2)) => Err(Rejection::new(format!("{}\n{}", e1.reason, e2.reason))),
    }
}

pub fn valid_confirmation(s: &str) -> Result<bool, Rejection> {
    match s.trim().to_lowercase().as_str() {
        "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        other => Err(Rejection::new(format!("Please enter y or n, not '{}'.", other))),
    }
}
