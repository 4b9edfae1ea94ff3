//! Menu keys and their labels.
//! Each table is ordered: the display order is the declaration order.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainChoice {
    Add,    // a
    Search, // s
    View,   // v
    Quit,   // q
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchChoice {
    ByName,      // a
    ByDate,      // b
    ByDateRange, // c
    ByTimeSpent, // d
    ByTaskNote,  // e
    Back,        // q
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextAction {
    Advance, // n
    Delete,  // d
    Quit,    // q
}

pub const MAIN_MENU: &[(&str, MainChoice, &str)] = &[
    ("a", MainChoice::Add, "Add an entry"),
    ("s", MainChoice::Search, "Search previous entries"),
    ("v", MainChoice::View, "View previous entries"),
    ("q", MainChoice::Quit, "Quit"),
];

pub const SEARCH_MENU: &[(&str, SearchChoice, &str)] = &[
    ("a", SearchChoice::ByName, "Find by employee's name"),
    ("b", SearchChoice::ByDate, "Find by exact date"),
    ("c", SearchChoice::ByDateRange, "Find by date range"),
    ("d", SearchChoice::ByTimeSpent, "Find by time spent"),
    ("e", SearchChoice::ByTaskNote, "Find by task name or notes"),
    ("q", SearchChoice::Back, "Return to main menu"),
];

pub const NEXT_ACTION_MENU: &[(&str, NextAction, &str)] = &[
    ("n", NextAction::Advance, "next entry"),
    ("d", NextAction::Delete, "delete entry"),
    ("q", NextAction::Quit, "return to main menu"),
];

/// Look a key up in one of the menu tables (input is trimmed and lowercased).
pub fn lookup<T: Copy>(table: &[(&str, T, &str)], key: &str) -> Option<T> {
    let key = key.trim().to_lowercase();
    table
        .iter()
        .find(|(k, _, _)| *k == key)
        .map(|(_, choice, _)| *choice)
}

/// Comma separated list of keys, used in diagnostics.
pub fn keys<T>(table: &[(&str, T, &str)]) -> String {
    table
        .iter()
        .map(|(k, _, _)| format!("'{}'", k))
        .collect::<Vec<_>>()
        .join(", ")
}
