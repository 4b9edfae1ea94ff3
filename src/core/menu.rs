//! The interactive session.
//!
//! `run` drives a flat state loop. Browsing a result list happens inside
//! `browse`, and its outcome is reported as a `Flow` value so that "return
//! to main menu" from the Next-Action prompt unwinds through the caller
//! instead of nesting a new menu loop.

use crate::core::presenter::{self, Layout};
use crate::core::search::SearchStrategy;
use crate::core::validator::{
    valid_confirmation, valid_menu_choice, valid_name, valid_next_action, valid_note,
    valid_search_choice, valid_time, valid_title,
};
use crate::db::repository::EntryRepository;
use crate::errors::{AppError, AppResult};
use crate::models::entry::Entry;
use crate::models::menu::{MAIN_MENU, MainChoice, NEXT_ACTION_MENU, NextAction, SEARCH_MENU};
use crate::ui::console::{Console, END_OF_NOTE};
use crate::ui::messages::{Level, header};
use std::io::{BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    MainMenu,
    AddEntry,
    SearchMenu,
    ViewEntries,
    Quit,
}

/// Outcome of showing one entry, or of browsing a whole list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Go on: next entry, or back to the caller once the list is exhausted.
    Continue,
    /// Abandon the rest of the list and go straight to the main menu.
    ReturnToMain,
    /// The input source is closed.
    Closed,
}

pub struct MenuController<R, W> {
    repo: EntryRepository,
    console: Console<R, W>,
    layout: Layout,
}

impl<R: BufRead, W: Write> MenuController<R, W> {
    pub fn new(repo: EntryRepository, console: Console<R, W>, layout: Layout) -> Self {
        Self {
            repo,
            console,
            layout,
        }
    }

    pub fn repository(&self) -> &EntryRepository {
        &self.repo
    }

    pub fn into_parts(self) -> (EntryRepository, Console<R, W>) {
        (self.repo, self.console)
    }

    /// Run until the user quits or the input closes.
    pub fn run(&mut self) -> AppResult<()> {
        let mut state = State::MainMenu;
        while state != State::Quit {
            state = self.step(state)?;
        }
        self.console.line("\nGoodbye!")?;
        Ok(())
    }

    /// Execute one state and return the next one.
    pub fn step(&mut self, state: State) -> AppResult<State> {
        match state {
            State::MainMenu => self.main_menu(),
            State::AddEntry => self.add_entry(),
            State::SearchMenu => self.search_menu(),
            State::ViewEntries => self.view_entries(),
            State::Quit => Ok(State::Quit),
        }
    }

    fn main_menu(&mut self) -> AppResult<State> {
        self.console.clear()?;
        self.console.line("Welcome to Work Log!\n")?;
        for (key, _, label) in MAIN_MENU {
            self.console.line(format!("{}) {}", key, label))?;
        }

        let choice = self
            .console
            .prompt_until("\nPlease select your next action: ", valid_menu_choice)?;

        Ok(match choice {
            Some(MainChoice::Add) => State::AddEntry,
            Some(MainChoice::Search) => State::SearchMenu,
            Some(MainChoice::View) => State::ViewEntries,
            Some(MainChoice::Quit) | None => State::Quit,
        })
    }

    fn add_entry(&mut self) -> AppResult<State> {
        self.console.clear()?;
        self.console.line(header("Add an entry"))?;

        let Some(name) = self.console.prompt_until("Enter your name: ", valid_name)? else {
            return Ok(State::Quit);
        };
        let Some(title) = self
            .console
            .prompt_until("Enter the task name: ", valid_title)?
        else {
            return Ok(State::Quit);
        };
        let Some(time) = self
            .console
            .prompt_until("Enter the time you spent (minutes): ", valid_time)?
        else {
            return Ok(State::Quit);
        };

        self.console.line(format!(
            "Enter any additional notes. Finish with a line containing only '{}' (or Ctrl+D).",
            END_OF_NOTE
        ))?;
        let note = valid_note(&self.console.read_block()?);

        let Some(save) = self
            .console
            .prompt_until("Save entry? Enter y or n: ", valid_confirmation)?
        else {
            return Ok(State::Quit);
        };

        if save {
            let entry = self.repo.create(&name, &title, time, &note.into_text())?;
            self.console.say(
                Level::Success,
                format!("Entry #{} saved successfully.", entry.id),
            )?;
            self.report_warnings()?;
        } else {
            self.console.say(Level::Info, "Entry discarded.")?;
        }

        Ok(match self.console.pause()? {
            Some(()) => State::MainMenu,
            None => State::Quit,
        })
    }

    fn search_menu(&mut self) -> AppResult<State> {
        self.console.clear()?;
        self.console
            .line("Please choose one of the following search options.\n")?;
        for (key, _, label) in SEARCH_MENU {
            self.console.line(format!("  {}) {}", key, label))?;
        }

        let Some(choice) = self.console.prompt_until(
            "\nEnter the letter associated with the search you want: ",
            valid_search_choice,
        )?
        else {
            return Ok(State::Quit);
        };

        let Some(strategy) = SearchStrategy::from_choice(choice) else {
            return Ok(State::MainMenu);
        };

        self.console.clear()?;
        let Some(entries) = strategy.run(&mut self.console, &self.repo)? else {
            return Ok(State::Quit);
        };

        Ok(match self.browse(&entries)? {
            Flow::Continue => State::SearchMenu,
            Flow::ReturnToMain => State::MainMenu,
            Flow::Closed => State::Quit,
        })
    }

    fn view_entries(&mut self) -> AppResult<State> {
        let entries = self.repo.all_ordered_by_time_desc()?;

        Ok(match self.browse(&entries)? {
            Flow::Continue | Flow::ReturnToMain => State::MainMenu,
            Flow::Closed => State::Quit,
        })
    }

    /// Show each entry in order and ask for the next action after each one.
    fn browse(&mut self, entries: &[Entry]) -> AppResult<Flow> {
        if entries.is_empty() {
            self.console.say(Level::Info, "No entries found.")?;
            return Ok(match self.console.pause()? {
                Some(()) => Flow::Continue,
                None => Flow::Closed,
            });
        }

        let total = entries.len();
        for (idx, entry) in entries.iter().enumerate() {
            match self.next_action(entry, idx + 1, total)? {
                Flow::Continue => {}
                other => return Ok(other),
            }
        }
        Ok(Flow::Continue)
    }

    fn next_action(&mut self, entry: &Entry, position: usize, total: usize) -> AppResult<Flow> {
        self.console.clear()?;
        presenter::render(
            self.console.output(),
            entry,
            position,
            total,
            &self.layout,
        )?;
        self.console.line("")?;
        for (key, _, label) in NEXT_ACTION_MENU {
            self.console.line(format!("{}) {}", key, label))?;
        }

        let Some(action) = self
            .console
            .prompt_until("\nPlease select your next action: ", valid_next_action)?
        else {
            return Ok(Flow::Closed);
        };

        match action {
            NextAction::Advance => Ok(Flow::Continue),
            NextAction::Quit => Ok(Flow::ReturnToMain),
            NextAction::Delete => self.delete_entry(entry),
        }
    }

    fn report_warnings(&mut self) -> AppResult<()> {
        for warning in self.repo.take_warnings() {
            self.console.say(Level::Warning, warning)?;
        }
        Ok(())
    }

    fn delete_entry(&mut self, entry: &Entry) -> AppResult<Flow> {
        let Some(confirmed) = self.console.prompt_until(
            "Do you want to delete this entry? Enter y or n: ",
            valid_confirmation,
        )?
        else {
            return Ok(Flow::Closed);
        };

        if !confirmed {
            self.console.say(Level::Info, "Entry kept.")?;
            return Ok(Flow::Continue);
        }

        match self.repo.delete(entry) {
            Ok(()) => {
                self.console.say(Level::Success, "Entry deleted.")?;
                self.report_warnings()?;
            }
            Err(AppError::NotFound(id)) => self
                .console
                .say(Level::Warning, format!("Entry #{} no longer exists.", id))?,
            Err(e) => return Err(e),
        }

        Ok(match self.console.pause()? {
            Some(()) => Flow::Continue,
            None => Flow::Closed,
        })
    }
}
