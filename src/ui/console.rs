//! Line-oriented console: the input source and display sink of a session.
//!
//! Generic over `BufRead` / `Write` so the whole menu flow can be driven
//! from a `Cursor` in tests. `None` from a read means the input is closed.

use crate::errors::Rejection;
use crate::ui::messages::{Level, styled};
use std::fmt;
use std::io::{self, BufRead, Write};

/// A note line consisting only of this marker ends the note.
pub const END_OF_NOTE: &str = ".";

const CLEAR: &str = "\x1b[2J\x1b[H";

pub struct Console<R, W> {
    input: R,
    output: W,
    clear_screen: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, clear_screen: bool) -> Self {
        Self {
            input,
            output,
            clear_screen,
        }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn line<T: fmt::Display>(&mut self, text: T) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    pub fn say<T: fmt::Display>(&mut self, level: Level, msg: T) -> io::Result<()> {
        writeln!(self.output, "{}", styled(level, msg))
    }

    /// Reset the visible screen before a new state is drawn.
    pub fn clear(&mut self) -> io::Result<()> {
        if self.clear_screen {
            write!(self.output, "{}", CLEAR)?;
            self.output.flush()?;
        }
        Ok(())
    }

    /// Wait for Enter so a message survives the next clear.
    /// Without screen clearing there is nothing to wait for.
    pub fn pause(&mut self) -> io::Result<Option<()>> {
        if !self.clear_screen {
            return Ok(Some(()));
        }
        Ok(self.prompt("\nPress Enter to continue. ")?.map(|_| ()))
    }

    /// One blocking line read, without the line terminator.
    /// Bytes that are not UTF-8 decode to U+FFFD and fail validation like any other text.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Ok(None);
        }
        let mut buf = String::from_utf8_lossy(&raw).into_owned();
        while buf.ends_with('\n') || buf.ends_with('\r') {
            buf.pop();
        }
        Ok(Some(buf))
    }

    pub fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        self.read_line()
    }

    /// Ask until `validate` accepts. Each rejection prints its reason and
    /// re-issues the same prompt.
    pub fn prompt_until<T, F>(&mut self, text: &str, validate: F) -> io::Result<Option<T>>
    where
        F: Fn(&str) -> Result<T, Rejection>,
    {
        loop {
            let Some(raw) = self.prompt(text)? else {
                return Ok(None);
            };
            match validate(&raw) {
                Ok(value) => return Ok(Some(value)),
                Err(rejection) => self.say(Level::Warning, rejection)?,
            }
        }
    }

    /// Multi-line text up to an `END_OF_NOTE` line or the end of input.
    pub fn read_block(&mut self) -> io::Result<String> {
        let mut lines = Vec::new();
        while let Some(line) = self.read_line()? {
            if line.trim() == END_OF_NOTE {
                break;
            }
            lines.push(line);
        }
        Ok(lines.join("\n"))
    }
}
