//! Renders a single entry as a fixed text block.

use crate::models::entry::Entry;
use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

/// Display options taken from the configuration.
#[derive(Debug, Clone)]
pub struct Layout {
    pub separator_char: String,
    pub note_width: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            separator_char: "=".to_string(),
            note_width: 72,
        }
    }
}

impl Layout {
    fn rule(&self, width: usize) -> String {
        let unit = if self.separator_char.is_empty() {
            "="
        } else {
            self.separator_char.as_str()
        };
        let unit_w = UnicodeWidthStr::width(unit).max(1);
        unit.repeat(width.div_ceil(unit_w).max(1))
    }
}

/// `position` is 1-based within a list of `total` results.
pub fn render<W: Write>(
    out: &mut W,
    entry: &Entry,
    position: usize,
    total: usize,
    layout: &Layout,
) -> io::Result<()> {
    let header = format!("{}   [{}/{}]", entry.display_timestamp(), position, total);
    let rule = layout.rule(UnicodeWidthStr::width(header.as_str()));

    writeln!(out, "{}", header)?;
    writeln!(out, "{}", rule)?;
    writeln!(out)?;
    writeln!(out, "Employee's name: {}", entry.name)?;
    writeln!(out, "Task name: {}", entry.title)?;
    writeln!(out, "Time spent: {} min", entry.time)?;
    writeln!(out, "Note:")?;
    if entry.note.is_empty() {
        writeln!(out, "(none)")?;
    } else {
        for line in textwrap::wrap(&entry.note, layout.note_width.max(10)) {
            writeln!(out, "{}", line)?;
        }
    }
    writeln!(out)?;
    writeln!(out, "{}", rule)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample(note: &str) -> Entry {
        Entry {
            id: 7,
            name: "Ada".into(),
            title: "Code review".into(),
            time: 45,
            note: note.into(),
            timestamp: NaiveDate::from_ymd_opt(2018, 4, 11)
                .unwrap()
                .and_hms_opt(14, 5, 0)
                .unwrap(),
        }
    }

    fn rendered(entry: &Entry, layout: &Layout) -> String {
        let mut buf = Vec::new();
        render(&mut buf, entry, 2, 3, layout).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn renders_all_fields() {
        let out = rendered(&sample("looked at the parser"), &Layout::default());
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "2018-04-11, 02:05PM   [2/3]");
        assert_eq!(lines[1], "=".repeat(lines[0].len()));
        assert!(out.contains("Employee's name: Ada"));
        assert!(out.contains("Task name: Code review"));
        assert!(out.contains("Time spent: 45 min"));
        assert!(out.contains("looked at the parser"));
        assert_eq!(lines.last(), Some(&lines[1]));
    }

    #[test]
    fn empty_note_and_wrapping() {
        assert!(rendered(&sample(""), &Layout::default()).contains("(none)"));

        let layout = Layout {
            separator_char: "-".into(),
            note_width: 10,
        };
        let out = rendered(&sample("aaaa bbbb cccc dddd"), &layout);
        assert!(out.contains("aaaa bbbb\ncccc dddd"));
        assert!(out.contains("-----"));
    }
}
