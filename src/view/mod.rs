//! Terminal presentation of the scrollback.
//!
//! The REPL is line-oriented: `ScrollbackView` remembers how much of the
//! scrollback it has already printed and writes only new entries. When the
//! scrollback has been cleared since the last draw, the screen is cleared and
//! everything is redrawn.

pub mod repl;
pub mod theme;

use crate::model::scrollback::{Scrollback, ScrollbackEntry};
use crossterm::cursor::{MoveTo, MoveToPreviousLine};
use crossterm::queue;
use crossterm::style::{Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, Write};
use theme::{LineStyle, Theme};

#[derive(Debug)]
pub struct ScrollbackView {
    theme: Theme,
    printed: usize,
    generation: u64,
    interactive: bool,
}

impl ScrollbackView {
    /// `interactive` is false when output is not a terminal: no prompt is
    /// written and a clear only restarts the printed count.
    pub fn new(theme: Theme, interactive: bool) -> Self {
        Self {
            theme,
            printed: 0,
            generation: 0,
            interactive,
        }
    }

    /// Write entries added since the last call.
    pub fn draw<W: Write>(&mut self, scrollback: &Scrollback, out: &mut W) -> io::Result<()> {
        if scrollback.generation() != self.generation {
            self.generation = scrollback.generation();
            self.printed = 0;
            if self.interactive {
                queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
            }
        }

        for entry in &scrollback.entries()[self.printed.min(scrollback.len())..] {
            self.write_entry(entry, out)?;
        }
        self.printed = scrollback.len();
        out.flush()
    }

    fn write_entry<W: Write>(&self, entry: &ScrollbackEntry, out: &mut W) -> io::Result<()> {
        let style = LineStyle::classify(&entry.text, entry.is_input());
        match self.theme.color_for(style) {
            Some(color) => queue!(
                out,
                SetForegroundColor(color),
                Print(&entry.text),
                ResetColor,
                Print("\n")
            ),
            None => queue!(out, Print(&entry.text), Print("\n")),
        }
    }

    /// The prompt shown before reading a line.
    pub fn write_prompt<W: Write>(&self, prompt: &str, out: &mut W) -> io::Result<()> {
        if !self.interactive {
            return Ok(());
        }
        match self.theme.color_for(LineStyle::Prompt) {
            Some(color) => queue!(
                out,
                SetForegroundColor(color),
                Print(prompt),
                Print(" $ "),
                ResetColor
            )?,
            None => queue!(out, Print(prompt), Print(" $ "))?,
        }
        out.flush()
    }

    /// Remove the line the terminal echoed as it was typed; the scrollback
    /// echo replaces it.
    pub fn erase_typed_line<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if !self.interactive {
            return Ok(());
        }
        queue!(out, MoveToPreviousLine(1), Clear(ClearType::CurrentLine))?;
        out.flush()
    }

    /// Transient status line, e.g. while waiting on the AI.
    pub fn write_status<W: Write>(&self, status: &str, out: &mut W) -> io::Result<()> {
        match self.theme.color_for(LineStyle::Muted) {
            Some(color) => queue!(
                out,
                SetForegroundColor(color),
                Print(status),
                ResetColor,
                Print("\n")
            )?,
            None => queue!(out, Print(status), Print("\n"))?,
        }
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw_plain(view: &mut ScrollbackView, scrollback: &Scrollback) -> String {
        let mut out = Vec::new();
        view.draw(scrollback, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_draws_only_new_entries() {
        let mut view = ScrollbackView::new(Theme::monochrome(), false);
        let mut scrollback = Scrollback::new();
        scrollback.push_input("ada@portfolio:~", "whoami");
        scrollback.push_output("ada");

        assert_eq!(draw_plain(&mut view, &scrollback), "ada@portfolio:~ $ whoami\nada\n");

        scrollback.push_blank();
        assert_eq!(draw_plain(&mut view, &scrollback), "\n");
        assert_eq!(draw_plain(&mut view, &scrollback), "");
    }

    #[test]
    fn test_clear_triggers_full_redraw() {
        let mut view = ScrollbackView::new(Theme::monochrome(), false);
        let mut scrollback = Scrollback::new();
        scrollback.push_input("p", "a");
        scrollback.push_blank();
        draw_plain(&mut view, &scrollback);

        scrollback.clear();
        scrollback.push_input("p", "clear");
        scrollback.push_blank();
        assert_eq!(draw_plain(&mut view, &scrollback), "p $ clear\n\n");
    }

    #[test]
    fn test_prompt_only_on_a_terminal() {
        let mut out = Vec::new();
        let piped = ScrollbackView::new(Theme::monochrome(), false);
        piped.write_prompt("p", &mut out).unwrap();
        piped.erase_typed_line(&mut out).unwrap();
        assert!(out.is_empty());

        let tty = ScrollbackView::new(Theme::monochrome(), true);
        tty.write_prompt("p", &mut out).unwrap();
        assert_eq!(String::from_utf8(out.clone()).unwrap(), "p $ ");

        out.clear();
        tty.erase_typed_line(&mut out).unwrap();
        assert!(out.starts_with(b"\x1b["), "expected cursor escapes");
    }

    #[test]
    fn test_colored_output_contains_text() {
        let mut view = ScrollbackView::new(Theme::default(), true);
        let mut scrollback = Scrollback::new();
        scrollback.push_output("Error: Invalid request parameters.");

        let drawn = draw_plain(&mut view, &scrollback);
        assert!(drawn.contains("Error: Invalid request parameters."));
        assert!(drawn.contains('\u{1b}'), "expected ANSI escapes");
    }
}
