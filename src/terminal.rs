//! Terminal abstraction using crossterm

use std::io::{self, BufWriter, Stdout, Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyEvent},
    execute, queue,
    style::{Attribute, Color as TermColor, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use crate::error::Result;
use crate::syntax::{Color, Style};

fn term_color(color: Color) -> TermColor {
    match color {
        Color::Default => TermColor::Reset,
        Color::Rgb(r, g, b) => TermColor::Rgb { r, g, b },
    }
}

/// Raw-mode terminal on the alternate screen
///
/// Output is queued into a buffer and only reaches the terminal on `flush`,
/// so a whole frame is written at once.
pub struct Terminal {
    out: BufWriter<Stdout>,
    cols: u16,
    rows: u16,
}

impl Terminal {
    /// Create a new terminal instance and enter raw mode
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let (cols, rows) = terminal::size()?;

        let mut out = BufWriter::new(io::stdout());
        execute!(out, terminal::EnterAlternateScreen, cursor::Hide)?;

        Ok(Self { out, cols, rows })
    }

    /// Get terminal width
    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// Get terminal height
    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Clear from cursor to end of line
    pub fn clear_to_eol(&mut self) -> Result<()> {
        queue!(self.out, terminal::Clear(ClearType::UntilNewLine))?;
        Ok(())
    }

    /// Move cursor to position (0-indexed)
    pub fn move_cursor(&mut self, row: u16, col: u16) -> Result<()> {
        queue!(self.out, cursor::MoveTo(col, row))?;
        Ok(())
    }

    /// Write a string at current cursor position
    pub fn write_str(&mut self, s: &str) -> Result<()> {
        queue!(self.out, Print(s))?;
        Ok(())
    }

    /// Flush output buffer to terminal
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    pub fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
        match visible {
            true => queue!(self.out, cursor::Show)?,
            false => queue!(self.out, cursor::Hide)?,
        }
        Ok(())
    }

    /// Block until a key event arrives, tracking resizes on the way
    pub fn read_key(&mut self) -> Result<KeyEvent> {
        loop {
            match event::read()? {
                Event::Key(key) => return Ok(key),
                Event::Resize(cols, rows) => (self.cols, self.rows) = (cols, rows),
                _ => {}
            }
        }
    }

    /// Set the colors used by subsequent writes
    pub fn set_colors(&mut self, fg: Color, bg: Color) -> Result<()> {
        queue!(
            self.out,
            SetForegroundColor(term_color(fg)),
            SetBackgroundColor(term_color(bg))
        )?;
        Ok(())
    }

    /// Apply a highlight style on top of the base colors
    pub fn apply_style(&mut self, style: Style, base_fg: Color) -> Result<()> {
        let fg = if style.fg == Color::Default { base_fg } else { style.fg };
        queue!(self.out, SetForegroundColor(term_color(fg)))?;
        if style.bold {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        }
        if style.reverse {
            queue!(self.out, SetAttribute(Attribute::Reverse))?;
        }
        Ok(())
    }

    /// Set reverse video mode
    pub fn set_reverse(&mut self, enabled: bool) -> Result<()> {
        if enabled {
            queue!(self.out, SetAttribute(Attribute::Reverse))?;
        } else {
            queue!(self.out, SetAttribute(Attribute::NoReverse))?;
        }
        Ok(())
    }

    /// Reset all attributes
    pub fn reset_attributes(&mut self) -> Result<()> {
        queue!(self.out, SetAttribute(Attribute::Reset))?;
        Ok(())
    }

    /// Ring the bell
    pub fn beep(&mut self) -> Result<()> {
        queue!(self.out, Print('\x07'))?;
        self.flush()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            SetAttribute(Attribute::Reset),
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_conversion() {
        assert_eq!(term_color(Color::Default), TermColor::Reset);
        assert_eq!(term_color(Color::Rgb(1, 2, 3)), TermColor::Rgb { r: 1, g: 2, b: 3 });
    }
}
