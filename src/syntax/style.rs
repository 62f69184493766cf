//! Style types for text rendering
//!
//! Visual attributes attached to highlighted spans. Token categories map to
//! a `Style` through the active `Theme`; patterns never depend on it.

use super::tokens::TokenType;

/// Terminal color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    /// Whatever the terminal uses for plain text
    #[default]
    Default,
    /// 24-bit color
    Rgb(u8, u8, u8),
}

impl Color {
    /// Parse a `#RRGGBB` literal. Returns `None` on anything else.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Light or dark palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// Theme for a host color-scheme flag
    pub fn from_dark(is_dark: bool) -> Self {
        if is_dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }

    /// The other theme
    pub fn toggled(&self) -> Self {
        Self::from_dark(!self.is_dark())
    }

    /// Name used in the config file and mode line
    pub fn name(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parse a config value
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    fn pick(&self, light: &str, dark: &str) -> Color {
        Color::from_hex(if self.is_dark() { dark } else { light }).unwrap_or_default()
    }

    /// Editor background
    pub fn background(&self) -> Color {
        self.pick("#FFFFFF", "#1E1E1E")
    }

    /// Plain text color
    pub fn foreground(&self) -> Color {
        self.pick("#000000", "#D4D4D4")
    }

    /// Line-number gutter background
    pub fn gutter_background(&self) -> Color {
        self.pick("#F0F0F0", "#1E1E1E")
    }

    /// Line-number color
    pub fn gutter_foreground(&self) -> Color {
        self.pick("#999999", "#6D6D6D")
    }
}

/// Text style attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color
    pub fg: Color,
    /// Bold text
    pub bold: bool,
    /// Reverse video (swap fg/bg)
    pub reverse: bool,
}

impl Style {
    /// Create a style with just foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            fg: color,
            ..Default::default()
        }
    }

    /// Foreground from a `#RRGGBB` literal, falling back to the default color
    pub fn hex(hex: &str) -> Self {
        Self::fg(Color::from_hex(hex).unwrap_or_default())
    }

    /// Create a reverse video style (for selections)
    pub fn reverse() -> Self {
        Self {
            reverse: true,
            ..Default::default()
        }
    }

    /// Builder: set bold
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Builder: set reverse
    pub fn with_reverse(mut self) -> Self {
        self.reverse = true;
        self
    }

    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// A styled span of text within a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Byte offset where this span starts (inclusive)
    pub start: usize,
    /// Byte offset where this span ends (exclusive)
    pub end: usize,
    /// Category that produced the span
    pub token: TokenType,
    /// Style to apply to this span
    pub style: Style,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize, token: TokenType, style: Style) -> Self {
        Self { start, end, token, style }
    }

    /// Check if this span contains a byte position
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }

    /// Get the length of this span in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if span is empty
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}
