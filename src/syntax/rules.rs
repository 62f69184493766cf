//! Pattern rules for syntax highlighting
//!
//! This module defines the rule types used to match and tokenize
//! source code for syntax highlighting.

use regex::Regex;
use super::tokens::TokenType;

/// A single-line pattern rule
///
/// Every non-overlapping match of the pattern on a line is styled. Rules do
/// not exclude each other: a later rule repaints characters an earlier rule
/// already styled.
pub struct PatternRule {
    /// Name for debugging
    pub name: String,
    /// Compiled regex pattern
    pub pattern: Regex,
    /// Token type to assign to matches
    pub token_type: TokenType,
    /// Capture group whose range is styled (0 = whole match)
    pub group: usize,
}

impl PatternRule {
    /// Create a rule that styles the whole match
    pub fn new(name: &str, pattern: &str, token_type: TokenType) -> Option<Self> {
        Self::with_group(name, pattern, token_type, 0)
    }

    /// Create a rule that styles only one capture group of each match
    pub fn with_group(name: &str, pattern: &str, token_type: TokenType, group: usize) -> Option<Self> {
        let regex = Regex::new(pattern).ok()?;
        if group >= regex.captures_len() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            pattern: regex,
            token_type,
            group,
        })
    }

    /// All styled ranges on a line, left to right
    pub fn find_all(&self, text: &str) -> Vec<(usize, usize)> {
        if self.group == 0 {
            return self.pattern.find_iter(text).map(|m| (m.start(), m.end())).collect();
        }
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| caps.get(self.group))
            .map(|m| (m.start(), m.end()))
            .collect()
    }
}

/// The `/* ... */` construct, the only one that carries state across lines
pub struct BlockCommentRule {
    /// Opening delimiter
    pub start: Regex,
    /// Closing delimiter
    pub end: Regex,
    /// Token type for comment text
    pub token_type: TokenType,
}

impl BlockCommentRule {
    /// Create a block comment rule
    pub fn new(start_pattern: &str, end_pattern: &str, token_type: TokenType) -> Option<Self> {
        Some(Self {
            start: Regex::new(start_pattern).ok()?,
            end: Regex::new(end_pattern).ok()?,
            token_type,
        })
    }

    /// Find the next opening delimiter at or after `from`
    pub fn find_start(&self, text: &str, from: usize) -> Option<usize> {
        if from > text.len() {
            return None;
        }
        self.start.find_at(text, from).map(|m| m.start())
    }

    /// Find the end (exclusive) of the closing delimiter searching from `from`
    ///
    /// The search starts at the opening's own offset, so `/*/` closes itself.
    pub fn find_end(&self, text: &str, from: usize) -> Option<usize> {
        if from > text.len() {
            return None;
        }
        self.end.find_at(text, from).map(|m| m.end())
    }

    /// Comment ranges on one line and whether the line ends inside a comment
    pub fn scan(&self, text: &str, prev_state: LineState) -> (Vec<(usize, usize)>, LineState) {
        let mut ranges = Vec::new();
        let mut next = if prev_state.in_block_comment {
            Some(0)
        } else {
            self.find_start(text, 0)
        };

        while let Some(start) = next {
            match self.find_end(text, start) {
                Some(end) => {
                    ranges.push((start, end));
                    next = self.find_start(text, end);
                }
                None => {
                    ranges.push((start, text.len()));
                    return (ranges, LineState::inside_comment());
                }
            }
        }

        (ranges, LineState::default())
    }
}

/// Line state for tracking multi-line constructs
///
/// Stored per line: whether the line ends inside an unterminated block
/// comment, which becomes the starting state of the next line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineState {
    pub in_block_comment: bool,
}

impl LineState {
    /// State for a line that ends inside a block comment
    pub fn inside_comment() -> Self {
        Self { in_block_comment: true }
    }

    /// Check if we're in normal (no comment) state
    pub fn is_normal(&self) -> bool {
        !self.in_block_comment
    }
}

/// Result of highlighting a single line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightResult {
    /// Spans in application order; later spans win where they overlap
    pub spans: Vec<super::style::Span>,
    /// State at end of line (for next line)
    pub end_state: LineState,
}
