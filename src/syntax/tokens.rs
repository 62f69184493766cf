//! Token types for syntax highlighting
//!
//! This module defines the semantic token types that can be
//! recognized in source code and their light/dark visual styles.

use super::style::{Style, Theme};

/// Semantic token types for syntax highlighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// Language keywords (if, class, def, ...)
    Keyword,
    /// Class or struct declarations
    Class,
    /// Single-line comments (`//`, `#`)
    Comment,
    /// `/* */` comments, possibly spanning lines
    BlockComment,
    /// String literals
    String,
    /// Function names (calls in C-like code, `def` in Python)
    Function,
    /// Numeric literals
    Number,
    /// Preprocessor directives (`#include`)
    Preprocessor,
    /// Python decorators (`@property`)
    Decorator,
}

impl TokenType {
    /// Resolve the visual style for this token under a theme
    pub fn style(&self, theme: Theme) -> Style {
        let dark = theme.is_dark();
        let pick = |light: &str, dark_hex: &str| Style::hex(if dark { dark_hex } else { light });
        match self {
            TokenType::Keyword => pick("#0000FF", "#569CD6").with_bold(),
            TokenType::Class => pick("#2B91AF", "#4EC9B0"),
            TokenType::Comment | TokenType::BlockComment => pick("#008000", "#6A9955"),
            TokenType::String => pick("#A31515", "#CE9178"),
            TokenType::Function => pick("#795E26", "#DCDCAA"),
            TokenType::Number => pick("#098658", "#B5CEA8"),
            TokenType::Preprocessor => pick("#AF00DB", "#C586C0"),
            TokenType::Decorator => pick("#0000FF", "#569CD6"),
        }
    }

    /// Get a human-readable name for this token type
    pub fn name(&self) -> &'static str {
        match self {
            TokenType::Keyword => "Keyword",
            TokenType::Class => "Class",
            TokenType::Comment => "Comment",
            TokenType::BlockComment => "BlockComment",
            TokenType::String => "String",
            TokenType::Function => "Function",
            TokenType::Number => "Number",
            TokenType::Preprocessor => "Preprocessor",
            TokenType::Decorator => "Decorator",
        }
    }
}
