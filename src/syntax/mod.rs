//! Syntax and styling module
//!
//! This module provides text styling infrastructure used for:
//! - Syntax highlighting with per-line block comment state
//! - Light and dark palettes
//! - Selection highlighting in the display

mod style;
mod tokens;
mod rules;
mod language;
mod manager;
mod builtin;

pub use style::{Color, Span, Style, Theme};
pub use tokens::TokenType;
pub use rules::{HighlightResult, LineState};
pub use language::{resolve_spans, LanguageDefinition};
pub use manager::{HighlightCache, SyntaxManager};
pub use builtin::definition_for;
