//! codepad - a minimalist terminal code editor
//!
//! The editor core is two engines working on a [`document::TextDocument`]:
//! a regex syntax highlighter whose per-line cache carries multi-line
//! comment state ([`syntax::SyntaxManager`]), and an indentation and
//! auto-pairing engine that intercepts editing keys ([`indent::IndentEngine`]).
//! The remaining modules are the terminal host around them.

pub mod buffer;
pub mod command;
pub mod config;
pub mod display;
pub mod document;
pub mod editor;
pub mod error;
pub mod history;
pub mod indent;
pub mod input;
pub mod language;
pub mod line;
pub mod logging;
pub mod syntax;
pub mod terminal;
pub mod window;
