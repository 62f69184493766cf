//! Built-in language definitions
//!
//! One rule table per language mode.

mod c_like;
mod python_like;

use crate::language::LanguageMode;
use super::language::LanguageDefinition;

/// The rule table for a mode; plain text has none
pub fn definition_for(mode: LanguageMode) -> Option<LanguageDefinition> {
    match mode {
        LanguageMode::CLike => Some(c_like::c_like_language()),
        LanguageMode::PythonLike => Some(python_like::python_like_language()),
        LanguageMode::None => None,
    }
}
