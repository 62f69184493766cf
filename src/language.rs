//! Language modes
//!
//! A single `LanguageMode` value selects both the highlighting rule table
//! and the indentation heuristics. The editor owns the one authoritative
//! copy and hands it to both engines, so they cannot disagree.

use std::fmt;
use std::path::Path;

/// Keywords that open an indented block in Python-like sources
const PYTHON_BLOCK_STARTERS: &[&str] = &[
    "if", "for", "while", "def", "class", "with", "try", "except", "finally", "elif", "else",
];

/// Which rule set is active for the current file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LanguageMode {
    /// Plain text: no highlighting, no smart indentation
    #[default]
    None,
    /// C, C++ and friends: braces and `/* */` comments
    CLike,
    /// Python: colon-introduced blocks and `#` comments
    PythonLike,
}

impl LanguageMode {
    /// Resolve a mode from a file extension (case-insensitive, no dot)
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "cpp" | "h" | "hpp" | "c" | "cc" => LanguageMode::CLike,
            "py" => LanguageMode::PythonLike,
            _ => LanguageMode::None,
        }
    }

    /// Resolve a mode from a file path; no path or no extension is `None`
    pub fn from_path(path: Option<&Path>) -> Self {
        path.and_then(|p| p.extension())
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or_default()
    }

    /// Human-readable name for the mode line
    pub fn name(&self) -> &'static str {
        match self {
            LanguageMode::None => "Text",
            LanguageMode::CLike => "C/C++",
            LanguageMode::PythonLike => "Python",
        }
    }

    /// Whether smart indentation and auto-pairing are active
    pub fn is_code(&self) -> bool {
        !matches!(self, LanguageMode::None)
    }

    /// Whether lines may carry `/* */` comment state to the next line
    pub fn has_block_comments(&self) -> bool {
        matches!(self, LanguageMode::CLike)
    }

    /// Keywords that introduce an indented block
    pub fn block_starters(&self) -> &'static [&'static str] {
        match self {
            LanguageMode::PythonLike => PYTHON_BLOCK_STARTERS,
            _ => &[],
        }
    }

    /// Whether a trimmed line opens a block, so the next line goes one unit deeper
    pub fn opens_block(&self, trimmed: &str) -> bool {
        match self {
            LanguageMode::CLike => trimmed.ends_with('{'),
            LanguageMode::PythonLike => {
                if !trimmed.ends_with(':') {
                    return false;
                }
                let first_word: String = trimmed
                    .chars()
                    .take_while(|c| c.is_alphanumeric() || *c == '_')
                    .collect();
                self.block_starters().contains(&first_word.as_str())
            }
            LanguageMode::None => false,
        }
    }
}

impl fmt::Display for LanguageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
