//! Configuration file support
//!
//! Loads settings from `<config dir>/codepad/config.toml`
//! (`~/.config/codepad/config.toml` on Linux).
//!
//! Example:
//! ```text
//! # codepad configuration
//! theme = "dark"
//! line-numbers = true
//! auto-indent = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use toml::{Table, Value};
use tracing::{debug, warn};

use crate::error::Result;
use crate::syntax::Theme;

/// Configuration settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Color palette
    pub theme: Theme,
    /// Whether to show line numbers
    pub show_line_numbers: bool,
    /// Whether the indent engine intercepts keys
    pub auto_indent: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            show_line_numbers: true,
            auto_indent: true,
        }
    }
}

impl Config {
    /// Directory holding the config file and logs
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("codepad"))
    }

    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Load configuration from the default location
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Config::default(),
        }
    }

    /// Load configuration from a file; missing or unreadable files give defaults
    pub fn load_from(path: &Path) -> Self {
        let mut config = Config::default();

        let Ok(contents) = fs::read_to_string(path) else {
            debug!(path = %path.display(), "no config file, using defaults");
            return config;
        };
        match Self::parse(&contents) {
            Ok(settings) => config.apply(&settings),
            Err(e) => warn!(path = %path.display(), error = %e, "ignoring malformed config"),
        }
        config
    }

    /// Parse config file contents into a table
    fn parse(contents: &str) -> Result<Table> {
        Ok(contents.parse::<Table>()?)
    }

    /// Apply settings from parsed config
    fn apply(&mut self, settings: &Table) {
        if let Some(value) = settings.get("theme") {
            match value.as_str().and_then(Theme::from_name) {
                Some(theme) => self.theme = theme,
                None => warn!(%value, "unknown theme"),
            }
        }

        if let Some(value) = settings.get("line-numbers") {
            match parse_bool(value) {
                Some(b) => self.show_line_numbers = b,
                None => warn!(%value, "line-numbers expects a boolean"),
            }
        }

        if let Some(value) = settings.get("auto-indent") {
            match parse_bool(value) {
                Some(b) => self.auto_indent = b,
                None => warn!(%value, "auto-indent expects a boolean"),
            }
        }
    }

    fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.insert("theme".into(), Value::String(self.theme.name().into()));
        table.insert("line-numbers".into(), Value::Boolean(self.show_line_numbers));
        table.insert("auto-indent".into(), Value::Boolean(self.auto_indent));
        table
    }

    /// Save current configuration to the default location
    pub fn save(&self) -> Result<()> {
        match Self::config_path() {
            Some(path) => self.save_to(&path),
            None => Ok(()),
        }
    }

    /// Save current configuration to a file, creating its directory
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let contents = format!(
            "# codepad configuration\n# Generated automatically\n\n{}",
            toml::to_string(&self.to_table())?
        );
        fs::write(path, contents)?;
        debug!(path = %path.display(), "saved config");
        Ok(())
    }
}

/// Parse a boolean value; strings like "yes"/"off" are accepted too
fn parse_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Boolean(b) => Some(*b),
        Value::String(s) => match s.to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        },
        Value::Integer(n) => Some(*n != 0),
        _ => None,
    }
}
