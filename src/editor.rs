//! Editor state and main loop
//!
//! Every key press becomes one undo step: the editor opens an edit group,
//! offers editing keys to the indent engine (falling back to plain insertion
//! when it declines) or runs the bound command, closes the group and feeds
//! the buffer's structural edits to the syntax manager.

use std::mem;
use std::path::{Path, PathBuf};

use tracing::{info, trace, warn};

use crate::buffer::Buffer;
use crate::command::{CommandStatus, KeyTable};
use crate::config::Config;
use crate::display::{Display, Frame, PromptLine};
use crate::document::TextDocument;
use crate::error::{EditorError, Result};
use crate::indent::{EditKey, IndentEngine};
use crate::input::{translate_key, Key};
use crate::language::LanguageMode;
use crate::syntax::{SyntaxManager, Theme};
use crate::terminal::Terminal;
use crate::window::Window;

/// Rows taken by the mode line and the minibuffer
const RESERVED_ROWS: u16 = 2;

/// What to do when a prompt completes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAction {
    OpenFile,
    SaveAs,
    /// y/n before quitting with unsaved changes
    ConfirmQuit,
    /// y/n before replacing a modified buffer
    ConfirmOpen,
}

impl PromptAction {
    fn is_confirmation(&self) -> bool {
        matches!(self, PromptAction::ConfirmQuit | PromptAction::ConfirmOpen)
    }
}

/// Minibuffer prompt state
#[derive(Debug, Clone)]
pub struct Prompt {
    pub line: PromptLine,
    pub action: PromptAction,
}

/// Main editor state
pub struct EditorState {
    /// The document being edited
    pub buffer: Buffer,
    /// Highlight cache and the authoritative language mode
    pub syntax: SyntaxManager,
    pub indent: IndentEngine,
    pub config: Config,
    pub display: Display,
    pub window: Window,
    /// Key bindings
    pub keytab: KeyTable,
    /// Minibuffer prompt, when one is active
    pub prompt: Option<Prompt>,
    /// Where preference changes are written; `None` keeps them in memory
    config_path: Option<PathBuf>,
    running: bool,
    /// Ring the terminal bell after this key
    bell: bool,
}

impl EditorState {
    /// Create an editor with an empty scratch buffer for a screen of `rows`
    pub fn new(config: Config, rows: u16) -> Self {
        let buffer = Buffer::default();
        let mut syntax = SyntaxManager::new(config.theme);
        syntax.rehighlight(&buffer);

        Self {
            buffer,
            syntax,
            indent: IndentEngine::new(config.auto_indent),
            display: Display::new(config.show_line_numbers),
            window: Window::new(rows.saturating_sub(RESERVED_ROWS)),
            keytab: KeyTable::with_defaults(),
            prompt: None,
            config,
            config_path: None,
            running: true,
            bell: false,
        }
    }

    /// Persist preference changes to `path`
    pub fn set_config_path(&mut self, path: Option<PathBuf>) {
        self.config_path = path;
    }

    /// Current language mode
    pub fn mode(&self) -> LanguageMode {
        self.syntax.mode()
    }

    pub fn theme(&self) -> Theme {
        self.syntax.theme()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Action of the active prompt
    pub fn prompt_action(&self) -> Option<PromptAction> {
        self.prompt.as_ref().map(|p| p.action)
    }

    /// Switch language mode and re-highlight the whole buffer
    pub fn set_language(&mut self, mode: LanguageMode) {
        self.syntax.set_language(mode, &self.buffer);
    }

    /// Switch palette, keeping the cached token categories
    pub fn update_theme(&mut self, is_dark: bool) {
        let theme = Theme::from_dark(is_dark);
        self.syntax.update_theme(theme, &self.buffer);
        self.config.theme = theme;
        self.save_config();
    }

    /// Write the config if a location is set; failures only warn
    pub fn save_config(&mut self) {
        let Some(path) = &self.config_path else {
            return;
        };
        if let Err(e) = self.config.save_to(path) {
            warn!(path = %path.display(), error = %e, "could not save config");
            self.display.set_message(format!("Could not save config: {}", e));
        }
    }

    /// Load a file into the editor; a missing file starts a new buffer with that name
    pub fn open_file(&mut self, path: &Path) -> Result<()> {
        let buffer = match Buffer::from_file(path) {
            Ok(buffer) => {
                self.display.set_message(format!("Opened {}", path.display()));
                buffer
            }
            Err(EditorError::FileNotFound(_)) => {
                let mut buffer = Buffer::default();
                buffer.set_filename(path.to_path_buf());
                self.display.set_message(format!("(New file) {}", path.display()));
                buffer
            }
            Err(e) => return Err(e),
        };

        self.buffer = buffer;
        self.window.set_top_line(0);
        self.window.set_goal_col(None);
        let mode = LanguageMode::from_path(self.buffer.filename());
        info!(path = %path.display(), mode = mode.name(), "opened file");
        self.set_language(mode);
        Ok(())
    }

    /// Save the buffer to its file
    pub fn save_file(&mut self) -> Result<()> {
        self.buffer.save()?;
        let name = self
            .buffer
            .filename()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        info!(path = %name, "saved file");
        self.display.set_message(format!("Wrote {}", name));
        Ok(())
    }

    /// Save under a new name and re-resolve the language from it
    pub fn save_as(&mut self, path: PathBuf) -> Result<()> {
        self.buffer.set_filename(path);
        self.save_file()?;
        let mode = LanguageMode::from_path(self.buffer.filename());
        if mode != self.mode() {
            self.set_language(mode);
        }
        Ok(())
    }

    /// Run the main editor loop
    pub fn run(&mut self, terminal: &mut Terminal) -> Result<()> {
        self.resize(terminal.rows());

        while self.running {
            let frame = Frame {
                buffer: &self.buffer,
                syntax: &self.syntax,
                window: &self.window,
                theme: self.syntax.theme(),
                prompt: self.prompt.as_ref().map(|p| &p.line),
            };
            self.display.render(terminal, &frame)?;

            let event = terminal.read_key()?;
            self.resize(terminal.rows());

            if let Some(key) = translate_key(event) {
                if let Err(e) = self.handle_key(key) {
                    warn!(error = %e, "command failed");
                    self.display.set_message(e.to_string());
                    self.bell = true;
                }
            }

            if mem::take(&mut self.bell) {
                terminal.beep()?;
            }
        }

        Ok(())
    }

    fn resize(&mut self, rows: u16) {
        self.window.set_height(rows.saturating_sub(RESERVED_ROWS));
        self.window.ensure_visible(self.buffer.cursor().line);
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: Key) -> Result<()> {
        if self.prompt.is_some() {
            return self.handle_prompt_key(key);
        }

        self.display.clear_message();

        self.buffer.begin_edit_group();
        let result = self.dispatch(key);
        self.buffer.end_edit_group();

        self.sync_syntax();
        self.window.ensure_visible(self.buffer.cursor().line);
        result
    }

    fn dispatch(&mut self, key: Key) -> Result<()> {
        if let Some(edit) = key.edit_key() {
            self.window.set_goal_col(None);
            let mode = self.mode();
            if !self.indent.handle_key(mode, &mut self.buffer, edit).is_consumed() {
                self.insert_plain(edit);
            }
            return Ok(());
        }

        if let Some(cmd) = self.keytab.lookup(key) {
            trace!(key = %key.display_name(), command = self.keytab.lookup_name(key).unwrap_or_default(), "run command");
            match cmd(self)? {
                CommandStatus::Success => {}
                CommandStatus::Failure => self.bell = true,
                CommandStatus::Abort => {
                    self.display.set_message("Quit");
                    self.bell = true;
                }
            }
        } else {
            self.bell = true;
            self.display
                .set_message(format!("Key not bound: {}", key.display_name()));
        }
        Ok(())
    }

    /// Default behavior for an editing key the indent engine declined
    fn insert_plain(&mut self, edit: EditKey) {
        match edit {
            EditKey::Tab => self.buffer.insert_text("\t"),
            EditKey::Enter => self.buffer.insert_text("\n"),
            EditKey::Backspace => {
                if !self.buffer.delete_backward() {
                    self.bell = true;
                }
            }
            EditKey::Char(ch) => {
                let mut tmp = [0u8; 4];
                self.buffer.insert_text(ch.encode_utf8(&mut tmp));
            }
        }
    }

    /// Feed pending structural edits to the highlighter
    fn sync_syntax(&mut self) {
        let edits = self.buffer.take_edits();
        if edits.is_empty() {
            return;
        }
        let scanned = self.syntax.apply_edits(&self.buffer, &edits);
        trace!(edits = edits.len(), scanned, "re-highlighted");
    }

    /// Start a minibuffer prompt
    pub fn start_prompt(&mut self, label: &str, action: PromptAction) {
        self.prompt = Some(Prompt {
            line: PromptLine {
                label: label.to_string(),
                input: String::new(),
            },
            action,
        });
    }

    /// Handle key press during prompt mode
    fn handle_prompt_key(&mut self, key: Key) -> Result<()> {
        let Some(prompt) = self.prompt.as_mut() else {
            return Ok(());
        };

        // C-g and Esc abort
        if key == Key::ctrl('g') || key == Key::ctrl('[') {
            self.prompt = None;
            self.display.set_message("Quit");
            return Ok(());
        }

        // A confirmation answers on the first key
        if prompt.action.is_confirmation() {
            let action = prompt.action;
            self.prompt = None;
            return match key.base_char() {
                Some('y') | Some('Y') if key.is_self_insert() => {
                    self.complete_prompt(action, String::new())
                }
                _ => {
                    self.display.clear_message();
                    Ok(())
                }
            };
        }

        if key == Key::enter() {
            let action = prompt.action;
            let input = mem::take(&mut prompt.line.input);
            self.prompt = None;
            self.display.clear_message();
            return self.complete_prompt(action, input);
        }

        if key == Key::backspace() {
            prompt.line.input.pop();
            return Ok(());
        }

        if key.is_self_insert() {
            if let Some(ch) = key.base_char() {
                prompt.line.input.push(ch);
            }
            return Ok(());
        }

        self.bell = true;
        Ok(())
    }

    /// Complete a prompt action
    fn complete_prompt(&mut self, action: PromptAction, input: String) -> Result<()> {
        match action {
            PromptAction::OpenFile => {
                if input.is_empty() {
                    self.display.set_message("No file name");
                    return Ok(());
                }
                self.open_file(Path::new(&input))
            }
            PromptAction::SaveAs => {
                if input.is_empty() {
                    self.display.set_message("No file name");
                    return Ok(());
                }
                self.save_as(PathBuf::from(input))
            }
            PromptAction::ConfirmQuit => {
                self.quit();
                Ok(())
            }
            PromptAction::ConfirmOpen => {
                self.start_prompt("Open file: ", PromptAction::OpenFile);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Position;
    use crate::input::special;
    use crate::syntax::TokenType;

    fn editor() -> EditorState {
        EditorState::new(Config::default(), 24)
    }

    fn type_str(editor: &mut EditorState, text: &str) {
        for ch in text.chars() {
            let key = match ch {
                '\n' => Key::enter(),
                '\t' => Key::tab(),
                _ => Key::char(ch),
            };
            editor.handle_key(key).unwrap();
        }
    }

    #[test]
    fn test_typing_in_c_mode_pairs_and_highlights() {
        let mut editor = editor();
        editor.set_language(LanguageMode::CLike);
        type_str(&mut editor, "foo(");
        assert_eq!(editor.buffer.text(), "foo()");
        assert_eq!(editor.buffer.cursor(), Position::new(0, 4));

        let spans = editor.syntax.line_spans(0);
        assert!(spans
            .iter()
            .any(|s| s.token == TokenType::Function && s.start == 0 && s.end == 3));

        // Typing the closer skips over it
        type_str(&mut editor, ")");
        assert_eq!(editor.buffer.text(), "foo()");
        assert_eq!(editor.buffer.cursor(), Position::new(0, 5));
    }

    #[test]
    fn test_plain_mode_inserts_literally() {
        let mut editor = editor();
        type_str(&mut editor, "(x\n");
        assert_eq!(editor.buffer.text(), "(x\n");
        assert!(editor.syntax.line_spans(0).is_empty());
    }

    #[test]
    fn test_enter_after_python_block_starter() {
        let mut editor = editor();
        editor.set_language(LanguageMode::PythonLike);
        type_str(&mut editor, "if x:\n");
        assert_eq!(editor.buffer.text(), "if x:\n    ");
        assert_eq!(editor.buffer.cursor(), Position::new(1, 4));
    }

    #[test]
    fn test_comment_opened_by_typing_spreads_downward() {
        let mut editor = editor();
        editor.set_language(LanguageMode::CLike);
        editor.buffer = Buffer::from_text("t", "\nint a;\nint b;");
        editor.syntax.rehighlight(&editor.buffer);
        assert!(!editor.syntax.line_state(2).in_block_comment);

        type_str(&mut editor, "/*");
        assert!(editor.syntax.line_state(0).in_block_comment);
        assert!(editor.syntax.line_state(2).in_block_comment);
        assert!(editor
            .syntax
            .line_spans(1)
            .iter()
            .any(|s| s.token == TokenType::BlockComment));
    }

    #[test]
    fn test_one_key_is_one_undo_step() {
        let mut editor = editor();
        editor.set_language(LanguageMode::CLike);
        type_str(&mut editor, "{");
        assert_eq!(editor.buffer.text(), "{\n    \n}");

        editor.handle_key(Key::ctrl('z')).unwrap();
        assert_eq!(editor.buffer.text(), "");
        assert!(editor.syntax.line_spans(0).is_empty());

        editor.handle_key(Key::ctrl('y')).unwrap();
        assert_eq!(editor.buffer.text(), "{\n    \n}");
        assert_eq!(editor.buffer.cursor(), Position::new(1, 4));
    }

    #[test]
    fn test_unbound_key_rings_bell() {
        let mut editor = editor();
        editor.handle_key(Key::ctrl('k')).unwrap();
        assert!(editor.bell);
        assert_eq!(editor.display.message(), Some("Key not bound: C-k"));
    }

    #[test]
    fn test_backspace_at_start_rings_bell() {
        let mut editor = editor();
        editor.handle_key(Key::backspace()).unwrap();
        assert!(editor.bell);
    }

    #[test]
    fn test_open_and_save_as_resolve_mode() {
        let dir = tempfile::tempdir().unwrap();
        let c_path = dir.path().join("main.c");
        std::fs::write(&c_path, "int main() {}\n").unwrap();

        let mut editor = editor();
        editor.open_file(&c_path).unwrap();
        assert_eq!(editor.mode(), LanguageMode::CLike);
        assert!(editor
            .syntax
            .line_spans(0)
            .iter()
            .any(|s| s.token == TokenType::Keyword && s.start == 0 && s.end == 3));

        let py_path = dir.path().join("script.py");
        editor.save_as(py_path.clone()).unwrap();
        assert_eq!(editor.mode(), LanguageMode::PythonLike);
        assert!(py_path.exists());
        assert_eq!(editor.display.message(), Some(format!("Wrote {}", py_path.display()).as_str()));
    }

    #[test]
    fn test_open_missing_file_starts_new_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.py");

        let mut editor = editor();
        editor.open_file(&path).unwrap();
        assert_eq!(editor.buffer.name(), "new.py");
        assert_eq!(editor.buffer.text(), "");
        assert_eq!(editor.mode(), LanguageMode::PythonLike);
    }

    #[test]
    fn test_save_prompt_flow() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.c");

        let mut editor = editor();
        type_str(&mut editor, "x");
        editor.handle_key(Key::ctrl('s')).unwrap();
        assert_eq!(editor.prompt_action(), Some(PromptAction::SaveAs));

        type_str(&mut editor, &path.display().to_string());
        editor.handle_key(Key::enter()).unwrap();
        assert!(editor.prompt.is_none());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "x");
        assert_eq!(editor.mode(), LanguageMode::CLike);
    }

    #[test]
    fn test_quit_confirmation() {
        let mut editor = editor();
        type_str(&mut editor, "x");
        editor.handle_key(Key::ctrl('q')).unwrap();
        assert!(editor.is_running());

        // Anything but y keeps editing
        editor.handle_key(Key::char('n')).unwrap();
        assert!(editor.prompt.is_none());
        assert!(editor.is_running());

        editor.handle_key(Key::ctrl('q')).unwrap();
        editor.handle_key(Key::char('y')).unwrap();
        assert!(!editor.is_running());
    }

    #[test]
    fn test_prompt_abort() {
        let mut editor = editor();
        editor.handle_key(Key::ctrl('o')).unwrap();
        type_str(&mut editor, "abc");
        editor.handle_key(Key::ctrl('g')).unwrap();
        assert!(editor.prompt.is_none());
        assert_eq!(editor.display.message(), Some("Quit"));
        assert_eq!(editor.buffer.text(), "");
    }

    #[test]
    fn test_auto_indent_disabled_by_config() {
        let config = Config {
            auto_indent: false,
            ..Config::default()
        };
        let mut editor = EditorState::new(config, 24);
        editor.set_language(LanguageMode::CLike);
        type_str(&mut editor, "(");
        assert_eq!(editor.buffer.text(), "(");
    }

    #[test]
    fn test_theme_toggle_persists_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut editor = editor();
        editor.set_config_path(Some(path.clone()));
        editor.handle_key(Key::ctrl('t')).unwrap();
        assert_eq!(editor.theme(), Theme::Light);
        assert_eq!(Config::load_from(&path).theme, Theme::Light);
    }

    #[test]
    fn test_navigation_keeps_cursor_visible() {
        let mut editor = EditorState::new(Config::default(), 7);
        editor.buffer = Buffer::from_text("t", &"line\n".repeat(40));
        for _ in 0..20 {
            editor.handle_key(Key::special(special::DOWN)).unwrap();
        }
        assert_eq!(editor.buffer.cursor().line, 20);
        assert!(editor.window.is_line_visible(20));
    }
}
