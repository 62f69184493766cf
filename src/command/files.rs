//! File commands

use crate::editor::{EditorState, PromptAction};
use crate::error::Result;
use super::CommandStatus;

/// Open a file, asking first when the current buffer has unsaved changes
pub fn find_file(editor: &mut EditorState) -> Result<CommandStatus> {
    if editor.buffer.is_modified() {
        editor.start_prompt("Buffer modified; discard changes? (y/n) ", PromptAction::ConfirmOpen);
    } else {
        editor.start_prompt("Open file: ", PromptAction::OpenFile);
    }
    Ok(CommandStatus::Success)
}

/// Save the buffer, asking for a name when it has none
pub fn save_buffer(editor: &mut EditorState) -> Result<CommandStatus> {
    if editor.buffer.filename().is_none() {
        editor.start_prompt("Save as: ", PromptAction::SaveAs);
        return Ok(CommandStatus::Success);
    }
    editor.save_file()?;
    Ok(CommandStatus::Success)
}

/// Save the buffer under a new name
pub fn write_file(editor: &mut EditorState) -> Result<CommandStatus> {
    editor.start_prompt("Save as: ", PromptAction::SaveAs);
    Ok(CommandStatus::Success)
}
