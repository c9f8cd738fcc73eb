use super::CommandResult;
use crate::error::CommandError;
use crate::model::ModelManager;

pub const UNDO_USAGE: &str = "undo: Reverts the last change to the task list.\nExample: undo";
pub const REDO_USAGE: &str = "redo: Reapplies the last undone change.\nExample: redo";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UndoCommand;

impl UndoCommand {
    pub fn execute(self, model: &mut ModelManager) -> Result<CommandResult, CommandError> {
        model.undo()?;
        model.show_all();
        Ok(CommandResult::new("Undid the most recent change"))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RedoCommand;

impl RedoCommand {
    pub fn execute(self, model: &mut ModelManager) -> Result<CommandResult, CommandError> {
        model.redo()?;
        model.show_all();
        Ok(CommandResult::new("Redid the most recently undone change"))
    }
}
