use super::{CommandResult, Index};
use crate::error::CommandError;
use crate::model::ModelManager;

pub const DELETE_USAGE: &str = "delete: Deletes the task identified by the index number used in the last task listing.\n\
Parameters: INDEX (must be a positive integer)\n\
Example: delete 1";

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteCommand {
    index: Index,
}

impl DeleteCommand {
    pub fn new(index: Index) -> Self {
        DeleteCommand { index }
    }

    pub fn execute(self, model: &mut ModelManager) -> Result<CommandResult, CommandError> {
        let position = model.resolve_index(self.index)?;
        let removed = model.delete_task(position)?;
        Ok(CommandResult::new(format!("Deleted Task: {}", removed)))
    }
}
