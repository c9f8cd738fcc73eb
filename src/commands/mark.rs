use super::{CommandResult, EditCommand, EditTaskDescriptor, Index};
use crate::error::CommandError;
use crate::model::ModelManager;
use crate::task::Status;

pub const MARK_USAGE: &str = "mark: Marks the task identified by the index number as complete.\n\
Parameters: INDEX (must be a positive integer)\n\
Example: mark 1";
pub const UNMARK_USAGE: &str = "unmark: Marks the task identified by the index number as incomplete.\n\
Parameters: INDEX (must be a positive integer)\n\
Example: unmark 1";

#[derive(Debug, Clone, PartialEq)]
pub struct MarkCommand {
    edit: EditCommand,
}

impl MarkCommand {
    pub fn new(index: Index, status: Status) -> Self {
        let descriptor = EditTaskDescriptor {
            status: Some(status),
            ..Default::default()
        };
        MarkCommand {
            edit: EditCommand::new(index, descriptor),
        }
    }

    pub fn execute(self, model: &mut ModelManager) -> Result<CommandResult, CommandError> {
        self.edit.execute(model)
    }
}
