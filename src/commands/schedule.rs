use super::{CommandResult, EditCommand, EditTaskDescriptor, Index};
use crate::error::CommandError;
use crate::model::ModelManager;
use crate::task::Deadline;

pub const SCHEDULE_USAGE: &str = "schedule: Sets the deadline of the task identified by the index number used in the last task listing.\n\
Parameters: INDEX (must be a positive integer) DEADLINE\n\
Example: schedule 1 2024-01-01 18:00";

/// Shorthand for an edit that only touches the deadline.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleCommand {
    edit: EditCommand,
}

impl ScheduleCommand {
    pub fn new(index: Index, deadline: Deadline) -> Self {
        let descriptor = EditTaskDescriptor {
            deadline: Some(Some(deadline)),
            ..Default::default()
        };
        ScheduleCommand {
            edit: EditCommand::new(index, descriptor),
        }
    }

    pub fn execute(self, model: &mut ModelManager) -> Result<CommandResult, CommandError> {
        self.edit.execute(model)
    }
}
