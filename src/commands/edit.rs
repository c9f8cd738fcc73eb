use super::{CommandResult, Index};
use crate::error::CommandError;
use crate::model::ModelManager;
use crate::task::{Deadline, Name, Note, Priority, Status, Tag, Task};
use std::collections::BTreeSet;

pub const EDIT_USAGE: &str = "edit: Edits the task identified by the index number used in the last task listing.\n\
Existing values will be overwritten by the input values.\n\
Parameters: INDEX (must be a positive integer) [NAME] [p/PRIORITY] [s/STATUS] [n/NOTE] [d/DEADLINE] [t/TAG]...\n\
Example: edit 1 p/hi d/2024-01-01";

/// Fields to change on a task. `None` leaves a field alone. For `note` and
/// `deadline`, `Some(None)` clears the field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditTaskDescriptor {
    pub name: Option<Name>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    pub note: Option<Option<Note>>,
    pub deadline: Option<Option<Deadline>>,
    pub tags: Option<BTreeSet<Tag>>,
}

impl EditTaskDescriptor {
    pub fn is_any_field_edited(&self) -> bool {
        self.name.is_some()
            || self.priority.is_some()
            || self.status.is_some()
            || self.note.is_some()
            || self.deadline.is_some()
            || self.tags.is_some()
    }

    pub fn apply(&self, task: &Task) -> Task {
        Task {
            name: self.name.clone().unwrap_or_else(|| task.name.clone()),
            priority: self.priority.unwrap_or(task.priority),
            status: self.status.unwrap_or(task.status),
            note: self.note.clone().unwrap_or_else(|| task.note.clone()),
            deadline: self.deadline.unwrap_or(task.deadline),
            tags: self.tags.clone().unwrap_or_else(|| task.tags.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditCommand {
    index: Index,
    descriptor: EditTaskDescriptor,
}

impl EditCommand {
    pub fn new(index: Index, descriptor: EditTaskDescriptor) -> Self {
        EditCommand { index, descriptor }
    }

    pub fn execute(self, model: &mut ModelManager) -> Result<CommandResult, CommandError> {
        if !self.descriptor.is_any_field_edited() {
            return Err(CommandError::NotEdited);
        }
        let position = model.resolve_index(self.index)?;
        let current = model.task_at(position).ok_or(CommandError::InvalidIndex)?;
        let edited = self.descriptor.apply(current);
        let feedback = format!("Edited Task: {}", edited);

        model.update_task(position, edited)?;
        model.show_all();
        Ok(CommandResult::new(feedback))
    }
}
