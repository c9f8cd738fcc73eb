use super::CommandResult;
use crate::error::CommandError;
use crate::model::ModelManager;
use crate::task::{Deadline, Name, Note, Priority, Status, Tag, Task};
use std::collections::BTreeSet;

pub const ADD_USAGE: &str = "add: Adds a task to the task manager.\n\
Parameters: NAME [p/PRIORITY] [s/STATUS] [n/NOTE] [d/DEADLINE] [t/TAG]...\n\
Example: add Buy milk p/hi d/2024-01-01 t/errand";

#[derive(Debug, Clone, PartialEq)]
pub struct AddCommand {
    to_add: Task,
}

impl AddCommand {
    pub fn new(
        name: Name,
        priority: Option<Priority>,
        status: Option<Status>,
        note: Option<Note>,
        deadline: Option<Deadline>,
        tags: BTreeSet<Tag>,
    ) -> Self {
        AddCommand {
            to_add: Task {
                name,
                priority: priority.unwrap_or_default(),
                status: status.unwrap_or_default(),
                note,
                deadline,
                tags,
            },
        }
    }

    pub fn task(&self) -> &Task {
        &self.to_add
    }

    pub fn execute(self, model: &mut ModelManager) -> Result<CommandResult, CommandError> {
        let feedback = format!("New task added: {}", self.to_add);
        model.add_task(self.to_add)?;
        model.show_all();
        Ok(CommandResult::new(feedback))
    }
}
