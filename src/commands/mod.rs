//! One module per command word. Every command is a plain value built by the
//! parser and consumed by [`Command::execute`].

mod add;
mod delete;
mod edit;
mod find;
mod history;
mod list;
mod mark;
mod schedule;
mod sync;

pub use add::{AddCommand, ADD_USAGE};
pub use delete::{DeleteCommand, DELETE_USAGE};
pub use edit::{EditCommand, EditTaskDescriptor, EDIT_USAGE};
pub use find::{FindCommand, FIND_USAGE};
pub use history::{RedoCommand, UndoCommand, REDO_USAGE, UNDO_USAGE};
pub use list::{ClearCommand, ListCommand, CLEAR_USAGE, LIST_USAGE};
pub use mark::{MarkCommand, MARK_USAGE, UNMARK_USAGE};
pub use schedule::{ScheduleCommand, SCHEDULE_USAGE};
pub use sync::{SyncCommand, SyncToggle, SYNC_USAGE};

use crate::error::CommandError;
use crate::model::ModelManager;
use std::num::NonZeroUsize;

pub const HELP_USAGE: &str = "help: Shows program usage instructions.\nExample: help";
pub const EXIT_USAGE: &str = "exit: Exits the program.\nExample: exit";
pub const EXIT_ACKNOWLEDGEMENT: &str = "Exiting task manager as requested ...";

/// Usage of every command, one block per command word.
pub fn help_text() -> String {
    [
        ADD_USAGE,
        EDIT_USAGE,
        SCHEDULE_USAGE,
        MARK_USAGE,
        UNMARK_USAGE,
        DELETE_USAGE,
        FIND_USAGE,
        LIST_USAGE,
        CLEAR_USAGE,
        UNDO_USAGE,
        REDO_USAGE,
        SYNC_USAGE,
        HELP_USAGE,
        EXIT_USAGE,
    ]
    .join("\n\n")
}

/// One-based position of a task in the list the user is currently looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Index(NonZeroUsize);

impl Index {
    pub fn from_one_based(value: usize) -> Option<Self> {
        NonZeroUsize::new(value).map(Index)
    }

    pub fn one_based(&self) -> usize {
        self.0.get()
    }

    pub fn zero_based(&self) -> usize {
        self.0.get() - 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    ShowHelp,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub feedback: String,
    pub payload: Option<Payload>,
}

impl CommandResult {
    pub fn new(feedback: impl Into<String>) -> Self {
        CommandResult {
            feedback: feedback.into(),
            payload: None,
        }
    }

    pub fn with_payload(feedback: impl Into<String>, payload: Payload) -> Self {
        CommandResult {
            feedback: feedback.into(),
            payload: Some(payload),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add(AddCommand),
    Edit(EditCommand),
    Schedule(ScheduleCommand),
    Mark(MarkCommand),
    Delete(DeleteCommand),
    Find(FindCommand),
    List(ListCommand),
    Clear(ClearCommand),
    Undo(UndoCommand),
    Redo(RedoCommand),
    Sync(SyncCommand),
    Help,
    Exit,
}

impl Command {
    /// Applies the command to `model`. Taking `self` by value means a built
    /// command can run at most once.
    pub fn execute(self, model: &mut ModelManager) -> Result<CommandResult, CommandError> {
        match self {
            Command::Add(cmd) => cmd.execute(model),
            Command::Edit(cmd) => cmd.execute(model),
            Command::Schedule(cmd) => cmd.execute(model),
            Command::Mark(cmd) => cmd.execute(model),
            Command::Delete(cmd) => cmd.execute(model),
            Command::Find(cmd) => cmd.execute(model),
            Command::List(cmd) => cmd.execute(model),
            Command::Clear(cmd) => cmd.execute(model),
            Command::Undo(cmd) => cmd.execute(model),
            Command::Redo(cmd) => cmd.execute(model),
            Command::Sync(cmd) => cmd.execute(model),
            Command::Help => Ok(CommandResult::with_payload(help_text(), Payload::ShowHelp)),
            Command::Exit => Ok(CommandResult::with_payload(EXIT_ACKNOWLEDGEMENT, Payload::Exit)),
        }
    }

    /// Whether a successful run may have changed the stored task list.
    pub fn mutates_tasks(&self) -> bool {
        matches!(
            self,
            Command::Add(_)
                | Command::Edit(_)
                | Command::Schedule(_)
                | Command::Mark(_)
                | Command::Delete(_)
                | Command::Clear(_)
                | Command::Undo(_)
                | Command::Redo(_)
        )
    }
}
