use thiserror::Error;

/// A supplied field value broke its domain rule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid {field}: {message}")]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        FieldError {
            field,
            message: message.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid command format!\n{usage}")]
    InvalidFormat { usage: &'static str },

    #[error("Unknown command '{word}'{}", did_you_mean(.suggestion))]
    UnknownCommand {
        word: String,
        suggestion: Option<&'static str>,
    },

    #[error(transparent)]
    Field(#[from] FieldError),
}

fn did_you_mean(suggestion: &Option<&'static str>) -> String {
    match suggestion {
        Some(word) => format!(". Did you mean '{}'?", word),
        None => String::new(),
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("The task index provided is invalid")]
    InvalidIndex,

    #[error("This task already exists in the task manager")]
    DuplicateTask,

    #[error("At least one field to edit must be provided.")]
    NotEdited,

    #[error("No more commands to undo")]
    NothingToUndo,

    #[error("No more commands to redo")]
    NothingToRedo,
}

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Sync service unavailable: {0}")]
    Unavailable(String),

    #[error("Sync service rejected the request with status {status}")]
    Rejected { status: u16 },
}

/// Everything that can go wrong while handling one line of user input.
#[derive(Error, Debug)]
pub enum OpusError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("Could not save tasks: {0:#}")]
    Storage(#[source] anyhow::Error),
}
