use crate::commands::CommandResult;
use crate::error::OpusError;
use crate::model::ModelManager;
use crate::parser::parse_command;
use crate::storage::Storage;
use crate::task::Task;

/// Entry point for any front end: one line in, one result out.
pub struct LogicManager {
    model: ModelManager,
    storage: Storage,
}

impl LogicManager {
    pub fn new(model: ModelManager, storage: Storage) -> Self {
        LogicManager { model, storage }
    }

    /// Parses and runs `line`. A rejected command leaves the task list as it
    /// was; a successful change is written to storage before returning. If
    /// the write fails the change is taken back and the storage error returned.
    pub fn execute(&mut self, line: &str) -> Result<CommandResult, OpusError> {
        log::debug!("Executing command: {}", line.trim());
        let command = parse_command(line)?;
        let checkpoint = command.mutates_tasks().then(|| self.model.checkpoint());
        let result = command.execute(&mut self.model)?;

        if let Some(checkpoint) = checkpoint {
            if let Err(e) = self.storage.save_tasks(self.model.tasks()) {
                log::warn!("Reverting '{}': {:#}", line.trim(), e);
                self.model.restore(checkpoint);
                return Err(OpusError::Storage(e));
            }
        }
        Ok(result)
    }

    pub fn filtered_tasks(&self) -> Vec<&Task> {
        self.model.filtered_tasks()
    }

    pub fn model(&self) -> &ModelManager {
        &self.model
    }

    /// Releases the sync connection, if one is open.
    pub fn shutdown(&mut self) {
        self.model.sync_mut().stop_sync();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CommandError, ParseError};

    fn logic() -> LogicManager {
        LogicManager::new(ModelManager::default(), Storage::in_memory().unwrap())
    }

    #[test]
    fn successful_change_is_saved() {
        let mut logic = logic();
        logic.execute("add Buy milk").unwrap();
        assert_eq!(logic.storage.load_tasks().unwrap().len(), 1);
    }

    #[test]
    fn errors_surface_with_their_kind() {
        let mut logic = logic();
        assert!(matches!(
            logic.execute("delete x"),
            Err(OpusError::Parse(ParseError::InvalidFormat { .. }))
        ));
        assert!(matches!(
            logic.execute("delete 1"),
            Err(OpusError::Command(CommandError::InvalidIndex))
        ));
    }

    #[test]
    fn failed_save_leaves_model_unchanged() {
        let mut logic = logic();
        logic.storage.set_read_only(true);

        for _ in 0..2 {
            let err = logic.execute("add Buy milk").unwrap_err();
            assert!(matches!(err, OpusError::Storage(_)));
            assert!(logic.model().tasks().is_empty());
        }
        assert!(matches!(
            logic.execute("undo"),
            Err(OpusError::Command(CommandError::NothingToUndo))
        ));
    }

    #[test]
    fn failed_save_keeps_history_in_step() {
        let mut logic = logic();
        logic.execute("add Buy milk").unwrap();

        logic.storage.set_read_only(true);
        assert!(matches!(logic.execute("undo"), Err(OpusError::Storage(_))));
        assert_eq!(logic.model().tasks().len(), 1);

        logic.storage.set_read_only(false);
        logic.execute("undo").unwrap();
        assert!(logic.model().tasks().is_empty());
        assert!(logic.storage.load_tasks().unwrap().is_empty());
        logic.execute("redo").unwrap();
        assert_eq!(logic.storage.load_tasks().unwrap().len(), 1);
    }
}
