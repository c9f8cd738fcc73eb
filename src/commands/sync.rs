use super::CommandResult;
use crate::error::CommandError;
use crate::model::ModelManager;

pub const SYNC_USAGE: &str = "sync: Starts or stops mirroring tasks to the sync service.\n\
Parameters: on|off\n\
Example: sync on";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncToggle {
    On,
    Off,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SyncCommand {
    toggle: SyncToggle,
}

impl SyncCommand {
    pub fn new(toggle: SyncToggle) -> Self {
        SyncCommand { toggle }
    }

    /// Never fails: an unreachable service only changes the message.
    pub fn execute(self, model: &mut ModelManager) -> Result<CommandResult, CommandError> {
        let feedback = match self.toggle {
            SyncToggle::On => match model.sync_mut().start_sync() {
                Ok(()) => {
                    let tasks = model.tasks().to_vec();
                    if let Err(e) = model.sync_mut().update_task_list(&tasks) {
                        log::warn!("Initial sync push failed: {}", e);
                    }
                    "Sync started".to_string()
                }
                Err(e) => {
                    log::warn!("Could not start sync: {}", e);
                    format!("Sync not started: {}", e)
                }
            },
            SyncToggle::Off => {
                model.sync_mut().stop_sync();
                "Sync stopped".to_string()
            }
        };
        Ok(CommandResult::new(feedback))
    }
}
