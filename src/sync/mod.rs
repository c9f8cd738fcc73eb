//! Mirroring of local task changes to an external service.
//!
//! [`TaskSync`] is what the model talks to. [`SyncService`] is the contract
//! for the external side; [`SyncManager`] glues the two together and owns no
//! task state of its own.

mod http;

pub use http::HttpSyncService;

use crate::error::SyncError;
use crate::task::Task;

pub trait TaskSync {
    fn add_task(&mut self, task: &Task) -> Result<(), SyncError>;
    fn delete_task(&mut self, task: &Task) -> Result<(), SyncError>;
    fn update_task(&mut self, task: &Task) -> Result<(), SyncError>;
    fn update_task_list(&mut self, tasks: &[Task]) -> Result<(), SyncError>;
    /// Tasks offered by the remote side. `None` means nothing to offer yet,
    /// which is not an error.
    fn get_task_list_from_sync(&self) -> Option<Vec<Task>>;
    fn start_sync(&mut self) -> Result<(), SyncError>;
    fn stop_sync(&mut self);
    fn is_running(&self) -> bool;
}

/// The external collaborator. `start` acquires whatever connection the
/// service needs and `stop` releases it.
pub trait SyncService {
    fn start(&mut self) -> Result<(), SyncError>;
    fn stop(&mut self) -> Result<(), SyncError>;
    fn add_task(&mut self, task: &Task) -> Result<(), SyncError>;
    fn delete_task(&mut self, task: &Task) -> Result<(), SyncError>;
    fn update_task(&mut self, task: &Task) -> Result<(), SyncError>;
    fn update_task_list(&mut self, tasks: &[Task]) -> Result<(), SyncError>;
}

/// Used when no sync service is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSync;

impl TaskSync for NoSync {
    fn add_task(&mut self, _task: &Task) -> Result<(), SyncError> {
        Ok(())
    }

    fn delete_task(&mut self, _task: &Task) -> Result<(), SyncError> {
        Ok(())
    }

    fn update_task(&mut self, _task: &Task) -> Result<(), SyncError> {
        Ok(())
    }

    fn update_task_list(&mut self, _tasks: &[Task]) -> Result<(), SyncError> {
        Ok(())
    }

    fn get_task_list_from_sync(&self) -> Option<Vec<Task>> {
        None
    }

    fn start_sync(&mut self) -> Result<(), SyncError> {
        Err(SyncError::Unavailable(
            "no sync service configured (set OPUS_SYNC_URL)".to_string(),
        ))
    }

    fn stop_sync(&mut self) {}

    fn is_running(&self) -> bool {
        false
    }
}

/// Forwards every change to a [`SyncService`] while started. Changes made
/// while stopped are not queued.
pub struct SyncManager {
    service: Box<dyn SyncService>,
    running: bool,
}

impl SyncManager {
    pub fn new(service: Box<dyn SyncService>) -> Self {
        SyncManager {
            service,
            running: false,
        }
    }

    fn forward<F>(&mut self, send: F) -> Result<(), SyncError>
    where
        F: FnOnce(&mut dyn SyncService) -> Result<(), SyncError>,
    {
        if !self.running {
            return Ok(());
        }
        send(self.service.as_mut())
    }
}

impl TaskSync for SyncManager {
    fn add_task(&mut self, task: &Task) -> Result<(), SyncError> {
        self.forward(|service| service.add_task(task))
    }

    fn delete_task(&mut self, task: &Task) -> Result<(), SyncError> {
        self.forward(|service| service.delete_task(task))
    }

    fn update_task(&mut self, task: &Task) -> Result<(), SyncError> {
        self.forward(|service| service.update_task(task))
    }

    fn update_task_list(&mut self, tasks: &[Task]) -> Result<(), SyncError> {
        self.forward(|service| service.update_task_list(tasks))
    }

    // Push-only for now.
    fn get_task_list_from_sync(&self) -> Option<Vec<Task>> {
        None
    }

    fn start_sync(&mut self) -> Result<(), SyncError> {
        if self.running {
            return Ok(());
        }
        self.service.start()?;
        self.running = true;
        log::info!("Sync started");
        Ok(())
    }

    fn stop_sync(&mut self) {
        if !self.running {
            return;
        }
        if let Err(e) = self.service.stop() {
            log::warn!("Sync service did not stop cleanly: {}", e);
        }
        self.running = false;
        log::info!("Sync stopped");
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::task::Name;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every call it receives into a shared log.
    #[derive(Default)]
    pub(crate) struct RecordingService {
        pub calls: Rc<RefCell<Vec<String>>>,
        pub fail_calls: bool,
    }

    impl RecordingService {
        fn record(&self, call: String) -> Result<(), SyncError> {
            self.calls.borrow_mut().push(call);
            if self.fail_calls {
                Err(SyncError::Unavailable("offline".to_string()))
            } else {
                Ok(())
            }
        }
    }

    impl SyncService for RecordingService {
        fn start(&mut self) -> Result<(), SyncError> {
            self.calls.borrow_mut().push("start".to_string());
            Ok(())
        }

        fn stop(&mut self) -> Result<(), SyncError> {
            self.calls.borrow_mut().push("stop".to_string());
            Ok(())
        }

        fn add_task(&mut self, task: &Task) -> Result<(), SyncError> {
            self.record(format!("add {}", task.name))
        }

        fn delete_task(&mut self, task: &Task) -> Result<(), SyncError> {
            self.record(format!("delete {}", task.name))
        }

        fn update_task(&mut self, task: &Task) -> Result<(), SyncError> {
            self.record(format!("update {}", task.name))
        }

        fn update_task_list(&mut self, tasks: &[Task]) -> Result<(), SyncError> {
            self.record(format!("list {}", tasks.len()))
        }
    }

    fn task(name: &str) -> Task {
        Task::new(Name::new(name).unwrap())
    }

    #[test]
    fn forwards_only_while_running() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut manager = SyncManager::new(Box::new(RecordingService {
            calls: calls.clone(),
            fail_calls: false,
        }));

        manager.add_task(&task("ignored")).unwrap();
        manager.start_sync().unwrap();
        manager.start_sync().unwrap();
        manager.add_task(&task("A")).unwrap();
        manager.update_task_list(&[task("A"), task("B")]).unwrap();
        manager.stop_sync();
        manager.delete_task(&task("A")).unwrap();

        assert_eq!(*calls.borrow(), vec!["start", "add A", "list 2", "stop"]);
        assert!(!manager.is_running());
    }

    #[test]
    fn pull_returns_no_data() {
        let manager = SyncManager::new(Box::new(RecordingService::default()));
        assert!(manager.get_task_list_from_sync().is_none());
        assert!(NoSync.get_task_list_from_sync().is_none());
    }

    #[test]
    fn no_sync_refuses_to_start() {
        let mut sync = NoSync;
        assert!(matches!(sync.start_sync(), Err(SyncError::Unavailable(_))));
        assert!(!sync.is_running());
    }
}
