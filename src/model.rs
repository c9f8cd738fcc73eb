use crate::commands::Index;
use crate::error::CommandError;
use crate::sync::{NoSync, TaskSync};
use crate::task::Task;
use std::collections::VecDeque;

/// Oldest snapshots beyond this many are forgotten.
pub const HISTORY_LIMIT: usize = 100;

/// Tasks in display order. No two entries are equal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    /// Builds a list from stored records, dropping repeats of an earlier task.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let mut list = TaskList::default();
        for task in tasks {
            if list.contains(&task) {
                log::warn!("Skipping duplicate stored task '{}'", task.name);
                continue;
            }
            list.tasks.push(task);
        }
        list
    }

    pub fn contains(&self, task: &Task) -> bool {
        self.tasks.iter().any(|t| t == task)
    }

    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn push(&mut self, task: Task) -> Result<(), CommandError> {
        if self.contains(&task) {
            return Err(CommandError::DuplicateTask);
        }
        self.tasks.push(task);
        Ok(())
    }

    fn replace(&mut self, position: usize, edited: Task) -> Result<(), CommandError> {
        if position >= self.tasks.len() {
            return Err(CommandError::InvalidIndex);
        }
        let clashes = self
            .tasks
            .iter()
            .enumerate()
            .any(|(i, t)| i != position && *t == edited);
        if clashes {
            return Err(CommandError::DuplicateTask);
        }
        self.tasks[position] = edited;
        Ok(())
    }

    fn remove(&mut self, position: usize) -> Result<Task, CommandError> {
        if position >= self.tasks.len() {
            return Err(CommandError::InvalidIndex);
        }
        Ok(self.tasks.remove(position))
    }
}

/// Which tasks the user currently sees.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TaskFilter {
    #[default]
    All,
    /// Any keyword equal (ignoring case) to a word of the task name.
    Keywords(Vec<String>),
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Keywords(keywords) => task.name.as_str().split_whitespace().any(|word| {
                let word = word.to_lowercase();
                keywords
                    .iter()
                    .any(|keyword| keyword.to_lowercase() == word)
            }),
        }
    }
}

/// Model state taken before a command runs, see [`ModelManager::restore`].
#[derive(Debug, Clone)]
pub struct Checkpoint {
    tasks: TaskList,
    filter: TaskFilter,
    undo_stack: VecDeque<TaskList>,
    redo_stack: Vec<TaskList>,
}

/// Sole owner of the live task list. All mutation goes through here so the
/// undo history and the sync service always see every change.
pub struct ModelManager {
    tasks: TaskList,
    filter: TaskFilter,
    undo_stack: VecDeque<TaskList>,
    redo_stack: Vec<TaskList>,
    sync: Box<dyn TaskSync>,
}

impl Default for ModelManager {
    fn default() -> Self {
        ModelManager::new(Vec::new(), Box::new(NoSync))
    }
}

impl ModelManager {
    pub fn new(tasks: Vec<Task>, sync: Box<dyn TaskSync>) -> Self {
        ModelManager {
            tasks: TaskList::from_tasks(tasks),
            filter: TaskFilter::All,
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            sync,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        self.tasks.as_slice()
    }

    pub fn filtered_tasks(&self) -> Vec<&Task> {
        self.tasks
            .as_slice()
            .iter()
            .filter(|task| self.filter.matches(task))
            .collect()
    }

    /// Maps a position in the filtered view to a position in the full list.
    pub fn resolve_index(&self, index: Index) -> Result<usize, CommandError> {
        self.tasks
            .as_slice()
            .iter()
            .enumerate()
            .filter(|(_, task)| self.filter.matches(task))
            .nth(index.zero_based())
            .map(|(position, _)| position)
            .ok_or(CommandError::InvalidIndex)
    }

    pub fn task_at(&self, position: usize) -> Option<&Task> {
        self.tasks.as_slice().get(position)
    }

    pub fn filter(&self) -> &TaskFilter {
        &self.filter
    }

    pub fn show_all(&mut self) {
        self.filter = TaskFilter::All;
    }

    pub fn filter_by_keywords(&mut self, keywords: Vec<String>) {
        self.filter = TaskFilter::Keywords(keywords);
    }

    pub fn add_task(&mut self, task: Task) -> Result<(), CommandError> {
        let mut next = self.tasks.clone();
        next.push(task.clone())?;
        self.commit(next);
        self.notify("add", |sync| sync.add_task(&task));
        Ok(())
    }

    pub fn update_task(&mut self, position: usize, edited: Task) -> Result<(), CommandError> {
        let mut next = self.tasks.clone();
        next.replace(position, edited.clone())?;
        self.commit(next);
        self.notify("update", |sync| sync.update_task(&edited));
        Ok(())
    }

    pub fn delete_task(&mut self, position: usize) -> Result<Task, CommandError> {
        let mut next = self.tasks.clone();
        let removed = next.remove(position)?;
        self.commit(next);
        self.notify("delete", |sync| sync.delete_task(&removed));
        Ok(removed)
    }

    pub fn reset_data(&mut self, tasks: Vec<Task>) {
        self.commit(TaskList::from_tasks(tasks));
        self.push_whole_list();
    }

    pub fn undo(&mut self) -> Result<(), CommandError> {
        let previous = self.undo_stack.pop_back().ok_or(CommandError::NothingToUndo)?;
        let current = std::mem::replace(&mut self.tasks, previous);
        self.redo_stack.push(current);
        self.push_whole_list();
        Ok(())
    }

    pub fn redo(&mut self) -> Result<(), CommandError> {
        let next = self.redo_stack.pop().ok_or(CommandError::NothingToRedo)?;
        let current = std::mem::replace(&mut self.tasks, next);
        self.push_history(current);
        self.push_whole_list();
        Ok(())
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            tasks: self.tasks.clone(),
            filter: self.filter.clone(),
            undo_stack: self.undo_stack.clone(),
            redo_stack: self.redo_stack.clone(),
        }
    }

    /// Puts the model back to `checkpoint`, history included. Sync gets the
    /// restored list when the tasks differ from the current ones.
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        let changed = self.tasks != checkpoint.tasks;
        self.tasks = checkpoint.tasks;
        self.filter = checkpoint.filter;
        self.undo_stack = checkpoint.undo_stack;
        self.redo_stack = checkpoint.redo_stack;
        if changed {
            self.push_whole_list();
        }
    }

    pub fn sync_mut(&mut self) -> &mut dyn TaskSync {
        self.sync.as_mut()
    }

    fn commit(&mut self, next: TaskList) {
        let previous = std::mem::replace(&mut self.tasks, next);
        self.push_history(previous);
        self.redo_stack.clear();
    }

    fn push_history(&mut self, snapshot: TaskList) {
        self.undo_stack.push_back(snapshot);
        if self.undo_stack.len() > HISTORY_LIMIT {
            self.undo_stack.pop_front();
        }
    }

    fn push_whole_list(&mut self) {
        let tasks = self.tasks.as_slice().to_vec();
        self.notify("update list", |sync| sync.update_task_list(&tasks));
    }

    // Local state is already committed; a sync failure is only reported.
    fn notify<F>(&mut self, action: &str, send: F)
    where
        F: FnOnce(&mut dyn TaskSync) -> Result<(), crate::error::SyncError>,
    {
        if let Err(e) = send(self.sync.as_mut()) {
            log::warn!("Sync {} failed: {}", action, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::tests::RecordingService;
    use crate::sync::SyncManager;
    use crate::task::{Name, Priority};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn task(name: &str) -> Task {
        Task::new(Name::new(name).unwrap())
    }

    #[test]
    fn add_rejects_duplicates_without_mutation() {
        let mut model = ModelManager::default();
        model.add_task(task("Buy milk")).unwrap();
        assert_eq!(model.add_task(task("Buy milk")), Err(CommandError::DuplicateTask));
        assert_eq!(model.tasks().len(), 1);
    }

    #[test]
    fn same_name_with_other_fields_is_not_a_duplicate() {
        let mut model = ModelManager::default();
        model.add_task(task("Buy milk")).unwrap();
        let mut urgent = task("Buy milk");
        urgent.priority = Priority::High;
        model.add_task(urgent).unwrap();
        assert_eq!(model.tasks().len(), 2);
    }

    #[test]
    fn filtered_index_maps_to_underlying_position() {
        let mut model = ModelManager::new(
            vec![task("Pay rent"), task("Call Elle"), task("Buy milk"), task("Email elle")],
            Box::new(NoSync),
        );
        model.filter_by_keywords(vec!["ELLE".to_string()]);
        let names: Vec<&str> = model.filtered_tasks().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Call Elle", "Email elle"]);

        assert_eq!(model.resolve_index(Index::from_one_based(2).unwrap()), Ok(3));
        assert_eq!(
            model.resolve_index(Index::from_one_based(3).unwrap()),
            Err(CommandError::InvalidIndex)
        );
    }

    #[test]
    fn update_rejects_clash_with_other_task() {
        let mut model = ModelManager::new(vec![task("A"), task("B")], Box::new(NoSync));
        assert_eq!(model.update_task(1, task("A")), Err(CommandError::DuplicateTask));
        // Replacing a task with itself is fine.
        model.update_task(0, task("A")).unwrap();
    }

    #[test]
    fn undo_and_redo_walk_history() {
        let mut model = ModelManager::default();
        assert_eq!(model.undo(), Err(CommandError::NothingToUndo));

        model.add_task(task("First")).unwrap();
        model.add_task(task("Second")).unwrap();
        model.undo().unwrap();
        assert_eq!(model.tasks(), &[task("First")]);
        model.redo().unwrap();
        assert_eq!(model.tasks().len(), 2);
        assert_eq!(model.redo(), Err(CommandError::NothingToRedo));

        model.undo().unwrap();
        model.delete_task(0).unwrap();
        // A new change discards the redo branch.
        assert_eq!(model.redo(), Err(CommandError::NothingToRedo));
    }

    #[test]
    fn keywords_ignore_case_beyond_ascii() {
        let mut model =
            ModelManager::new(vec![task("Élan vital"), task("Straße fegen")], Box::new(NoSync));
        model.filter_by_keywords(vec!["élan".to_string()]);
        assert_eq!(model.filtered_tasks(), vec![&task("Élan vital")]);
        model.filter_by_keywords(vec!["STRAßE".to_string()]);
        assert_eq!(model.filtered_tasks(), vec![&task("Straße fegen")]);
    }

    #[test]
    fn history_keeps_only_the_latest_snapshots() {
        let mut model = ModelManager::default();
        for i in 0..HISTORY_LIMIT + 5 {
            model.add_task(task(&format!("Task {}", i))).unwrap();
        }
        for _ in 0..HISTORY_LIMIT {
            model.undo().unwrap();
        }
        assert_eq!(model.undo(), Err(CommandError::NothingToUndo));
        assert_eq!(model.tasks().len(), 5);
    }

    #[test]
    fn restore_rewinds_changes_and_history() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut sync = SyncManager::new(Box::new(RecordingService {
            calls: calls.clone(),
            fail_calls: false,
        }));
        sync.start_sync().unwrap();
        let mut model = ModelManager::new(vec![task("A")], Box::new(sync));
        model.add_task(task("B")).unwrap();
        model.undo().unwrap();
        model.filter_by_keywords(vec!["a".to_string()]);

        let checkpoint = model.checkpoint();
        model.add_task(task("C")).unwrap();
        model.restore(checkpoint);

        assert_eq!(model.tasks(), &[task("A")]);
        assert_eq!(model.filter(), &TaskFilter::Keywords(vec!["a".to_string()]));
        // The redo branch dropped by the add is back.
        model.redo().unwrap();
        assert_eq!(model.tasks(), &[task("A"), task("B")]);
        assert_eq!(
            *calls.borrow(),
            vec!["start", "add B", "list 1", "add C", "list 1", "list 2"]
        );
    }

    #[test]
    fn restore_without_changes_stays_quiet() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut sync = SyncManager::new(Box::new(RecordingService {
            calls: calls.clone(),
            fail_calls: false,
        }));
        sync.start_sync().unwrap();
        let mut model = ModelManager::new(vec![task("A")], Box::new(sync));

        let checkpoint = model.checkpoint();
        model.restore(checkpoint);
        assert_eq!(*calls.borrow(), vec!["start"]);
    }

    #[test]
    fn loading_drops_duplicate_records() {
        let list = TaskList::from_tasks(vec![task("A"), task("A"), task("B")]);
        assert_eq!(list.len(), 2);
    }
}
