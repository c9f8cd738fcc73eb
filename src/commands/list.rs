use super::CommandResult;
use crate::error::CommandError;
use crate::model::ModelManager;

pub const LIST_USAGE: &str = "list: Lists all tasks.\nExample: list";
pub const CLEAR_USAGE: &str = "clear: Removes every task.\nExample: clear";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListCommand;

impl ListCommand {
    pub fn execute(self, model: &mut ModelManager) -> Result<CommandResult, CommandError> {
        model.show_all();
        Ok(CommandResult::new("Listed all tasks"))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClearCommand;

impl ClearCommand {
    pub fn execute(self, model: &mut ModelManager) -> Result<CommandResult, CommandError> {
        model.reset_data(Vec::new());
        model.show_all();
        Ok(CommandResult::new("Task manager has been cleared!"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskFilter;
    use crate::sync::NoSync;
    use crate::task::{Name, Task};

    #[test]
    fn list_resets_filter() {
        let mut model = ModelManager::default();
        model.filter_by_keywords(vec!["x".to_string()]);
        ListCommand.execute(&mut model).unwrap();
        assert_eq!(model.filter(), &TaskFilter::All);
    }

    #[test]
    fn clear_is_undoable() {
        let mut model = ModelManager::new(vec![Task::new(Name::new("A").unwrap())], Box::new(NoSync));
        ClearCommand.execute(&mut model).unwrap();
        assert!(model.tasks().is_empty());
        model.undo().unwrap();
        assert_eq!(model.tasks().len(), 1);
    }
}
