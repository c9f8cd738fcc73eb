use super::CommandResult;
use crate::error::CommandError;
use crate::model::ModelManager;

pub const FIND_USAGE: &str = "find: Finds all tasks whose names contain any of the specified keywords (case-insensitive).\n\
Parameters: KEYWORD [MORE_KEYWORDS]...\n\
Example: find milk report";

#[derive(Debug, Clone, PartialEq)]
pub struct FindCommand {
    keywords: Vec<String>,
}

impl FindCommand {
    pub fn new(keywords: Vec<String>) -> Self {
        FindCommand { keywords }
    }

    pub fn execute(self, model: &mut ModelManager) -> Result<CommandResult, CommandError> {
        model.filter_by_keywords(self.keywords);
        Ok(CommandResult::new(listed_overview(model.filtered_tasks().len())))
    }
}

pub(crate) fn listed_overview(count: usize) -> String {
    format!("{} tasks listed!", count)
}
