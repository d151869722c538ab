//! Task log view model.

use chat_types::{Result, task::Task};
use crate::ports::ChatBackendPort;

/// What the task log shows. Never a stale list: a failed refresh replaces
/// whatever was there with [`TaskLogState::Failed`].
#[derive(Debug, Clone, Default, PartialEq)]
pub enum TaskLogState {
    #[default]
    NotLoaded,
    Loading,
    Empty,
    Loaded(Vec<Task>),
    Failed(String),
}

impl TaskLogState {
    pub fn from_result(result: Result<Vec<Task>>) -> Self {
        match result {
            Ok(tasks) if tasks.is_empty() => TaskLogState::Empty,
            Ok(tasks) => TaskLogState::Loaded(tasks),
            Err(e) => TaskLogState::Failed(format!("Failed to load tasks: {}", e)),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, TaskLogState::Loading)
    }
}

/// Fetch one uncached snapshot of the task list.
pub async fn fetch_snapshot(backend: &dyn ChatBackendPort) -> TaskLogState {
    let result = backend.fetch_tasks().await;
    if let Err(e) = &result {
        log::warn!("Task fetch failed: {}", e);
    }
    TaskLogState::from_result(result)
}
