use crate::error::AppError;
use crate::model::responses::{ApiResponse, Task, TaskGroup};
use async_trait::async_trait;
use serde_json::Value;

/// Interface for the task service
#[async_trait]
pub trait TaskService: Send + Sync {
    /// Lists the task groups of the account
    async fn list_task_groups(&self) -> Result<ApiResponse<Vec<TaskGroup>>, AppError>;

    /// Lists the tasks of a group
    async fn list_tasks_in_group(
        &self,
        group_id: i64,
    ) -> Result<ApiResponse<Vec<Task>>, AppError>;

    /// Starts a cloud run of the task (advanced API)
    async fn start_task(&self, task_id: &str) -> Result<ApiResponse<Value>, AppError>;

    /// Stops a cloud run of the task (advanced API)
    async fn stop_task(&self, task_id: &str) -> Result<ApiResponse<Value>, AppError>;

    /// Reads a rule property of a task, e.g. `navigateAction1.Url` (advanced API)
    async fn get_task_rule_property(
        &self,
        task_id: &str,
        name: &str,
    ) -> Result<ApiResponse<Value>, AppError>;

    /// Updates a rule property of a task (advanced API)
    async fn set_task_rule_property(
        &self,
        task_id: &str,
        name: &str,
        value: &str,
    ) -> Result<ApiResponse<Value>, AppError>;
}
