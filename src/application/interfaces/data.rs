use crate::error::AppError;
use crate::model::responses::{ApiResponse, DataPage, DataRow, NotExportedData};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// Interface for the data service
#[async_trait]
pub trait DataService: Send + Sync {
    /// Fetches every row of a task, following `restTotal` until it reaches zero
    ///
    /// # Arguments
    /// * `task_id` - Task whose data is fetched
    /// * `page_size` - Rows per request, 1 to 1000
    /// * `start_offset` - Offset of the first request
    ///
    /// # Returns
    /// All rows in server order. If any page fails the rows gathered so far
    /// are dropped and the error is returned.
    async fn fetch_all_data(
        &self,
        task_id: &str,
        page_size: u32,
        start_offset: u64,
    ) -> Result<Vec<DataRow>, AppError>;

    /// Fetches one page of task data, keeping the pagination fields
    async fn fetch_data_page(
        &self,
        task_id: &str,
        offset: u64,
        size: u32,
    ) -> Result<DataPage, AppError>;

    /// Fetches the rows of one page of task data
    async fn fetch_page(
        &self,
        task_id: &str,
        offset: u64,
        size: u32,
    ) -> Result<Vec<DataRow>, AppError>;

    /// Gets up to `size` rows not yet marked as exported
    ///
    /// Fetching does not mark them: call [`DataService::mark_data_exported`] afterwards.
    async fn get_not_exported_data(
        &self,
        task_id: &str,
        size: u32,
    ) -> Result<NotExportedData, AppError>;

    /// Marks the rows previously returned by `get_not_exported_data` as exported
    async fn mark_data_exported(&self, task_id: &str) -> Result<ApiResponse<Value>, AppError>;

    /// Removes all data of a task
    async fn clear_task_data(&self, task_id: &str) -> Result<ApiResponse<Value>, AppError>;

    /// Guesses whether a task is producing rows
    ///
    /// Reads the row total twice, `interval` apart, and reports whether it
    /// changed. This is a best-effort heuristic: a running task that adds no
    /// row during the window reads as idle.
    async fn poll_task_activity(
        &self,
        task_id: &str,
        sample_size: u32,
        interval: Duration,
    ) -> Result<bool, AppError>;
}
