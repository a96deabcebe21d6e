/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/

//! Client for the Octoparse API
//!
//! The client handles authentication internally: every call first asks
//! [`Auth`] for a valid access token, logging in or refreshing as needed.
//!
//! # Example
//! ```ignore
//! use octoparse_client::prelude::*;
//!
//! let client = Client::new(Config::new()).await?;
//! let groups = client.list_task_groups().await?;
//! let rows = client.fetch_all_data("task-id", 1000, 0).await?;
//! ```

use crate::application::auth::Auth;
use crate::application::config::Config;
use crate::application::interfaces::data::DataService;
use crate::application::interfaces::task::TaskService;
use crate::application::pagination::{DataPager, PageCursor, PageSource};
use crate::application::provider::{
    CredentialProvider, PromptCredentialProvider, StaticCredentialProvider,
};
use crate::error::AppError;
use crate::model::http::{build_http_client, get_request, post_request};
use crate::model::responses::{
    ApiResponse, DataPage, DataRow, NotExportedData, Task, TaskGroup, decode_or_default,
    decode_required,
};
use crate::storage::{CredentialStore, FileCredentialStore};
use async_trait::async_trait;
use reqwest::Client as HttpInternalClient;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Query parameters of a request
type Params<'a> = [(&'a str, String)];

/// Client for the Octoparse API with automatic authentication
pub struct Client {
    auth: Arc<Auth>,
    http_client: HttpInternalClient,
    config: Arc<Config>,
}

impl Client {
    /// Creates a new client and makes sure it holds a valid access token
    ///
    /// Credentials come from the configuration when present, otherwise they
    /// are prompted for. The credential is persisted to `config.token_file`.
    ///
    /// # Errors
    /// `AppError::Auth` if no valid credential can be obtained
    pub async fn new(config: Config) -> Result<Self, AppError> {
        let client = Self::new_lazy(config)?;
        client.auth.get_valid_access_token().await?;
        Ok(client)
    }

    /// Creates a new client without contacting the server
    ///
    /// Authentication happens on the first request.
    pub fn new_lazy(config: Config) -> Result<Self, AppError> {
        let provider: Arc<dyn CredentialProvider> = match config.credentials.clone() {
            Some(credentials) => Arc::new(StaticCredentialProvider::new(credentials)),
            None => Arc::new(PromptCredentialProvider),
        };
        let store = Arc::new(FileCredentialStore::new(config.token_file.clone()));
        Self::with_parts(config, provider, store)
    }

    /// Creates a new client from explicit collaborators, without contacting the server
    ///
    /// # Arguments
    /// * `config` - Base URL, timeout and page size
    /// * `provider` - Source of username/password for logins
    /// * `store` - Durable storage for the credential
    pub fn with_parts(
        config: Config,
        provider: Arc<dyn CredentialProvider>,
        store: Arc<dyn CredentialStore>,
    ) -> Result<Self, AppError> {
        let config = Arc::new(config);
        let http_client = build_http_client(config.rest_api.timeout)?;
        let auth = Arc::new(Auth::new(config.clone(), provider, store)?);
        Ok(Self {
            auth,
            http_client,
            config,
        })
    }

    /// Gets Auth reference
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// Gets the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Creates a lazy pager over the data of a task
    ///
    /// # Errors
    /// `AppError::InvalidInput` for an empty task id or a page size outside `1..=1000`
    pub fn data_pager(
        &self,
        task_id: &str,
        page_size: u32,
        start_offset: u64,
    ) -> Result<DataPager<'_, Self>, AppError> {
        let cursor = PageCursor::new(task_id, start_offset, page_size)?;
        Ok(DataPager::new(self, cursor))
    }

    /// Makes an authenticated GET request to a relative path
    pub async fn get(&self, path: &str, params: &Params<'_>) -> Result<Value, AppError> {
        let token = self.auth.get_valid_access_token().await?;
        let url = self.config.url(path);
        get_request(&self.http_client, &url, &token, Some(params)).await
    }

    /// Makes an authenticated POST request to a relative path, parameters in the query string
    pub async fn post(&self, path: &str, params: &Params<'_>) -> Result<Value, AppError> {
        let token = self.auth.get_valid_access_token().await?;
        let url = self.config.url(path);
        post_request(
            &self.http_client,
            &url,
            &token,
            Some(params),
            None::<&Params<'_>>,
        )
        .await
    }
}

#[async_trait]
impl PageSource for Client {
    async fn fetch_page_at(&self, cursor: &PageCursor) -> Result<DataPage, AppError> {
        let params = [
            ("taskId", cursor.task_id.clone()),
            ("offset", cursor.offset.to_string()),
            ("size", cursor.page_size.to_string()),
        ];
        let value = self
            .get("api/alldata/GetDataOfTaskByOffset", &params)
            .await?;
        let page = decode_required::<DataPage>(value)?.data;
        debug!(
            "Task {} page: offset {}, total {}, restTotal {}, {} rows",
            cursor.task_id,
            page.offset,
            page.total,
            page.rest_total,
            page.data_list.len()
        );
        Ok(page)
    }
}

#[async_trait]
impl DataService for Client {
    async fn fetch_all_data(
        &self,
        task_id: &str,
        page_size: u32,
        start_offset: u64,
    ) -> Result<Vec<DataRow>, AppError> {
        info!("Fetching all data of task {}", task_id);
        let mut pager = self.data_pager(task_id, page_size, start_offset)?;
        let rows = pager.collect_rows().await?;
        info!(
            "Fetched {} rows of task {} in {} requests",
            rows.len(),
            task_id,
            pager.pages_fetched()
        );
        Ok(rows)
    }

    async fn fetch_data_page(
        &self,
        task_id: &str,
        offset: u64,
        size: u32,
    ) -> Result<DataPage, AppError> {
        let cursor = PageCursor::new(task_id, offset, size)?;
        self.fetch_page_at(&cursor).await
    }

    async fn fetch_page(
        &self,
        task_id: &str,
        offset: u64,
        size: u32,
    ) -> Result<Vec<DataRow>, AppError> {
        let page = DataService::fetch_data_page(self, task_id, offset, size).await?;
        Ok(page.data_list)
    }

    async fn get_not_exported_data(
        &self,
        task_id: &str,
        size: u32,
    ) -> Result<NotExportedData, AppError> {
        // Validates the task id and size the same way as the offset endpoint
        PageCursor::new(task_id, 0, size)?;
        let params = [("taskId", task_id.to_string()), ("size", size.to_string())];
        let value = self.get("api/notexportdata/gettop", &params).await?;
        let data = decode_required::<NotExportedData>(value)?.data;
        debug!(
            "Task {}: {} of {} not exported rows returned",
            task_id, data.current_total, data.total
        );
        Ok(data)
    }

    async fn mark_data_exported(&self, task_id: &str) -> Result<ApiResponse<Value>, AppError> {
        info!("Marking data of task {} as exported", task_id);
        let value = self
            .post("api/notexportdata/update", &[("taskId", task_id.to_string())])
            .await?;
        decode_or_default(value)
    }

    async fn clear_task_data(&self, task_id: &str) -> Result<ApiResponse<Value>, AppError> {
        info!("Clearing data of task {}", task_id);
        let value = self
            .post("api/task/removeDataByTaskId", &[("taskId", task_id.to_string())])
            .await?;
        decode_or_default(value)
    }

    async fn poll_task_activity(
        &self,
        task_id: &str,
        sample_size: u32,
        interval: Duration,
    ) -> Result<bool, AppError> {
        let first = DataService::fetch_data_page(self, task_id, 0, sample_size)
            .await?
            .total;
        tokio::time::sleep(interval).await;
        let second = DataService::fetch_data_page(self, task_id, 0, sample_size)
            .await?
            .total;
        debug!(
            "Task {} total went from {} to {} in {:?}",
            task_id, first, second, interval
        );
        Ok(first != second)
    }
}

#[async_trait]
impl TaskService for Client {
    async fn list_task_groups(&self) -> Result<ApiResponse<Vec<TaskGroup>>, AppError> {
        let value = self.get("api/TaskGroup", &[]).await?;
        let response: ApiResponse<Vec<TaskGroup>> = decode_or_default(value)?;
        debug!("Task groups obtained: {} groups", response.data.len());
        Ok(response)
    }

    async fn list_tasks_in_group(
        &self,
        group_id: i64,
    ) -> Result<ApiResponse<Vec<Task>>, AppError> {
        let value = self
            .get("api/Task", &[("taskGroupId", group_id.to_string())])
            .await?;
        let response: ApiResponse<Vec<Task>> = decode_or_default(value)?;
        debug!(
            "Tasks obtained for group {}: {} tasks",
            group_id,
            response.data.len()
        );
        Ok(response)
    }

    async fn start_task(&self, task_id: &str) -> Result<ApiResponse<Value>, AppError> {
        info!("Starting task {}", task_id);
        let value = self
            .post("api/task/StartTask", &[("taskId", task_id.to_string())])
            .await?;
        decode_or_default(value)
    }

    async fn stop_task(&self, task_id: &str) -> Result<ApiResponse<Value>, AppError> {
        info!("Stopping task {}", task_id);
        let value = self
            .post("api/task/StopTask", &[("taskId", task_id.to_string())])
            .await?;
        decode_or_default(value)
    }

    async fn get_task_rule_property(
        &self,
        task_id: &str,
        name: &str,
    ) -> Result<ApiResponse<Value>, AppError> {
        let params = [("taskId", task_id.to_string()), ("name", name.to_string())];
        let value = self
            .get("api/task/GetTaskRulePropertyByName", &params)
            .await?;
        decode_or_default(value)
    }

    async fn set_task_rule_property(
        &self,
        task_id: &str,
        name: &str,
        value: &str,
    ) -> Result<ApiResponse<Value>, AppError> {
        info!("Updating rule property {} of task {}", name, task_id);
        let params = [
            ("taskId", task_id.to_string()),
            ("name", name.to_string()),
            ("value", value.to_string()),
        ];
        let value = self.post("api/task/updateTaskRule", &params).await?;
        decode_or_default(value)
    }
}
