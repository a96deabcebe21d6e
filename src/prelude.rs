/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 15/10/26
******************************************************************************/

//! # Octoparse Client Prelude
//!
//! Commonly used types and traits in one import.
//!
//! ```rust
//! use octoparse_client::prelude::*;
//!
//! let config = Config::with_base_url("https://dataapi.octoparse.com");
//! assert_eq!(config.url("token"), "https://dataapi.octoparse.com/token");
//! ```

// ============================================================================
// CORE CONFIGURATION AND SETUP
// ============================================================================

pub use crate::application::config::{ApiTier, Config, Credentials, Region, RestApiConfig};
pub use crate::constants::*;
pub use crate::utils::logger::setup_logger;
pub use crate::{VERSION, version};

// ============================================================================
// ERROR HANDLING
// ============================================================================

pub use crate::error::{AppError, AuthError};

// ============================================================================
// AUTHENTICATION
// ============================================================================

pub use crate::application::auth::Auth;
pub use crate::application::provider::{
    CredentialProvider, PromptCredentialProvider, StaticCredentialProvider,
};
pub use crate::model::auth::{Credential, TokenResponse};
pub use crate::storage::{CredentialStore, FileCredentialStore, MemoryCredentialStore};

// ============================================================================
// CLIENT AND SERVICES
// ============================================================================

pub use crate::application::client::Client;
pub use crate::application::interfaces::data::DataService;
pub use crate::application::interfaces::task::TaskService;
pub use crate::application::pagination::{DataPager, PageCursor, PageSource};

// ============================================================================
// MODELS
// ============================================================================

pub use crate::model::responses::{
    ApiResponse, DataPage, DataRow, NotExportedData, Task, TaskGroup, decode_or_default,
    decode_required,
};
pub use crate::presentation::{column_names, rows_table, task_groups_table, tasks_table};

// ============================================================================
// EXTERNAL DEPENDENCIES
// ============================================================================

pub use async_trait::async_trait;
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use serde_json::Value;
pub use std::sync::Arc;
pub use tracing::{debug, error, info, warn};
