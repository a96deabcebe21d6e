/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/

//! # Octoparse Client
//!
//! Async client for the Octoparse data API (standard and advanced tiers).
//!
//! The client manages an OAuth-style credential on its own: it logs in with a
//! password grant, persists the issued token to a JSON file, checks its
//! expiry before every call and refreshes it when needed, falling back to a
//! fresh login when the refresh token is rejected.
//!
//! Extracted data is fetched page by page with `GetDataOfTaskByOffset`; the
//! server's `restTotal` field decides when to stop.
//!
//! ## Example
//!
//! ```ignore
//! use octoparse_client::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     setup_logger();
//!     let client = Client::new(Config::new()).await?;
//!     for group in client.list_task_groups().await?.data {
//!         println!("{}: {}", group.task_group_id, group.task_group_name);
//!     }
//!     let rows = client.fetch_all_data("task-id", 1000, 0).await?;
//!     println!("{}", rows_table(&rows));
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! | Variable | Default |
//! |----------|---------|
//! | `OCTOPARSE_USERNAME` / `OCTOPARSE_PASSWORD` | prompted on the terminal |
//! | `OCTOPARSE_API_TIER` | `standard` |
//! | `OCTOPARSE_REGION` | `global` |
//! | `OCTOPARSE_BASE_URL` | derived from tier and region |
//! | `OCTOPARSE_TIMEOUT` | `30` |
//! | `OCTOPARSE_TOKEN_FILE` | `octoparse_token.json` |
//! | `OCTOPARSE_PAGE_SIZE` | `1000` |
//! | `LOGLEVEL` | `INFO` |

/// Client, authentication, configuration and pagination
pub mod application;
/// Endpoint URLs and library defaults
pub mod constants;
/// Error types
pub mod error;
/// Wire models and transport helpers
pub mod model;
/// Convenient re-exports
pub mod prelude;
/// Text rendering of extracted data
pub mod presentation;
/// Credential persistence
pub mod storage;
/// Environment and logging helpers
pub mod utils;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version
#[must_use]
pub fn version() -> &'static str {
    VERSION
}
