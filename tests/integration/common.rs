// Common utilities for integration tests

use octoparse_client::prelude::*;
use std::env;

/// Creates a client from the environment and logs in
pub async fn create_test_client() -> Client {
    setup_logger();
    Client::new(Config::new())
        .await
        .expect("Failed to authenticate, check OCTOPARSE_USERNAME/OCTOPARSE_PASSWORD")
}

/// Task used by the data tests
pub fn test_task_id() -> String {
    env::var("OCTOPARSE_TEST_TASK_ID").expect("OCTOPARSE_TEST_TASK_ID must be set")
}
