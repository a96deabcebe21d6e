//! Live tests against the Octoparse API
//!
//! They need `OCTOPARSE_USERNAME`, `OCTOPARSE_PASSWORD` and, for the data
//! tests, `OCTOPARSE_TEST_TASK_ID`. Run with `cargo test -- --ignored`.

mod auth_tests;
mod common;
