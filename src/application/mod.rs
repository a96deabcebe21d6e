/// Credential lifecycle: login, refresh, persistence
pub mod auth;
/// API client with automatic authentication
pub mod client;
/// Application configuration module
pub mod config;
/// Service traits implemented by the client
pub mod interfaces;
/// Offset pagination driven by `restTotal`
pub mod pagination;
/// Sources of login credentials
pub mod provider;
