/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/
use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

static INIT: Once = Once::new();

/// Sets up the global tracing subscriber
///
/// The level is read from the `LOGLEVEL` environment variable
/// (`TRACE`, `DEBUG`, `INFO`, `WARN`, `ERROR`), defaulting to `INFO`.
/// Calling it more than once is a no-op, so tests can call it freely.
pub fn setup_logger() {
    INIT.call_once(|| {
        let level = log_level_from(&env::var("LOGLEVEL").unwrap_or_else(|_| "INFO".into()));

        let subscriber = FmtSubscriber::builder().with_max_level(level).finish();

        // Another subscriber may already be installed by the embedding application
        if tracing::subscriber::set_global_default(subscriber).is_ok() {
            tracing::debug!("Log level set to: {}", level);
        }
    });
}

fn log_level_from(value: &str) -> Level {
    match value.trim().to_uppercase().as_str() {
        "TRACE" => Level::TRACE,
        "DEBUG" => Level::DEBUG,
        "WARN" => Level::WARN,
        "ERROR" => Level::ERROR,
        _ => Level::INFO,
    }
}
