/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/
use std::env;
use std::fmt::Debug;
use std::str::FromStr;
use tracing::error;

/// Gets an environment variable or returns a default value if not found or cannot be parsed
///
/// # Arguments
///
/// * `env_var` - The name of the environment variable
/// * `default` - The default value to use if the environment variable is not found or cannot be parsed
///
/// # Returns
///
/// The parsed value of the environment variable or the default value
pub fn get_env_or_default<T: FromStr>(env_var: &str, default: T) -> T
where
    <T as FromStr>::Err: Debug,
{
    match env::var(env_var) {
        Ok(val) => val.parse::<T>().unwrap_or_else(|e| {
            error!("Failed to parse {}: {} ({:?}), using default", env_var, val, e);
            default
        }),
        Err(_) => default,
    }
}

/// Gets a non-empty environment variable, returning None if it is unset or blank
///
/// # Arguments
/// * `env_var` - Name of the environment variable
pub fn get_env_non_empty(env_var: &str) -> Option<String> {
    env::var(env_var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
