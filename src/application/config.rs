/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/
use crate::constants::{
    ADVANCED_API_URL, ADVANCED_API_URL_CN, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECS,
    DEFAULT_TOKEN_FILE, MAX_PAGE_SIZE, STANDARD_API_URL, STANDARD_API_URL_CN,
};
use crate::utils::config::{get_env_non_empty, get_env_or_default};
use dotenv::dotenv;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, warn};

/// API tier exposed by Octoparse
///
/// The advanced tier adds task control (start/stop, rule properties) on top
/// of the data endpoints of the standard tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApiTier {
    /// Standard data API
    #[default]
    Standard,
    /// Advanced API
    Advanced,
}

/// Region hosting the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    /// octoparse.com
    #[default]
    Global,
    /// bazhuayu.com mirror
    China,
}

impl FromStr for ApiTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(ApiTier::Standard),
            "advanced" => Ok(ApiTier::Advanced),
            other => Err(format!("unknown api tier '{other}'")),
        }
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "global" => Ok(Region::Global),
            "china" | "cn" => Ok(Region::China),
            other => Err(format!("unknown region '{other}'")),
        }
    }
}

impl fmt::Display for ApiTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiTier::Standard => write!(f, "standard"),
            ApiTier::Advanced => write!(f, "advanced"),
        }
    }
}

/// Returns the base URL serving the given tier in the given region
#[must_use]
pub fn base_url_for(tier: ApiTier, region: Region) -> &'static str {
    match (tier, region) {
        (ApiTier::Standard, Region::Global) => STANDARD_API_URL,
        (ApiTier::Advanced, Region::Global) => ADVANCED_API_URL,
        (ApiTier::Standard, Region::China) => STANDARD_API_URL_CN,
        (ApiTier::Advanced, Region::China) => ADVANCED_API_URL_CN,
    }
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone)]
/// Username and password used for the password grant
pub struct Credentials {
    /// Octoparse account username
    pub username: String,
    /// Octoparse account password, never serialized
    #[serde(skip_serializing, default)]
    pub password: String,
}

impl Credentials {
    /// Creates a new credential pair
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone)]
/// Configuration for the REST API
pub struct RestApiConfig {
    /// Base URL (origin) of the API, without trailing slash
    pub base_url: String,
    /// Timeout in seconds for REST API requests
    pub timeout: u64,
}

impl RestApiConfig {
    /// Joins a relative endpoint path onto the base URL
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http") {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone)]
/// Main configuration for the Octoparse API client
pub struct Config {
    /// Credentials for the password grant. `None` means they are asked for interactively
    pub credentials: Option<Credentials>,
    /// API tier the base URL was derived from
    pub api_tier: ApiTier,
    /// Region the base URL was derived from
    pub region: Region,
    /// REST API configuration
    pub rest_api: RestApiConfig,
    /// File holding the persisted credential
    pub token_file: PathBuf,
    /// Number of rows requested per page by `fetch_all_data`
    pub page_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Creates a new configuration from the environment
    ///
    /// Loads a `.env` file when present, then reads the `OCTOPARSE_*`
    /// variables. Unparseable values are logged and replaced by defaults.
    pub fn new() -> Self {
        match dotenv() {
            Ok(_) => debug!("Successfully loaded .env file"),
            Err(e) => debug!("Failed to load .env file: {e}"),
        }

        let credentials = match (
            get_env_non_empty("OCTOPARSE_USERNAME"),
            get_env_non_empty("OCTOPARSE_PASSWORD"),
        ) {
            (Some(username), Some(password)) => Some(Credentials { username, password }),
            (Some(_), None) => {
                warn!("OCTOPARSE_USERNAME set without OCTOPARSE_PASSWORD, credentials will be prompted");
                None
            }
            _ => None,
        };

        let api_tier = get_env_or_default("OCTOPARSE_API_TIER", ApiTier::Standard);
        let region = get_env_or_default("OCTOPARSE_REGION", Region::Global);
        let base_url = get_env_non_empty("OCTOPARSE_BASE_URL")
            .unwrap_or_else(|| base_url_for(api_tier, region).to_string());

        let mut page_size = get_env_or_default("OCTOPARSE_PAGE_SIZE", DEFAULT_PAGE_SIZE);
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            warn!(
                "OCTOPARSE_PAGE_SIZE {} out of range 1..={}, using {}",
                page_size, MAX_PAGE_SIZE, DEFAULT_PAGE_SIZE
            );
            page_size = DEFAULT_PAGE_SIZE;
        }

        Config {
            credentials,
            api_tier,
            region,
            rest_api: RestApiConfig {
                base_url,
                timeout: get_env_or_default("OCTOPARSE_TIMEOUT", DEFAULT_TIMEOUT_SECS),
            },
            token_file: get_env_or_default(
                "OCTOPARSE_TOKEN_FILE",
                PathBuf::from(DEFAULT_TOKEN_FILE),
            ),
            page_size,
        }
    }

    /// Creates a configuration pointing at an explicit origin, without reading the environment
    ///
    /// Useful for mirrors, proxies and mock servers.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Config {
            credentials: None,
            api_tier: ApiTier::Standard,
            region: Region::Global,
            rest_api: RestApiConfig {
                base_url: base_url.into(),
                timeout: DEFAULT_TIMEOUT_SECS,
            },
            token_file: PathBuf::from(DEFAULT_TOKEN_FILE),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Returns the configuration with the given credentials
    #[must_use]
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Returns the configuration with the given token file
    #[must_use]
    pub fn token_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_file = path.into();
        self
    }

    /// Full URL of a relative endpoint path
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        self.rest_api.url(path)
    }
}
