/// Base URL of the standard data API
pub const STANDARD_API_URL: &str = "https://dataapi.octoparse.com";
/// Base URL of the advanced API (task control, rule properties)
pub const ADVANCED_API_URL: &str = "https://advancedapi.octoparse.com";
/// Base URL of the standard data API served from the China region
pub const STANDARD_API_URL_CN: &str = "https://dataapi.bazhuayu.com";
/// Base URL of the advanced API served from the China region
pub const ADVANCED_API_URL_CN: &str = "https://advancedapi.bazhuayu.com";
/// Default page size for data requests, also the largest the server accepts
pub const DEFAULT_PAGE_SIZE: u32 = 1000;
/// Largest page size accepted by the data endpoints
pub const MAX_PAGE_SIZE: u32 = 1000;
/// Default timeout in seconds for REST requests
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Default file holding the persisted credential, relative to the working directory
pub const DEFAULT_TOKEN_FILE: &str = "octoparse_token.json";
/// Number of rows requested per sample by the activity poll
pub const DEFAULT_POLL_SAMPLE_SIZE: u32 = 10;
/// Seconds between the two samples of the activity poll
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;
/// User agent string used in HTTP requests to identify this client
pub const USER_AGENT: &str = concat!("octoparse-client/", env!("CARGO_PKG_VERSION"));
