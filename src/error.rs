/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/

//! Error types for the Octoparse client
//!
//! Failures fall into three families:
//! - authentication ([`AuthError`]): no valid credential could be obtained
//! - protocol ([`AppError::Protocol`]): the server answered with an unexpected shape
//! - transport ([`AppError::Network`], [`AppError::Unauthorized`], [`AppError::Unexpected`])

use reqwest::StatusCode;
use thiserror::Error;

/// Authentication failures raised by the credential lifecycle
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token endpoint did not hand out an access token
    #[error("token grant rejected with status {status}: {}", rejection_reason(.error, .description))]
    Rejected {
        /// HTTP status of the grant response
        status: StatusCode,
        /// Raw `error` field of the grant response, if any
        error: Option<String>,
        /// Raw `error_description` field of the grant response, if any
        description: Option<String>,
    },
    /// The credential provider could not supply a username and password
    #[error("credentials unavailable: {0}")]
    CredentialsUnavailable(String),
}

fn rejection_reason<'a>(error: &'a Option<String>, description: &'a Option<String>) -> &'a str {
    description
        .as_deref()
        .or(error.as_deref())
        .unwrap_or("no access token in response")
}

/// Main error type for the library
#[derive(Debug, Error)]
pub enum AppError {
    /// Login or refresh failed and no valid credential is available
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),
    /// The response is missing the expected envelope or has the wrong shape
    #[error("protocol error: {0}")]
    Protocol(String),
    /// Network level failure reported by reqwest
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    /// The server answered 401 on an authenticated endpoint
    #[error("unauthorized")]
    Unauthorized,
    /// Any other non-success status
    #[error("unexpected status {status}: {body}")]
    Unexpected {
        /// HTTP status returned by the server
        status: StatusCode,
        /// Response body, possibly truncated
        body: String,
    },
    /// JSON (de)serialization failure outside of response decoding
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// Local I/O failure, e.g. while persisting the credential
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Caller supplied an argument outside the accepted range
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    /// Returns `true` for authentication failures
    #[must_use]
    pub fn is_auth(&self) -> bool {
        matches!(self, AppError::Auth(_))
    }

    /// Returns `true` for envelope or schema violations
    #[must_use]
    pub fn is_protocol(&self) -> bool {
        matches!(self, AppError::Protocol(_))
    }

    /// Returns `true` for network and HTTP status failures
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            AppError::Network(_) | AppError::Unauthorized | AppError::Unexpected { .. }
        )
    }
}
