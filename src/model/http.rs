/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/

//! Transport helpers
//!
//! Thin wrappers that issue one authenticated request against an absolute
//! URL and hand back the decoded JSON payload. They never retry.

use crate::constants::USER_AGENT;
use crate::error::AppError;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};

/// Longest response body kept in error values and logs
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Builds the reqwest client shared by the authenticator and the API client
///
/// # Arguments
/// * `timeout_secs` - Timeout applied to every request
///
/// # Errors
/// `AppError::Network` if the TLS backend cannot be initialised
pub fn build_http_client(timeout_secs: u64) -> Result<Client, AppError> {
    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(timeout_secs))
        .build()?)
}

/// Issues a GET request with a bearer token and optional query parameters
///
/// # Arguments
/// * `client` - The HTTP client to use
/// * `url` - Absolute URL
/// * `token` - Access token sent as `Authorization: Bearer <token>`
/// * `params` - Query parameters, e.g. `&[("taskId", "abc")]`
///
/// # Returns
/// The decoded JSON body
///
/// # Example
///
/// ```ignore
/// let client = build_http_client(30)?;
/// let body = get_request(
///     &client,
///     "https://dataapi.octoparse.com/api/Task",
///     &token,
///     Some(&[("taskGroupId", "42")]),
/// ).await?;
/// ```
pub async fn get_request<P: Serialize + ?Sized>(
    client: &Client,
    url: &str,
    token: &str,
    params: Option<&P>,
) -> Result<Value, AppError> {
    let mut request = client.request(Method::GET, url).bearer_auth(token);
    if let Some(params) = params {
        request = request.query(params);
    }
    debug!("GET {}", url);
    send_for_json(request).await
}

/// Issues a POST request with a bearer token, optional query parameters and optional form body
///
/// # Arguments
/// * `client` - The HTTP client to use
/// * `url` - Absolute URL
/// * `token` - Access token sent as `Authorization: Bearer <token>`
/// * `params` - Query parameters
/// * `body` - Form fields sent as `application/x-www-form-urlencoded`
///
/// # Returns
/// The decoded JSON body
pub async fn post_request<P: Serialize + ?Sized, B: Serialize + ?Sized>(
    client: &Client,
    url: &str,
    token: &str,
    params: Option<&P>,
    body: Option<&B>,
) -> Result<Value, AppError> {
    let mut request = client.request(Method::POST, url).bearer_auth(token);
    if let Some(params) = params {
        request = request.query(params);
    }
    if let Some(body) = body {
        request = request.form(body);
    }
    debug!("POST {}", url);
    send_for_json(request).await
}

/// Sends a request and decodes a successful JSON body
///
/// Non-success statuses become `Unauthorized` (401) or `Unexpected`;
/// a body that is not JSON is a protocol error.
pub(crate) async fn send_for_json(request: RequestBuilder) -> Result<Value, AppError> {
    let response = request.send().await?;
    let status = response.status();
    debug!("Response status: {}", status);

    let text = response.text().await?;

    if status == StatusCode::UNAUTHORIZED {
        error!("Unauthorized: {}", truncate_body(&text));
        return Err(AppError::Unauthorized);
    }
    if !status.is_success() {
        let body = truncate_body(&text);
        error!("Request failed with status {}: {}", status, body);
        return Err(AppError::Unexpected { status, body });
    }

    parse_json_body(&text)
}

pub(crate) fn parse_json_body(text: &str) -> Result<Value, AppError> {
    serde_json::from_str(text).map_err(|e| {
        AppError::Protocol(format!(
            "response body is not valid JSON ({e}): {}",
            truncate_body(text)
        ))
    })
}

pub(crate) fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY_LENGTH {
        return body.to_string();
    }
    let mut end = MAX_ERROR_BODY_LENGTH;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
}
