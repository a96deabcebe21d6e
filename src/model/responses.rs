/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/
use crate::error::AppError;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One row of extracted data, field name to value, in server field order
pub type DataRow = serde_json::Map<String, Value>;

/// Decoded response of a one-shot endpoint
///
/// `error` and `error_description` are passed through untouched so callers
/// can inspect what the server reported.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ApiResponse<T> {
    /// Payload of the `data` field
    pub data: T,
    /// Raw `error` field, `"success"` when the call went through
    pub error: Option<String>,
    /// Raw `error_Description` field
    #[serde(rename = "error_Description")]
    pub error_description: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Checks whether the server reported success
    ///
    /// An absent `error` field counts as success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error
            .as_deref()
            .is_none_or(|e| e.eq_ignore_ascii_case("success"))
    }

    /// Maps the payload, keeping the status fields
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            data: f(self.data),
            error: self.error,
            error_description: self.error_description,
        }
    }
}

/// Decodes an envelope whose `data` field must be present
///
/// # Errors
/// `AppError::Protocol` if the payload is not an object, `data` is absent or
/// null, or `data` does not have the shape of `T`.
pub fn decode_required<T: DeserializeOwned>(value: Value) -> Result<ApiResponse<T>, AppError> {
    let (data, error, error_description) = split_envelope(value)?;
    let data = data.ok_or_else(|| {
        AppError::Protocol(format!(
            "response has no data envelope (error: {}, description: {})",
            error.as_deref().unwrap_or("-"),
            error_description.as_deref().unwrap_or("-")
        ))
    })?;
    Ok(ApiResponse {
        data: decode_data(data)?,
        error,
        error_description,
    })
}

/// Decodes an envelope whose `data` field may be absent
///
/// An absent or null `data` yields `T::default()`; a present but malformed
/// one is still a protocol error.
///
/// # Errors
/// `AppError::Protocol` if the payload is not an object or `data` does not
/// have the shape of `T`.
pub fn decode_or_default<T: DeserializeOwned + Default>(
    value: Value,
) -> Result<ApiResponse<T>, AppError> {
    let (data, error, error_description) = split_envelope(value)?;
    let data = match data {
        Some(data) => decode_data(data)?,
        None => T::default(),
    };
    Ok(ApiResponse {
        data,
        error,
        error_description,
    })
}

fn split_envelope(value: Value) -> Result<(Option<Value>, Option<String>, Option<String>), AppError> {
    let Value::Object(mut object) = value else {
        return Err(AppError::Protocol(format!(
            "expected a JSON object, got {}",
            json_kind(&value)
        )));
    };
    let data = object.remove("data").filter(|d| !d.is_null());
    let error = object.remove("error").and_then(value_as_text);
    let error_description = object.remove("error_Description").and_then(value_as_text);
    Ok((data, error, error_description))
}

fn decode_data<T: DeserializeOwned>(data: Value) -> Result<T, AppError> {
    serde_json::from_value(data)
        .map_err(|e| AppError::Protocol(format!("unexpected data envelope: {e}")))
}

fn value_as_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// One page of `GetDataOfTaskByOffset`
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DataPage {
    /// Offset reported by the server for this page
    pub offset: u64,
    /// Total number of rows stored for the task
    pub total: u64,
    /// Rows left after this page; zero ends the pagination
    pub rest_total: u64,
    /// Rows of this page
    pub data_list: Vec<DataRow>,
}

/// Result of `notexportdata/gettop`
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct NotExportedData {
    /// Number of rows not yet exported
    #[serde(default)]
    pub total: u64,
    /// Number of rows returned in this batch
    #[serde(default)]
    pub current_total: u64,
    /// Rows of this batch
    #[serde(default)]
    pub data_list: Vec<DataRow>,
}

/// Named collection of tasks
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct TaskGroup {
    /// Group identifier
    pub task_group_id: i64,
    /// Group name
    pub task_group_name: String,
}

/// Scraping task configured on the platform
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Opaque task identifier
    pub task_id: String,
    /// Task name
    pub task_name: String,
}
