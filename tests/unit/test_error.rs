use octoparse_client::error::{AppError, AuthError};
use reqwest::StatusCode;

#[test]
fn test_app_error_display_unauthorized() {
    let error = AppError::Unauthorized;
    assert_eq!(error.to_string(), "unauthorized");
    assert!(error.is_transport());
}

#[test]
fn test_app_error_display_protocol() {
    let error = AppError::Protocol("response has no data envelope".to_string());
    assert_eq!(
        error.to_string(),
        "protocol error: response has no data envelope"
    );
    assert!(error.is_protocol());
    assert!(!error.is_auth());
}

#[test]
fn test_app_error_display_unexpected() {
    let error = AppError::Unexpected {
        status: StatusCode::BAD_REQUEST,
        body: "bad".to_string(),
    };
    assert!(error.to_string().contains("400"));
    assert!(error.to_string().ends_with("bad"));
}

#[test]
fn test_app_error_display_invalid_input() {
    let error = AppError::InvalidInput("page size must be between 1 and 1000, got 0".to_string());
    assert_eq!(
        error.to_string(),
        "invalid input: page size must be between 1 and 1000, got 0"
    );
}

#[test]
fn test_auth_error_prefers_description() {
    let error: AppError = AuthError::Rejected {
        status: StatusCode::BAD_REQUEST,
        error: Some("invalid_grant".to_string()),
        description: Some("The user name or password is incorrect.".to_string()),
    }
    .into();
    assert!(error.is_auth());
    assert_eq!(
        error.to_string(),
        "authentication error: token grant rejected with status 400 Bad Request: The user name or password is incorrect."
    );
}

#[test]
fn test_auth_error_without_reason() {
    let error = AuthError::Rejected {
        status: StatusCode::OK,
        error: None,
        description: None,
    };
    assert_eq!(
        error.to_string(),
        "token grant rejected with status 200 OK: no access token in response"
    );
}

#[test]
fn test_auth_error_credentials_unavailable() {
    let error = AuthError::CredentialsUnavailable("no username entered".to_string());
    assert_eq!(error.to_string(), "credentials unavailable: no username entered");
}

#[test]
fn test_app_error_from_serde() {
    let serde_error = serde_json::from_str::<serde_json::Value>("{invalid").unwrap_err();
    let app_error: AppError = serde_error.into();
    assert!(matches!(app_error, AppError::Json(_)));
}

#[test]
fn test_app_error_from_io() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let app_error: AppError = io_error.into();
    assert_eq!(app_error.to_string(), "io error: missing");
}
