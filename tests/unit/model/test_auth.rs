use chrono::{TimeZone, Utc};
use octoparse_client::model::auth::{Credential, TokenResponse};
use serde_json::json;

#[test]
fn test_credential_json_shape() {
    let credential = Credential {
        access_token: "T1".to_string(),
        token_type: "bearer".to_string(),
        expires_in: 86399,
        refresh_token: "R1".to_string(),
        issued_at: Utc.with_ymd_and_hms(2026, 10, 14, 12, 0, 0).unwrap(),
    };
    let value = serde_json::to_value(&credential).unwrap();
    assert_json_diff::assert_json_eq!(
        value,
        json!({
            "access_token": "T1",
            "token_type": "bearer",
            "expires_in": 86399,
            "refresh_token": "R1",
            "issued_at": "2026-10-14T12:00:00Z"
        })
    );
    let back: Credential = serde_json::from_value(value).unwrap();
    assert_eq!(back, credential);
    assert_eq!(
        credential.expires_at(),
        Utc.with_ymd_and_hms(2026, 10, 15, 11, 59, 59).unwrap()
    );
}

#[test]
fn test_token_response_defaults() {
    let credential = serde_json::from_value::<TokenResponse>(json!({"access_token": "T1"}))
        .unwrap()
        .into_credential()
        .unwrap();
    assert_eq!(credential.token_type, "bearer");
    assert_eq!(credential.expires_in, 0);
    assert!(credential.refresh_token.is_empty());
    // A zero lifetime is valid until the next second
    assert!(!credential.is_expired_at(credential.issued_at));
}

#[test]
fn test_blank_access_token_is_no_credential() {
    let response: TokenResponse =
        serde_json::from_value(json!({"access_token": "  ", "expires_in": 60})).unwrap();
    assert!(response.into_credential().is_none());
}

#[test]
fn test_invalid_expiry_string_is_rejected() {
    let result = serde_json::from_value::<TokenResponse>(
        json!({"access_token": "T1", "expires_in": "tomorrow"}),
    );
    assert!(result.is_err());
}
