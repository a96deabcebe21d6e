use crate::common;
use octoparse_client::prelude::*;

#[tokio::test]
#[ignore]
async fn test_login() {
    let client = common::create_test_client().await;

    let credential = client
        .auth()
        .credential()
        .await
        .expect("Credential should be present after login");
    assert!(credential.has_access_token());
    assert!(!credential.is_expired());
    info!(
        "Login successful, token expires in {}s",
        credential.seconds_until_expiry()
    );
}

#[tokio::test]
#[ignore]
async fn test_refresh_issues_new_token() {
    let client = common::create_test_client().await;
    let current = client.auth().credential().await.expect("Credential should be present");

    let refreshed = client
        .auth()
        .refresh(&current)
        .await
        .expect("Refresh should succeed");
    assert!(refreshed.has_access_token());
    assert_ne!(refreshed.access_token, current.access_token);
}
