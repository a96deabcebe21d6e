use crate::support::{credential_issued_ago, mock_login, test_config, test_provider, token_body};
use mockito::{Matcher, Server};
use octoparse_client::prelude::*;
use serde_json::json;
use tempfile::tempdir;

fn auth_with_store(server: &Server, store: Arc<dyn CredentialStore>) -> Auth {
    Auth::new(Arc::new(test_config(server)), test_provider(), store).unwrap()
}

#[tokio::test]
async fn test_login_persists_credential_across_sessions() {
    let mut server = Server::new_async().await;
    let login = mock_login(&mut server, "T1", "R1", 1).await;
    let dir = tempdir().unwrap();
    let token_file = dir.path().join("octoparse_token.json");

    let auth = auth_with_store(&server, Arc::new(FileCredentialStore::new(&token_file)));
    assert_eq!(auth.get_valid_access_token().await.unwrap(), "T1");

    let stored = FileCredentialStore::new(&token_file).load().unwrap().unwrap();
    assert_eq!(stored.access_token, "T1");
    assert_eq!(stored.refresh_token, "R1");
    assert_eq!(stored.expires_in, 86399);

    // A fresh session reads the file and needs no grant
    let second = auth_with_store(&server, Arc::new(FileCredentialStore::new(&token_file)));
    assert_eq!(second.get_valid_access_token().await.unwrap(), "T1");

    login.assert_async().await;
}

#[tokio::test]
async fn test_valid_credential_makes_no_request() {
    let mut server = Server::new_async().await;
    let token = server
        .mock("POST", "/token")
        .expect(0)
        .create_async()
        .await;

    let store = Arc::new(MemoryCredentialStore::with_credential(
        credential_issued_ago("T1", "R1", 10, 3600),
    ));
    let auth = auth_with_store(&server, store);

    for _ in 0..3 {
        assert_eq!(auth.get_valid_access_token().await.unwrap(), "T1");
    }
    token.assert_async().await;
}

#[tokio::test]
async fn test_expired_credential_triggers_single_refresh() {
    let mut server = Server::new_async().await;
    let refresh = server
        .mock("POST", "/token")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("grant_type".into(), "refresh_token".into()),
            Matcher::UrlEncoded("refresh_token".into(), "R1".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(token_body("T2", "R2"))
        .expect(1)
        .create_async()
        .await;

    let store = Arc::new(MemoryCredentialStore::with_credential(
        credential_issued_ago("T1", "R1", 3700, 3600),
    ));
    let auth = auth_with_store(&server, store.clone());

    assert_eq!(auth.get_valid_access_token().await.unwrap(), "T2");
    // The refreshed credential is valid, no further grant
    assert_eq!(auth.get_valid_access_token().await.unwrap(), "T2");

    let persisted = store.load().unwrap().unwrap();
    assert_eq!(persisted.access_token, "T2");
    assert_eq!(persisted.refresh_token, "R2");
    refresh.assert_async().await;
}

#[tokio::test]
async fn test_rejected_refresh_falls_back_to_login() {
    let mut server = Server::new_async().await;
    let refresh = server
        .mock("POST", "/token")
        .match_body(Matcher::UrlEncoded(
            "grant_type".into(),
            "refresh_token".into(),
        ))
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(json!({"error": "invalid_grant"}).to_string())
        .expect(1)
        .create_async()
        .await;
    let login = mock_login(&mut server, "T3", "R3", 1).await;

    let store = Arc::new(MemoryCredentialStore::with_credential(
        credential_issued_ago("T1", "R1", 7200, 3600),
    ));
    let auth = auth_with_store(&server, store.clone());

    assert_eq!(auth.get_valid_access_token().await.unwrap(), "T3");
    assert_eq!(store.load().unwrap().unwrap().access_token, "T3");
    refresh.assert_async().await;
    login.assert_async().await;
}

#[tokio::test]
async fn test_refresh_without_access_token_falls_back_to_login() {
    let mut server = Server::new_async().await;
    let refresh = server
        .mock("POST", "/token")
        .match_body(Matcher::UrlEncoded(
            "grant_type".into(),
            "refresh_token".into(),
        ))
        .with_status(200)
        .with_body("{}")
        .expect(1)
        .create_async()
        .await;
    let login = mock_login(&mut server, "T4", "R4", 1).await;

    let store = Arc::new(MemoryCredentialStore::with_credential(
        credential_issued_ago("T1", "R1", 7200, 3600),
    ));
    let auth = auth_with_store(&server, store);

    assert_eq!(auth.get_valid_access_token().await.unwrap(), "T4");
    refresh.assert_async().await;
    login.assert_async().await;
}

#[tokio::test]
async fn test_login_without_access_token_is_auth_error() {
    let mut server = Server::new_async().await;
    let _login = server
        .mock("POST", "/token")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"error": "invalid_grant", "error_description": "bad credentials"}).to_string(),
        )
        .create_async()
        .await;

    let store = Arc::new(MemoryCredentialStore::new());
    let auth = auth_with_store(&server, store.clone());

    let err = auth.get_valid_access_token().await.unwrap_err();
    assert!(err.is_auth());
    assert!(err.to_string().contains("bad credentials"));
    assert!(store.load().unwrap().is_none());
    assert!(auth.credential().await.is_none());
}

#[tokio::test]
async fn test_login_with_non_json_body_is_auth_error() {
    let mut server = Server::new_async().await;
    let _login = server
        .mock("POST", "/token")
        .with_status(502)
        .with_body("<html>Bad Gateway</html>")
        .create_async()
        .await;

    let auth = auth_with_store(&server, Arc::new(MemoryCredentialStore::new()));
    match auth.login().await.unwrap_err() {
        AppError::Auth(AuthError::Rejected { status, .. }) => assert_eq!(status.as_u16(), 502),
        other => panic!("Unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_login_with_explicit_credentials() {
    let mut server = Server::new_async().await;
    let login = server
        .mock("POST", "/token")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("username".into(), "other".into()),
            Matcher::UrlEncoded("password".into(), "secret".into()),
        ]))
        .with_status(200)
        .with_body(token_body("T5", "R5"))
        .expect(1)
        .create_async()
        .await;

    let auth = auth_with_store(&server, Arc::new(MemoryCredentialStore::new()));
    let credential = auth
        .login_with(&Credentials::new("other", "secret"))
        .await
        .unwrap();
    assert_eq!(credential.access_token, "T5");
    assert_eq!(auth.credential().await.unwrap().access_token, "T5");
    login.assert_async().await;
}

#[tokio::test]
async fn test_corrupt_token_file_is_ignored() {
    let mut server = Server::new_async().await;
    let login = mock_login(&mut server, "T1", "R1", 1).await;
    let dir = tempdir().unwrap();
    let token_file = dir.path().join("octoparse_token.json");
    std::fs::write(&token_file, "not json").unwrap();

    let auth = auth_with_store(&server, Arc::new(FileCredentialStore::new(&token_file)));
    assert!(auth.credential().await.is_none());
    assert_eq!(auth.get_valid_access_token().await.unwrap(), "T1");
    login.assert_async().await;
}

#[tokio::test]
async fn test_logout_clears_memory_and_store() {
    let server = Server::new_async().await;
    let store = Arc::new(MemoryCredentialStore::with_credential(
        credential_issued_ago("T1", "R1", 0, 3600),
    ));
    let auth = auth_with_store(&server, store.clone());

    auth.logout().await.unwrap();
    assert!(auth.credential().await.is_none());
    assert!(store.load().unwrap().is_none());
}

#[tokio::test]
async fn test_concurrent_callers_share_one_login() {
    let mut server = Server::new_async().await;
    let login = mock_login(&mut server, "T1", "R1", 1).await;
    let auth = Arc::new(auth_with_store(
        &server,
        Arc::new(MemoryCredentialStore::new()),
    ));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let auth = auth.clone();
            tokio::spawn(async move { auth.get_valid_access_token().await })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), "T1");
    }
    login.assert_async().await;
}

#[test]
fn test_static_provider_hands_out_credentials() {
    let credentials = tokio_test::block_on(test_provider().credentials()).unwrap();
    assert_eq!(credentials.username, "myuser");
    assert_eq!(credentials.password, "mypass");

    let empty = StaticCredentialProvider::new(Credentials::new("", "x"));
    let err = tokio_test::block_on(empty.credentials()).unwrap_err();
    assert!(matches!(
        err,
        AppError::Auth(AuthError::CredentialsUnavailable(_))
    ));
}

/// Store whose writes always fail, remembering whether it was cleared
struct ReadOnlyStore {
    credential: std::sync::Mutex<Option<Credential>>,
    cleared: std::sync::atomic::AtomicBool,
}

impl CredentialStore for ReadOnlyStore {
    fn load(&self) -> Result<Option<Credential>, AppError> {
        Ok(self.credential.lock().unwrap().clone())
    }

    fn save(&self, _credential: &Credential) -> Result<(), AppError> {
        Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
    }

    fn clear(&self) -> Result<(), AppError> {
        *self.credential.lock().unwrap() = None;
        self.cleared
            .store(true, std::sync::atomic::Ordering::SeqCst);
        Ok(())
    }
}

#[tokio::test]
async fn test_failed_save_after_refresh_clears_stale_record() {
    let mut server = Server::new_async().await;
    let refresh = server
        .mock("POST", "/token")
        .match_body(Matcher::UrlEncoded(
            "refresh_token".into(),
            "R1".into(),
        ))
        .with_status(200)
        .with_body(token_body("T2", "R2"))
        .expect(1)
        .create_async()
        .await;

    let store = Arc::new(ReadOnlyStore {
        credential: std::sync::Mutex::new(Some(credential_issued_ago("T1", "R1", 7200, 3600))),
        cleared: std::sync::atomic::AtomicBool::new(false),
    });
    let auth = auth_with_store(&server, store.clone());

    // The refreshed token is still usable in this session
    assert_eq!(auth.get_valid_access_token().await.unwrap(), "T2");
    assert!(store.cleared.load(std::sync::atomic::Ordering::SeqCst));
    // The consumed refresh token R1 is no longer on record
    assert!(store.load().unwrap().is_none());
    refresh.assert_async().await;
}
