/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/

//! Sources of the username/password pair used by the password grant

use crate::application::config::Credentials;
use crate::error::{AppError, AuthError};
use async_trait::async_trait;
use std::io::{self, BufRead, Write};

/// Obtains the credentials for a password grant
///
/// Called every time a fresh login is needed, including after a failed refresh.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Returns a username and password
    async fn credentials(&self) -> Result<Credentials, AppError>;
}

/// Hands out a fixed credential pair, e.g. read from the environment
#[derive(Clone)]
pub struct StaticCredentialProvider {
    credentials: Credentials,
}

impl StaticCredentialProvider {
    /// Creates a provider returning `credentials`
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentialProvider {
    async fn credentials(&self) -> Result<Credentials, AppError> {
        if self.credentials.username.is_empty() {
            return Err(AuthError::CredentialsUnavailable("empty username".to_string()).into());
        }
        Ok(self.credentials.clone())
    }
}

/// Asks for the credentials on the terminal, masking the password
#[derive(Debug, Clone, Default)]
pub struct PromptCredentialProvider;

#[async_trait]
impl CredentialProvider for PromptCredentialProvider {
    async fn credentials(&self) -> Result<Credentials, AppError> {
        tokio::task::spawn_blocking(prompt_credentials)
            .await
            .map_err(|e| AuthError::CredentialsUnavailable(format!("prompt aborted: {e}")))?
    }
}

fn prompt_credentials() -> Result<Credentials, AppError> {
    let mut stdout = io::stdout();
    write!(stdout, "Enter Octoparse Username: ")?;
    stdout.flush()?;

    let mut username = String::new();
    io::stdin().lock().read_line(&mut username)?;
    let username = username.trim().to_string();
    if username.is_empty() {
        return Err(AuthError::CredentialsUnavailable("no username entered".to_string()).into());
    }

    let password = rpassword::prompt_password("Password: ")?;
    Ok(Credentials { username, password })
}
