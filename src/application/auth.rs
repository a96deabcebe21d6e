/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/

//! Authentication module for the Octoparse API
//!
//! This module owns the credential lifecycle:
//! - Password grant login with credentials from a [`CredentialProvider`]
//! - Refresh grant when the access token has expired
//! - Fallback to a fresh login when the refresh token is rejected
//! - Persistence of every newly issued credential
//!
//! There is no background refresh: the expiry check in
//! [`Auth::get_valid_access_token`] runs before every API call.

use crate::application::config::{Config, Credentials};
use crate::application::provider::CredentialProvider;
use crate::error::{AppError, AuthError};
use crate::model::auth::{Credential, TokenResponse};
use crate::model::http::{build_http_client, parse_json_body};
use crate::storage::CredentialStore;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// Authentication manager for the Octoparse API
///
/// Holds the single in-memory [`Credential`] of a client. The credential
/// sits behind an async mutex that stays locked during a login or refresh,
/// so concurrent callers on one instance never race two grants.
pub struct Auth {
    config: Arc<Config>,
    client: Client,
    provider: Arc<dyn CredentialProvider>,
    store: Arc<dyn CredentialStore>,
    credential: Mutex<Option<Credential>>,
}

impl Auth {
    /// Creates a new Auth instance, loading any persisted credential
    ///
    /// An unreadable or corrupt store is logged and treated as empty.
    ///
    /// # Arguments
    /// * `config` - Configuration with the API base URL and timeout
    /// * `provider` - Source of username/password for logins
    /// * `store` - Durable storage for the credential
    pub fn new(
        config: Arc<Config>,
        provider: Arc<dyn CredentialProvider>,
        store: Arc<dyn CredentialStore>,
    ) -> Result<Self, AppError> {
        let client = build_http_client(config.rest_api.timeout)?;

        let credential = match store.load() {
            Ok(Some(credential)) if credential.has_access_token() => {
                debug!("Loaded persisted credential, issued at {}", credential.issued_at);
                Some(credential)
            }
            Ok(_) => None,
            Err(e) => {
                warn!("Ignoring unreadable persisted credential: {}", e);
                None
            }
        };

        Ok(Self {
            config,
            client,
            provider,
            store,
            credential: Mutex::new(credential),
        })
    }

    /// Returns an access token that has not expired
    ///
    /// - no credential: logs in
    /// - more than `expires_in` seconds since issue: refreshes once
    /// - otherwise: returns the stored token without any network call
    ///
    /// # Errors
    /// `AppError::Auth` if no valid credential can be obtained
    pub async fn get_valid_access_token(&self) -> Result<String, AppError> {
        let mut slot = self.credential.lock().await;

        let credential = match slot.as_ref() {
            None => {
                info!("No credential loaded, logging in");
                self.login_locked(&mut slot).await?
            }
            Some(current) if current.is_expired() => {
                info!(
                    "Access token expired {}s ago, refreshing",
                    -current.seconds_until_expiry()
                );
                let current = current.clone();
                self.refresh_locked(&mut slot, &current).await?
            }
            Some(current) => return Ok(current.access_token.clone()),
        };

        Ok(credential.access_token)
    }

    /// Logs in with credentials obtained from the provider
    ///
    /// # Errors
    /// `AppError::Auth` if the provider fails or the grant is rejected
    pub async fn login(&self) -> Result<Credential, AppError> {
        let mut slot = self.credential.lock().await;
        self.login_locked(&mut slot).await
    }

    /// Logs in with explicit credentials, bypassing the provider
    ///
    /// # Errors
    /// `AppError::Auth` if the grant is rejected
    pub async fn login_with(&self, credentials: &Credentials) -> Result<Credential, AppError> {
        let mut slot = self.credential.lock().await;
        let credential = self.password_grant(credentials).await?;
        self.install(&mut slot, credential.clone());
        Ok(credential)
    }

    /// Exchanges the refresh token of `current` for a new credential
    ///
    /// A rejected refresh token is not retried: the manager falls back to a
    /// fresh login with credentials from the provider.
    ///
    /// # Errors
    /// `AppError::Auth` if both the refresh and the fallback login fail
    pub async fn refresh(&self, current: &Credential) -> Result<Credential, AppError> {
        let mut slot = self.credential.lock().await;
        self.refresh_locked(&mut slot, current).await
    }

    /// Snapshot of the in-memory credential
    pub async fn credential(&self) -> Option<Credential> {
        self.credential.lock().await.clone()
    }

    /// Drops the credential from memory and from the store
    pub async fn logout(&self) -> Result<(), AppError> {
        let mut slot = self.credential.lock().await;
        *slot = None;
        self.store.clear()?;
        info!("Logged out");
        Ok(())
    }

    async fn login_locked(&self, slot: &mut Option<Credential>) -> Result<Credential, AppError> {
        let credentials = self.provider.credentials().await?;
        let credential = self.password_grant(&credentials).await?;
        self.install(slot, credential.clone());
        Ok(credential)
    }

    async fn refresh_locked(
        &self,
        slot: &mut Option<Credential>,
        current: &Credential,
    ) -> Result<Credential, AppError> {
        match self.refresh_grant(&current.refresh_token).await? {
            Some(credential) => {
                self.install(slot, credential.clone());
                info!("Token refreshed successfully");
                Ok(credential)
            }
            None => {
                warn!("Refresh token rejected, attempting full re-authentication");
                *slot = None;
                self.login_locked(slot).await
            }
        }
    }

    /// Password grant; a response without access token is an `AuthError`
    async fn password_grant(&self, credentials: &Credentials) -> Result<Credential, AppError> {
        debug!("Sending password grant for user {}", credentials.username);
        let form = [
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
            ("grant_type", "password"),
        ];
        let (status, response) = self.token_request(&form).await?;

        let TokenResponse {
            error,
            error_description,
            ..
        } = response.clone();
        match response.into_credential() {
            Some(credential) => {
                info!(
                    "Login successful, token expires in {}s",
                    credential.expires_in
                );
                Ok(credential)
            }
            None => {
                error!(
                    "Login failed with status {}: {}",
                    status,
                    error_description.as_deref().or(error.as_deref()).unwrap_or("-")
                );
                Err(AuthError::Rejected {
                    status,
                    error,
                    description: error_description,
                }
                .into())
            }
        }
    }

    /// Refresh grant; `None` when the server does not issue a new credential
    async fn refresh_grant(&self, refresh_token: &str) -> Result<Option<Credential>, AppError> {
        debug!("Sending refresh grant");
        let form = [
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ];
        let (status, response) = self.token_request(&form).await?;
        if status != StatusCode::OK {
            warn!(
                "Token refresh failed with status {}: {}",
                status,
                response.error_description.as_deref().unwrap_or("-")
            );
            return Ok(None);
        }
        let credential = response.into_credential();
        if credential.is_none() {
            warn!("Token refresh answered 200 without an access token");
        }
        Ok(credential)
    }

    /// POSTs a grant to `/token`; a body that is not JSON decodes as an empty response
    async fn token_request(
        &self,
        form: &[(&str, &str)],
    ) -> Result<(StatusCode, TokenResponse), AppError> {
        let url = self.config.url("token");
        let response = self.client.post(&url).form(form).send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!("Token endpoint answered {}", status);

        let token_response = parse_json_body(&text)
            .and_then(|value| serde_json::from_value(value).map_err(AppError::from))
            .unwrap_or_else(|e| {
                debug!("Unreadable token response: {}", e);
                TokenResponse::default()
            });
        Ok((status, token_response))
    }

    /// Replaces the credential in memory and persists it
    ///
    /// When the save fails the store is cleared: the previous record holds a
    /// refresh token the server has already consumed.
    fn install(&self, slot: &mut Option<Credential>, credential: Credential) {
        if let Err(e) = self.store.save(&credential) {
            warn!("Failed to persist credential, clearing the store: {}", e);
            if let Err(e) = self.store.clear() {
                error!("Failed to clear the credential store: {}", e);
            }
        }
        *slot = Some(credential);
    }
}
