/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Access credential issued by the token endpoint
///
/// A credential is only ever replaced as a whole, never patched field by field.
/// `Debug` output redacts both tokens.
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct Credential {
    /// Bearer token sent with every authenticated request
    pub access_token: String,
    /// Token type (usually "bearer")
    pub token_type: String,
    /// Lifetime of the access token in seconds
    pub expires_in: u64,
    /// Single-use token exchanged for a new credential
    pub refresh_token: String,
    /// When the credential was obtained
    pub issued_at: DateTime<Utc>,
}

impl Credential {
    /// Creates a credential issued now
    pub fn new(
        access_token: String,
        token_type: String,
        expires_in: u64,
        refresh_token: String,
    ) -> Self {
        Self {
            access_token,
            token_type,
            expires_in,
            refresh_token,
            issued_at: Utc::now(),
        }
    }

    /// Instant after which the access token is no longer accepted
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.issued_at
            .checked_add_signed(self.lifetime())
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Checks whether more than `expires_in` seconds elapsed since issue, as of `now`
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now - self.issued_at > self.lifetime()
    }

    /// Checks whether more than `expires_in` seconds elapsed since issue
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Seconds left before expiry, negative once expired
    #[must_use]
    pub fn seconds_until_expiry(&self) -> i64 {
        (self.expires_at() - Utc::now()).num_seconds()
    }

    /// Whether the credential carries a usable access token
    #[must_use]
    pub fn has_access_token(&self) -> bool {
        !self.access_token.trim().is_empty()
    }

    fn lifetime(&self) -> Duration {
        i64::try_from(self.expires_in)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &redacted(&self.access_token))
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("refresh_token", &redacted(&self.refresh_token))
            .field("issued_at", &self.issued_at)
            .finish()
    }
}

fn redacted(token: &str) -> &'static str {
    if token.is_empty() { "" } else { "<redacted>" }
}

/// Raw response of the `/token` endpoint
///
/// Every field is optional: a missing `access_token` is how the server
/// signals a rejected grant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Issued access token
    #[serde(default)]
    pub access_token: Option<String>,
    /// Token type
    #[serde(default)]
    pub token_type: Option<String>,
    /// Lifetime in seconds, sent as a number or a numeric string
    #[serde(default, deserialize_with = "deserialize_expires_in")]
    pub expires_in: Option<u64>,
    /// Issued refresh token
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// OAuth error code on failure
    #[serde(default)]
    pub error: Option<String>,
    /// Human readable failure reason
    #[serde(default)]
    pub error_description: Option<String>,
}

impl TokenResponse {
    /// Converts the response into a credential issued now
    ///
    /// Returns `None` when the response carries no access token.
    #[must_use]
    pub fn into_credential(self) -> Option<Credential> {
        let access_token = self.access_token.filter(|t| !t.trim().is_empty())?;
        Some(Credential::new(
            access_token,
            self.token_type.unwrap_or_else(|| "bearer".to_string()),
            self.expires_in.unwrap_or_default(),
            self.refresh_token.unwrap_or_default(),
        ))
    }
}

fn deserialize_expires_in<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u64),
        String(String),
    }

    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(n)) => Ok(Some(n)),
        Some(NumberOrString::String(s)) => s
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
