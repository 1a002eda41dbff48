//! Session domain models.

use chrono::{DateTime, Duration, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{PupError, Result};

/// Fixed key the session record is stored under.
pub const SESSION_KEY: &str = "authed";

/// Session lifetime: one hour from issuance.
pub const DEFAULT_SESSION_TTL_SECS: i64 = 3600;

const MIN_NAME_LEN: usize = 2;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is a valid regex")
});

/// Validated login form values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    name: String,
    email: String,
}

impl Credentials {
    /// Validates and trims the login form values.
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` when the name is shorter than two characters or
    /// the email is not of the form `local@domain.tld`.
    pub fn new(name: impl AsRef<str>, email: impl AsRef<str>) -> Result<Self> {
        let name = name.as_ref().trim();
        let email = email.as_ref().trim();

        if name.chars().count() < MIN_NAME_LEN {
            return Err(PupError::InvalidCredentials(format!(
                "name must be at least {} characters",
                MIN_NAME_LEN
            )));
        }
        if !EMAIL_PATTERN.is_match(email) {
            return Err(PupError::InvalidCredentials(
                "email must be a valid address".to_string(),
            ));
        }

        Ok(Self {
            name: name.to_string(),
            email: email.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Client-side record of an authenticated session.
///
/// Used only for gating; the server keeps its own session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub name: String,
    pub email: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Issues a record valid for `ttl` from `now`.
    pub fn issue(credentials: &Credentials, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            name: credentials.name().to_string(),
            email: credentials.email().to_string(),
            issued_at: now,
            expires_at: now + ttl,
        }
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }
}
