//! Authentication selection for the GitGuardian API client.
//!
//! Driven by `GITGUARDIAN_*` environment variables. Supports static API-key
//! ("token") and browser-based OAuth ("web") authentication.

use crate::error::{Error, Result};
use std::fmt;
use tracing::{debug, error};

/// Environment variable selecting the authentication method.
pub const AUTH_METHOD_VAR: &str = "GITGUARDIAN_AUTH_METHOD";

/// Environment variable holding the static API key (token auth only).
pub const API_KEY_VAR: &str = "GITGUARDIAN_API_KEY";

/// Environment variable overriding the API base URL.
pub const API_URL_VAR: &str = "GITGUARDIAN_API_URL";

/// Method used when `GITGUARDIAN_AUTH_METHOD` is unset.
pub const DEFAULT_AUTH_METHOD: &str = "web";

/// How the client authenticates against the GitGuardian API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    /// Static, long-lived API key
    Token,
    /// Interactive browser-based OAuth handshake, no static key
    Web,
}

impl AuthMethod {
    /// Parse a method selector, case-insensitively.
    ///
    /// Anything other than `token` or `web` is a configuration error naming
    /// the unsupported method.
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "token" => Ok(Self::Token),
            "web" => Ok(Self::Web),
            other => {
                error!(method = other, "unsupported authentication method");
                Err(Error::UnsupportedAuthMethod(other.to_string()))
            }
        }
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token => write!(f, "token"),
            Self::Web => write!(f, "web"),
        }
    }
}

/// Resolved authentication selection for client construction
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Selected authentication method
    pub method: AuthMethod,
    /// Static API key; always `None` for web auth
    pub api_key: Option<String>,
    /// API base URL override, if any
    pub api_url: Option<String>,
}

impl AuthConfig {
    /// Resolve the authentication selection from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve the authentication selection from an arbitrary lookup.
    ///
    /// The lookup receives an environment variable name and returns its
    /// value if set. Missing method defaults to `web`; an empty URL override
    /// counts as unset; for token auth an empty key counts as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let method_raw =
            lookup(AUTH_METHOD_VAR).unwrap_or_else(|| DEFAULT_AUTH_METHOD.to_string());
        let method = AuthMethod::parse(&method_raw)?;

        let api_url = lookup(API_URL_VAR).filter(|url| !url.is_empty());
        if let Some(url) = &api_url {
            debug!(api_url = %url, "GITGUARDIAN_API_URL override is set");
        } else {
            debug!("GITGUARDIAN_API_URL not set, using default");
        }

        let api_key = match method {
            AuthMethod::Token => {
                let Some(key) = lookup(API_KEY_VAR).filter(|key| !key.is_empty()) else {
                    error!("GITGUARDIAN_API_KEY environment variable is not set");
                    return Err(Error::MissingApiKey);
                };
                debug!("GITGUARDIAN_API_KEY environment variable is set");
                debug!(key_preview = %key_preview(&key), "API key prefix");
                Some(key)
            }
            AuthMethod::Web => {
                debug!("using web-based OAuth authentication");
                None
            }
        };

        Ok(Self {
            method,
            api_key,
            api_url,
        })
    }
}

/// Redacted preview of an API key, safe for diagnostics.
///
/// Shows the first four characters followed by `...`; keys of four
/// characters or fewer are fully masked.
pub fn key_preview(key: &str) -> String {
    if key.chars().count() > 4 {
        let prefix: String = key.chars().take(4).collect();
        format!("{prefix}...")
    } else {
        "***".to_string()
    }
}
