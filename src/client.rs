//! GitGuardian API client construction.
//!
//! Builds the HTTP client handle the MCP servers talk through. Only
//! construction and identity live here; the servers own the API calls.

use crate::auth::{AuthConfig, AuthMethod, key_preview};
use crate::error::{Error, Result};
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use std::fmt;
use tracing::{debug, error};
use url::Url;

/// Default GitGuardian API base URL.
pub const DEFAULT_API_URL: &str = "https://api.gitguardian.com/v1";

/// User agent presented by the underlying HTTP client.
const USER_AGENT: &str = concat!("gg-mcp/", env!("CARGO_PKG_VERSION"));

/// Options for constructing a [`GitGuardianClient`]
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    /// Static API key; required unless `use_oauth` is set
    pub api_key: Option<String>,
    /// API base URL; defaults to [`DEFAULT_API_URL`]
    pub api_url: Option<String>,
    /// Authenticate through the browser-based OAuth flow instead of a key
    pub use_oauth: bool,
    /// Name of the MCP server this client serves, for token storage
    /// disambiguation when several servers share one workstation
    pub server_name: Option<String>,
}

/// Handle to the GitGuardian API
pub struct GitGuardianClient {
    http: Client,
    api_key: Option<String>,
    api_url: String,
    use_oauth: bool,
    server_name: Option<String>,
}

impl GitGuardianClient {
    /// Create a client from explicit options.
    ///
    /// Key-authenticated clients carry an `Authorization: Token {key}`
    /// default header; OAuth clients carry no static credential.
    pub fn new(options: ClientOptions) -> Result<Self> {
        debug!("initializing GitGuardian client");

        if !options.use_oauth && options.api_key.is_none() {
            error!("GitGuardian API key is missing");
            return Err(Error::Client("GitGuardian API key is required".to_string()));
        }

        let api_url = options
            .api_url
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Url::parse(&api_url)
            .map_err(|e| Error::Client(format!("invalid API URL '{api_url}': {e}")))?;
        debug!(api_url = %api_url, "using API URL");

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(key) = &options.api_key {
            debug!(key_preview = %key_preview(key), "using static API key");
            let mut value = HeaderValue::from_str(&format!("Token {key}"))
                .map_err(|e| Error::Client(format!("API key is not a valid header value: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Client(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_key: options.api_key,
            api_url,
            use_oauth: options.use_oauth,
            server_name: options.server_name,
        })
    }

    /// Create a client from the process environment.
    ///
    /// The method comes from `GITGUARDIAN_AUTH_METHOD` (default `web`);
    /// token auth additionally requires `GITGUARDIAN_API_KEY`. The server
    /// name is attached to the client on success.
    pub fn from_env(server_name: Option<&str>) -> Result<Self> {
        debug!("attempting to initialize GitGuardian client");
        let config = AuthConfig::from_env()?;
        Self::from_config(config, server_name)
    }

    /// Create a client from an already-resolved authentication selection.
    pub fn from_config(config: AuthConfig, server_name: Option<&str>) -> Result<Self> {
        let options = ClientOptions {
            api_key: config.api_key,
            api_url: config.api_url,
            use_oauth: config.method == AuthMethod::Web,
            server_name: server_name.map(ToString::to_string),
        };

        let client = Self::new(options)
            .inspect_err(|e| error!(error = %e, "failed to initialize GitGuardian client"))?;

        match config.method {
            AuthMethod::Token => {
                debug!("GitGuardian client initialized using token authentication");
            }
            AuthMethod::Web => {
                debug!("GitGuardian client initialized using OAuth authentication");
            }
        }

        Ok(client)
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &Client {
        &self.http
    }

    /// The static API key, if this client uses token auth.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// The API base URL this client targets.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Whether this client authenticates through the OAuth flow.
    pub fn uses_oauth(&self) -> bool {
        self.use_oauth
    }

    /// The MCP server name attached to this client, if any.
    pub fn server_name(&self) -> Option<&str> {
        self.server_name.as_deref()
    }
}

// Hand-written so the key never reaches logs or panic output in full.
impl fmt::Debug for GitGuardianClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitGuardianClient")
            .field("api_url", &self.api_url)
            .field("use_oauth", &self.use_oauth)
            .field("server_name", &self.server_name)
            .field("api_key", &self.api_key.as_deref().map(key_preview))
            .finish_non_exhaustive()
    }
}
