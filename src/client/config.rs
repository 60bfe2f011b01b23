use reqwest::Url;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.spoonacular.com/";
pub const DEFAULT_PAGE_SIZE: u32 = 10;

const API_KEY_VAR: &str = "SPOONACULAR_API_KEY";
const BASE_URL_VAR: &str = "RECIPE_FINDER_BASE_URL";
const PAGE_SIZE_VAR: &str = "RECIPE_FINDER_PAGE_SIZE";

/// Errors that can occur while configuring the remote client.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing API key (set SPOONACULAR_API_KEY)")]
    MissingApiKey,

    #[error("Invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Invalid page size: {0}")]
    InvalidPageSize(String),

    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Settings of the remote recipe client.
#[derive(Clone)]
pub struct ClientConfig {
    pub(crate) base_url: Url,
    pub(crate) api_key: String,
    pub(crate) page_size: u32,
    pub(crate) timeout: Duration,
    pub(crate) user_agent: String,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .field("page_size", &self.page_size)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Builds a configuration from the process environment.
    ///
    /// Environment variables:
    /// - `SPOONACULAR_API_KEY`: API key (required)
    /// - `RECIPE_FINDER_BASE_URL`: catalog endpoint, defaults to the public Spoonacular API
    /// - `RECIPE_FINDER_PAGE_SIZE`: number of search results per request, defaults to 10
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = ClientConfig::builder();

        if let Ok(key) = std::env::var(API_KEY_VAR) {
            builder = builder.api_key(key);
        }
        if let Ok(url) = std::env::var(BASE_URL_VAR) {
            builder = builder.base_url(url);
        }
        if let Ok(size) = std::env::var(PAGE_SIZE_VAR) {
            let size = size
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPageSize(size.clone()))?;
            builder = builder.page_size(size);
        }

        builder.build()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }
}

/// Builder for [`ClientConfig`].
#[derive(Clone)]
pub struct ClientConfigBuilder {
    base_url: String,
    api_key: Option<String>,
    page_size: u32,
    timeout: Duration,
    user_agent: String,
}

impl Default for ClientConfigBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            page_size: DEFAULT_PAGE_SIZE,
            timeout: Duration::from_secs(30),
            user_agent: format!("recipe-finder/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfigBuilder {
    /// Set the catalog endpoint. A missing trailing slash is added.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the number of results requested per search. Must be at least 1.
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = size;
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let api_key = self
            .api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        if self.page_size == 0 {
            return Err(ConfigError::InvalidPageSize("0".to_string()));
        }

        let mut raw = self.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base_url = Url::parse(&raw).map_err(|e| ConfigError::InvalidBaseUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url: raw,
                reason: "expected an http(s) URL".to_string(),
            });
        }

        Ok(ClientConfig {
            base_url,
            api_key,
            page_size: self.page_size,
            timeout: self.timeout,
            user_agent: self.user_agent,
        })
    }
}
