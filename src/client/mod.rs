//! Remote recipe catalog client.
//!
//! This module translates the two queries the app needs (search and detail)
//! into HTTP GET requests against the Spoonacular API and decodes the typed
//! JSON responses. It never caches and never retries.

mod config;

pub use config::{
    ClientConfig, ClientConfigBuilder, ConfigError, DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE,
};

use crate::model::{Recipe, SearchQuery, SearchResponse};
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when talking to the remote catalog.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Server returned {status}{}", .message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
    Remote { status: u16, message: Option<String> },
}

/// Read-only queries against a recipe catalog.
///
/// Implementations hold no mutable shared state and may be called
/// concurrently.
#[async_trait]
pub trait RecipeApi: Send + Sync {
    /// Runs a filtered search and returns the raw response envelope.
    async fn search_recipes(&self, query: &SearchQuery) -> Result<SearchResponse, ApiError>;

    /// Fetches the full record of a recipe by its server-assigned id.
    async fn get_recipe_details(&self, id: i64) -> Result<Recipe, ApiError>;
}

/// [`RecipeApi`] implementation backed by the Spoonacular REST API.
pub struct SpoonacularClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl SpoonacularClient {
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(SpoonacularClient { http, config })
    }

    /// Creates a client configured from the environment.
    ///
    /// See [`ClientConfig::from_env`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Builds the URL of `recipes/complexSearch` for a query.
    pub(crate) fn search_url(&self, query: &SearchQuery) -> Url {
        let mut url = self.endpoint(&["recipes", "complexSearch"]);
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("query", &query.term);
            if let Some(diet) = query.diet {
                pairs.append_pair("diet", diet.label());
            }
            if let Some(cuisine) = &query.cuisine {
                pairs.append_pair("cuisine", cuisine);
            }
            if let Some(max_calories) = query.max_calories {
                pairs.append_pair("maxCalories", &max_calories.to_string());
            }
            pairs
                .append_pair("number", &self.config.page_size.to_string())
                .append_pair("instructionsRequired", "true")
                .append_pair("addRecipeInformation", "true")
                .append_pair("fillIngredients", "true")
                .append_pair("addRecipeNutrition", "true")
                .append_pair("apiKey", &self.config.api_key);
        }
        url
    }

    /// Builds the URL of `recipes/{id}/information`.
    pub(crate) fn detail_url(&self, id: i64) -> Url {
        let mut url = self.endpoint(&["recipes", &id.to_string(), "information"]);
        url.query_pairs_mut().append_pair("apiKey", &self.config.api_key);
        url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.config.base_url.clone();
        // The config only accepts http(s) base URLs, which always have path segments.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        tracing::debug!(path = url.path(), "requesting");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(status = status.as_u16(), bytes = body.len(), "response received");
        decode_response(status, &body)
    }
}

#[async_trait]
impl RecipeApi for SpoonacularClient {
    async fn search_recipes(&self, query: &SearchQuery) -> Result<SearchResponse, ApiError> {
        self.get_json(self.search_url(query)).await
    }

    async fn get_recipe_details(&self, id: i64) -> Result<Recipe, ApiError> {
        self.get_json(self.detail_url(id)).await
    }
}

/// Body of an error response, e.g.
/// `{"status": "failure", "code": 402, "message": "Your daily points limit ..."}`
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Maps a status code and response body to a typed result.
fn decode_response<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, ApiError> {
    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .or_else(|| Some(body.trim().to_string()))
            .filter(|m| !m.is_empty());

        return Err(ApiError::Remote {
            status: status.as_u16(),
            message,
        });
    }

    Ok(serde_json::from_str(body)?)
}
