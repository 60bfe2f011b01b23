//! UniFFI bindings for cross-platform support (iOS, Android).
//!
//! This module provides FFI-safe types and functions for use with UniFFI.
//! Recipes cross the boundary as plain records; the store is exposed as an
//! object with async commands and snapshot getters.

use crate::client::{ApiError, ClientConfig, ConfigError, RecipeApi, SpoonacularClient};
use crate::model::{Diet, Ingredient, Recipe, SearchQuery};
use crate::repository::RecipeRepository;
use crate::store::{Command, CommandFailure, SearchStore};
use std::sync::Arc;

/// FFI-safe error type that wraps all possible errors.
#[derive(Debug, uniffi::Error, thiserror::Error)]
pub enum RecipeFinderError {
    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Decode error: {message}")]
    Decode { message: String },

    #[error("Remote error {status}: {}", .message.clone().unwrap_or_default())]
    Remote { status: u16, message: Option<String> },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl From<&ApiError> for RecipeFinderError {
    fn from(e: &ApiError) -> Self {
        match e {
            ApiError::Network(e) => RecipeFinderError::Network {
                message: e.to_string(),
            },
            ApiError::Decode(e) => RecipeFinderError::Decode {
                message: e.to_string(),
            },
            ApiError::Remote { status, message } => RecipeFinderError::Remote {
                status: *status,
                message: message.clone(),
            },
        }
    }
}

impl From<ConfigError> for RecipeFinderError {
    fn from(e: ConfigError) -> Self {
        RecipeFinderError::Config {
            message: e.to_string(),
        }
    }
}

/// FFI-safe representation of an ingredient line.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiIngredient {
    pub id: i64,
    pub name: String,
    pub amount: f64,
    pub unit: String,
    /// Display line, e.g. "flour: 250 grams"
    pub display: String,
}

impl From<&Ingredient> for FfiIngredient {
    fn from(i: &Ingredient) -> Self {
        FfiIngredient {
            id: i.id,
            name: i.name.clone(),
            amount: i.amount,
            unit: i.unit.clone(),
            display: i.to_string(),
        }
    }
}

/// FFI-safe representation of a recipe.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiRecipe {
    pub id: i64,
    pub title: String,
    pub image: String,
    pub summary: Option<String>,
    /// Plain text for detail records
    pub instructions: Option<String>,
    pub ingredients: Vec<FfiIngredient>,
    /// Ingredient names joined with ", ", absent when there are none
    pub ingredient_names: Option<String>,
}

impl From<&Recipe> for FfiRecipe {
    fn from(r: &Recipe) -> Self {
        FfiRecipe {
            id: r.id,
            title: r.title.clone(),
            image: r.image.clone(),
            summary: r.summary.clone(),
            instructions: r.instructions.clone(),
            ingredients: r.extended_ingredients.iter().map(FfiIngredient::from).collect(),
            ingredient_names: r.ingredient_names(),
        }
    }
}

/// The most recent failed command.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiCommandFailure {
    /// Recipe id for failed detail fetches, absent for failed searches
    pub recipe_id: Option<i64>,
    /// HTTP status when the server rejected the request
    pub status: Option<u16>,
    pub message: String,
}

impl From<&CommandFailure> for FfiCommandFailure {
    fn from(f: &CommandFailure) -> Self {
        let recipe_id = match f.command {
            Command::Search => None,
            Command::LoadDetails { id } => Some(id),
        };
        let status = match f.error.as_ref() {
            ApiError::Remote { status, .. } => Some(*status),
            _ => None,
        };
        FfiCommandFailure {
            recipe_id,
            status,
            message: RecipeFinderError::from(f.error.as_ref()).to_string(),
        }
    }
}

/// Search and detail state for one screen or session.
///
/// This is the main type used by the mobile front end.
#[derive(uniffi::Object)]
pub struct FfiSearchStore {
    inner: Arc<SearchStore<dyn RecipeApi>>,
}

impl FfiSearchStore {
    fn with_api(api: Arc<dyn RecipeApi>) -> Self {
        FfiSearchStore {
            inner: Arc::new(SearchStore::new(RecipeRepository::new(api))),
        }
    }
}

#[uniffi::export(async_runtime = "tokio")]
impl FfiSearchStore {
    /// Creates a store talking to the Spoonacular API.
    ///
    /// # Arguments
    /// * `api_key` - Spoonacular API key
    /// * `base_url` - Optional endpoint override, e.g. for a proxy
    #[uniffi::constructor]
    pub fn new(api_key: String, base_url: Option<String>) -> Result<Arc<Self>, RecipeFinderError> {
        let mut builder = ClientConfig::builder().api_key(api_key);
        if let Some(url) = base_url {
            builder = builder.base_url(url);
        }
        let client = SpoonacularClient::new(builder.build()?)?;
        Ok(Arc::new(Self::with_api(Arc::new(client))))
    }

    /// Searches recipes and replaces the result list.
    ///
    /// Returns true if the result list was updated. On failure the previous
    /// list is kept and the error is available from `last_failure()`.
    pub async fn search(
        &self,
        term: String,
        diet: Option<Diet>,
        cuisine: Option<String>,
        max_calories: Option<u32>,
    ) -> bool {
        let query = SearchQuery::new(term)
            .diet(diet)
            .cuisine(cuisine)
            .max_calories(max_calories);
        self.inner.search(query).await.is_updated()
    }

    /// Loads a recipe and makes it the selected one.
    ///
    /// Returns true if the selection was updated.
    pub async fn load_details(&self, id: i64) -> bool {
        self.inner.load_details(id).await.is_updated()
    }

    /// Returns the current search results.
    pub fn recipes(&self) -> Vec<FfiRecipe> {
        self.inner.recipes().get().iter().map(FfiRecipe::from).collect()
    }

    /// Returns the selected recipe, if any.
    pub fn recipe_details(&self) -> Option<FfiRecipe> {
        self.inner.recipe_details().get().as_ref().map(FfiRecipe::from)
    }

    /// Returns the most recent failure not yet superseded by a success.
    pub fn last_failure(&self) -> Option<FfiCommandFailure> {
        self.inner
            .last_failure()
            .get()
            .as_ref()
            .map(FfiCommandFailure::from)
    }
}

// ============================================================================
// Exported FFI Functions
// ============================================================================

/// Returns the diet filters in picker order.
#[uniffi::export]
pub fn diet_options() -> Vec<Diet> {
    Diet::ALL.to_vec()
}

/// Returns the display label of a diet.
#[uniffi::export]
pub fn diet_label(diet: Diet) -> String {
    diet.label().to_string()
}

/// Parses a diet from its label, ignoring case.
#[uniffi::export]
pub fn parse_diet(label: String) -> Option<Diet> {
    label.parse().ok()
}

/// Parses the free-text calorie field of the search form.
///
/// Returns `None` for anything that is not a non-negative integer.
#[uniffi::export]
pub fn parse_max_calories(input: String) -> Option<u32> {
    SearchQuery::parse_max_calories(&input)
}

/// Returns the library version.
#[uniffi::export]
pub fn library_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
