//! Business-logic layer between the state store and the remote client.

use crate::client::{ApiError, RecipeApi};
use crate::model::{Recipe, SearchQuery};
use crate::sanitize::html_to_text;
use std::sync::Arc;

/// Wraps a [`RecipeApi`] and shapes its responses for consumers.
///
/// Search results are unwrapped from their envelope; detail records get
/// their HTML instructions rendered to plain text. Errors pass through
/// unchanged.
pub struct RecipeRepository<A: ?Sized> {
    api: Arc<A>,
}

impl<A: ?Sized> Clone for RecipeRepository<A> {
    fn clone(&self) -> Self {
        RecipeRepository {
            api: Arc::clone(&self.api),
        }
    }
}

impl<A: RecipeApi + ?Sized> RecipeRepository<A> {
    pub fn new(api: Arc<A>) -> Self {
        RecipeRepository { api }
    }

    /// Returns the recipes matching `query`, in server order.
    pub async fn search_recipes(&self, query: &SearchQuery) -> Result<Vec<Recipe>, ApiError> {
        let response = self.api.search_recipes(query).await?;
        tracing::debug!(term = %query.term, count = response.results.len(), "search completed");
        Ok(response.results)
    }

    /// Returns the detail record of a recipe with plain-text instructions.
    pub async fn get_recipe_details(&self, id: i64) -> Result<Recipe, ApiError> {
        tracing::debug!(id, "fetching recipe details");
        let recipe = self.api.get_recipe_details(id).await?;
        Ok(sanitize_instructions(recipe))
    }
}

/// Replaces markup in `instructions` with its text rendering. Absent stays absent.
fn sanitize_instructions(recipe: Recipe) -> Recipe {
    let instructions = recipe.instructions.as_deref().map(html_to_text);
    recipe.with_instructions(instructions)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::{Ingredient, SearchResponse};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory catalog for tests.
    ///
    /// Searches answer with the configured list, details are looked up by id.
    /// Every received query is recorded.
    #[derive(Default)]
    pub(crate) struct FakeApi {
        pub(crate) search_results: Mutex<Option<Vec<Recipe>>>,
        pub(crate) details: Mutex<HashMap<i64, Recipe>>,
        pub(crate) queries: Mutex<Vec<SearchQuery>>,
    }

    impl FakeApi {
        pub(crate) fn with_search_results(results: Vec<Recipe>) -> Self {
            let api = FakeApi::default();
            *api.search_results.lock().unwrap() = Some(results);
            api
        }

        pub(crate) fn with_detail(self, recipe: Recipe) -> Self {
            self.details.lock().unwrap().insert(recipe.id, recipe);
            self
        }
    }

    #[async_trait]
    impl RecipeApi for FakeApi {
        async fn search_recipes(&self, query: &SearchQuery) -> Result<SearchResponse, ApiError> {
            self.queries.lock().unwrap().push(query.clone());
            match self.search_results.lock().unwrap().clone() {
                Some(results) => Ok(SearchResponse { results }),
                None => Err(ApiError::Remote {
                    status: 503,
                    message: Some("Service unavailable".to_string()),
                }),
            }
        }

        async fn get_recipe_details(&self, id: i64) -> Result<Recipe, ApiError> {
            self.details
                .lock()
                .unwrap()
                .get(&id)
                .cloned()
                .ok_or(ApiError::Remote {
                    status: 404,
                    message: Some(format!("A recipe with the id {id} does not exist.")),
                })
        }
    }

    pub(crate) fn recipe(id: i64, title: &str) -> Recipe {
        Recipe {
            id,
            title: title.to_string(),
            image: format!("https://img.example.com/{id}.jpg"),
            summary: None,
            instructions: None,
            extended_ingredients: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_search_unwraps_results_in_order() {
        let api = Arc::new(FakeApi::with_search_results(vec![
            recipe(3, "Carbonara"),
            recipe(1, "Arrabbiata"),
            recipe(3, "Carbonara"),
        ]));
        let repository = RecipeRepository::new(api.clone());

        let query = SearchQuery::new("pasta").max_calories(Some(500));
        let results = repository.search_recipes(&query).await.unwrap();

        let ids: Vec<i64> = results.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1, 3]);
        assert_eq!(api.queries.lock().unwrap().as_slice(), &[query]);
    }

    #[tokio::test]
    async fn test_search_error_passes_through() {
        let repository = RecipeRepository::new(Arc::new(FakeApi::default()));

        let result = repository.search_recipes(&SearchQuery::new("pasta")).await;
        assert!(matches!(
            result,
            Err(ApiError::Remote { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn test_details_sanitizes_instructions() {
        let mut soup = recipe(42, "Soup");
        soup.instructions = Some("<p>Boil</p>".to_string());
        let repository = RecipeRepository::new(Arc::new(FakeApi::default().with_detail(soup)));

        let details = repository.get_recipe_details(42).await.unwrap();
        assert_eq!(details.id, 42);
        assert_eq!(details.title, "Soup");
        assert_eq!(details.instructions.as_deref(), Some("Boil"));
    }

    #[tokio::test]
    async fn test_details_leaves_other_fields_untouched() {
        let mut stew = recipe(7, "Stew");
        stew.summary = Some("A <b>hearty</b> stew".to_string());
        stew.instructions = Some("<ol><li>Brown the <em>beef</em></li><li>Simmer</li></ol>".to_string());
        stew.extended_ingredients = vec![Ingredient {
            id: 23572,
            name: "beef".to_string(),
            amount: 500.0,
            unit: "g".to_string(),
        }];
        let repository =
            RecipeRepository::new(Arc::new(FakeApi::default().with_detail(stew.clone())));

        let details = repository.get_recipe_details(7).await.unwrap();
        assert_eq!(details.instructions.as_deref(), Some("Brown the beef Simmer"));
        assert_eq!(details.summary, stew.summary);
        assert_eq!(details.image, stew.image);
        assert_eq!(details.extended_ingredients, stew.extended_ingredients);
    }

    #[tokio::test]
    async fn test_details_absent_instructions_stay_absent() {
        let repository =
            RecipeRepository::new(Arc::new(FakeApi::default().with_detail(recipe(5, "Salad"))));

        let details = repository.get_recipe_details(5).await.unwrap();
        assert_eq!(details.instructions, None);
    }

    #[tokio::test]
    async fn test_details_error_passes_through() {
        let repository = RecipeRepository::new(Arc::new(FakeApi::default()));

        let result = repository.get_recipe_details(99).await;
        assert!(matches!(
            result,
            Err(ApiError::Remote { status: 404, .. })
        ));
    }
}
