//! Observable search and detail state.
//!
//! [`SearchStore`] owns the current result list and the currently selected
//! recipe. Both change only through the store's two commands, and consumers
//! observe them through read-only [`Projection`]s.
//!
//! Overlapping commands are neither serialized nor cancelled. When two calls
//! of the same command overlap, the one that completes last determines the
//! final state, regardless of which was issued first.

mod projection;

pub use projection::Projection;

use crate::client::{ApiError, RecipeApi};
use crate::model::{Recipe, SearchQuery};
use crate::repository::RecipeRepository;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Identifies a store command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Search,
    LoadDetails { id: i64 },
}

impl Command {
    fn same_kind(&self, other: &Command) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// A command that ended in an error.
#[derive(Debug, Clone)]
pub struct CommandFailure {
    pub command: Command,
    pub error: Arc<ApiError>,
}

/// Result of running a store command.
#[derive(Debug, Clone)]
pub enum CommandOutcome {
    /// The projection was replaced with the response.
    Updated,
    /// The request failed and the projection was left as it was.
    Failed(Arc<ApiError>),
}

impl CommandOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, CommandOutcome::Updated)
    }
}

/// Owner of the search results and the selected recipe.
pub struct SearchStore<A: ?Sized> {
    repository: RecipeRepository<A>,
    recipes: watch::Sender<Vec<Recipe>>,
    recipe_details: watch::Sender<Option<Recipe>>,
    last_failure: watch::Sender<Option<CommandFailure>>,
}

impl<A: RecipeApi + ?Sized> SearchStore<A> {
    /// Creates a store with an empty result list and no selected recipe.
    pub fn new(repository: RecipeRepository<A>) -> Self {
        let (recipes, _) = watch::channel(Vec::new());
        let (recipe_details, _) = watch::channel(None);
        let (last_failure, _) = watch::channel(None);

        SearchStore {
            repository,
            recipes,
            recipe_details,
            last_failure,
        }
    }

    /// Runs a search and replaces the result list with the response.
    ///
    /// On failure the previous result list is kept and the failure is
    /// published through [`SearchStore::last_failure`].
    pub async fn search(&self, query: SearchQuery) -> CommandOutcome {
        match self.repository.search_recipes(&query).await {
            Ok(results) => {
                tracing::debug!(term = %query.term, count = results.len(), "replacing search results");
                self.recipes.send_replace(results);
                self.clear_failure(Command::Search);
                CommandOutcome::Updated
            }
            Err(e) => self.fail(Command::Search, e),
        }
    }

    /// Fetches a recipe and makes it the selected one.
    ///
    /// On failure the previously selected recipe is kept and the failure is
    /// published through [`SearchStore::last_failure`].
    pub async fn load_details(&self, id: i64) -> CommandOutcome {
        match self.repository.get_recipe_details(id).await {
            Ok(recipe) => {
                tracing::debug!(id, title = %recipe.title, "replacing recipe details");
                self.recipe_details.send_replace(Some(recipe));
                self.clear_failure(Command::LoadDetails { id });
                CommandOutcome::Updated
            }
            Err(e) => self.fail(Command::LoadDetails { id }, e),
        }
    }

    /// Current search results, in server order.
    pub fn recipes(&self) -> Projection<Vec<Recipe>> {
        Projection::new(self.recipes.subscribe())
    }

    /// The selected recipe, absent until a detail fetch succeeds.
    pub fn recipe_details(&self) -> Projection<Option<Recipe>> {
        Projection::new(self.recipe_details.subscribe())
    }

    /// The most recent failure that was not followed by a success of the same command.
    pub fn last_failure(&self) -> Projection<Option<CommandFailure>> {
        Projection::new(self.last_failure.subscribe())
    }

    fn fail(&self, command: Command, error: ApiError) -> CommandOutcome {
        tracing::warn!(?command, error = %error, "command failed, keeping previous state");
        let error = Arc::new(error);
        self.last_failure.send_replace(Some(CommandFailure {
            command,
            error: Arc::clone(&error),
        }));
        CommandOutcome::Failed(error)
    }

    fn clear_failure(&self, command: Command) {
        self.last_failure.send_if_modified(|failure| {
            let superseded = matches!(failure, Some(f) if f.command.same_kind(&command));
            if superseded {
                *failure = None;
            }
            superseded
        });
    }
}

impl<A: RecipeApi + ?Sized + 'static> SearchStore<A> {
    /// Runs [`SearchStore::search`] in the background on the current tokio runtime.
    pub fn spawn_search(self: &Arc<Self>, query: SearchQuery) -> JoinHandle<CommandOutcome> {
        let store = Arc::clone(self);
        tokio::spawn(async move { store.search(query).await })
    }

    /// Runs [`SearchStore::load_details`] in the background on the current tokio runtime.
    pub fn spawn_load_details(self: &Arc<Self>, id: i64) -> JoinHandle<CommandOutcome> {
        let store = Arc::clone(self);
        tokio::spawn(async move { store.load_details(id).await })
    }
}
