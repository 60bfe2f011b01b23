//! Data types exchanged with the remote recipe catalog.

mod query;
mod recipe;

pub use query::{Diet, SearchQuery, UnknownDiet};
pub use recipe::{Ingredient, Recipe, SearchResponse};
