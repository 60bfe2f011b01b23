pub mod client;
pub mod ffi;
pub mod model;
pub mod repository;
pub mod sanitize;
pub mod store;

pub use client::{ApiError, ClientConfig, RecipeApi, SpoonacularClient};
pub use model::*;
pub use repository::RecipeRepository;
pub use store::{Command, CommandFailure, CommandOutcome, Projection, SearchStore};

uniffi::setup_scaffolding!();
