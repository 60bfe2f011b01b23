//! Command-line front end for the recipe search store.
//!
//! Reads its configuration from the environment (see `ClientConfig::from_env`),
//! e.g. `SPOONACULAR_API_KEY=... recipe-finder search pasta --max-calories 500`.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use recipe_finder::{
    CommandOutcome, Diet, Recipe, RecipeRepository, SearchQuery, SearchStore, SpoonacularClient,
};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "recipe-finder")]
#[command(version, about = "Search the Spoonacular recipe catalog", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search recipes
    Search {
        /// Free-text search term
        #[arg(default_value = "")]
        term: String,
        /// Diet filter, e.g. "Vegan" or "Gluten Free"
        #[arg(short, long)]
        diet: Option<Diet>,
        /// Cuisine filter, e.g. "Italian"
        #[arg(short, long)]
        cuisine: Option<String>,
        /// Maximum calories per serving
        #[arg(short, long)]
        max_calories: Option<u32>,
    },
    /// Show the details of a recipe
    Show {
        /// Recipe id as printed by `search`
        id: i64,
    },
    /// List the accepted diet filters
    Diets,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Commands::Diets = cli.command {
        for diet in Diet::ALL {
            println!("{diet}");
        }
        return Ok(());
    }

    let client = SpoonacularClient::from_env()?;
    info!(base_url = %client.config().base_url(), "using recipe catalog");
    let store = SearchStore::new(RecipeRepository::new(Arc::new(client)));

    match cli.command {
        Commands::Search {
            term,
            diet,
            cuisine,
            max_calories,
        } => {
            let query = SearchQuery::new(term)
                .diet(diet)
                .cuisine(cuisine)
                .max_calories(max_calories);
            check(store.search(query).await)?;

            let recipes = store.recipes().get();
            if recipes.is_empty() {
                println!("No recipes found");
            }
            for recipe in recipes {
                println!("{:>8}  {}", recipe.id, recipe.title);
                match recipe.ingredient_names() {
                    Some(names) => println!("          Ingredients: {names}"),
                    None => println!("          Ingredients not available"),
                }
            }
        }
        Commands::Show { id } => {
            check(store.load_details(id).await)?;
            if let Some(recipe) = store.recipe_details().get() {
                print_details(&recipe);
            }
        }
        Commands::Diets => {}
    }

    Ok(())
}

fn check(outcome: CommandOutcome) -> Result<()> {
    if let CommandOutcome::Failed(e) = outcome {
        bail!("{e}");
    }
    Ok(())
}

fn print_details(recipe: &Recipe) {
    println!("{}", recipe.title);
    println!("{}", recipe.image);
    println!();
    println!("Ingredients");
    for ingredient in &recipe.extended_ingredients {
        println!("  {ingredient}");
    }
    println!();
    println!("Instructions");
    println!(
        "  {}",
        recipe
            .instructions
            .as_deref()
            .unwrap_or("Instructions not available")
    );
}
