use serde::{Deserialize, Serialize};
use std::fmt;

/// A recipe as returned by the remote catalog.
///
/// The same shape is used for search results and for the detail endpoint.
/// Search results carry whatever the server chose to inline; the detail
/// record is the authoritative one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Server-assigned identifier
    pub id: i64,
    pub title: String,
    /// URL of the title image
    #[serde(default)]
    pub image: String,
    /// Short description, may contain HTML markup
    #[serde(default)]
    pub summary: Option<String>,
    /// Cooking instructions. Plain text once the recipe went through the repository.
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub extended_ingredients: Vec<Ingredient>,
}

impl Recipe {
    /// Returns the ingredient names joined with `", "`.
    ///
    /// Returns `None` when the recipe lists no ingredients.
    pub fn ingredient_names(&self) -> Option<String> {
        if self.extended_ingredients.is_empty() {
            return None;
        }

        let names: Vec<&str> = self
            .extended_ingredients
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        Some(names.join(", "))
    }

    /// Returns a copy with `instructions` replaced.
    pub fn with_instructions(self, instructions: Option<String>) -> Self {
        Recipe {
            instructions,
            ..self
        }
    }
}

/// One ingredient line of a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub amount: f64,
    /// Unit of `amount`, e.g. "grams". Empty for countable items.
    #[serde(default)]
    pub unit: String,
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.amount)?;
        if !self.unit.is_empty() {
            write!(f, " {}", self.unit)?;
        }
        Ok(())
    }
}

/// Envelope of the search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<Recipe>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_deserialize_detail() {
        let json = indoc! {r#"
            {
                "id": 716429,
                "title": "Pasta with Garlic",
                "image": "https://img.spoonacular.com/recipes/716429-556x370.jpg",
                "summary": "A <b>simple</b> dish",
                "instructions": "<ol><li>Boil pasta</li></ol>",
                "readyInMinutes": 45,
                "extendedIngredients": [
                    {"id": 1001, "name": "butter", "amount": 1.5, "unit": "tbsp", "aisle": "Milk"},
                    {"id": 11215, "name": "garlic", "amount": 2.0, "unit": "cloves"}
                ]
            }"#};

        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.id, 716429);
        assert_eq!(recipe.title, "Pasta with Garlic");
        assert_eq!(recipe.summary.as_deref(), Some("A <b>simple</b> dish"));
        assert_eq!(recipe.extended_ingredients.len(), 2);
        assert_eq!(recipe.extended_ingredients[0].name, "butter");
        assert_eq!(recipe.extended_ingredients[0].amount, 1.5);
    }

    #[test]
    fn test_missing_optional_fields() {
        let json = r#"{"id": 42, "title": "Soup", "image": "soup.jpg"}"#;

        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.summary, None);
        assert_eq!(recipe.instructions, None);
        assert!(recipe.extended_ingredients.is_empty());
    }

    #[test]
    fn test_null_instructions() {
        let json = r#"{"id": 42, "title": "Soup", "image": "soup.jpg", "instructions": null}"#;

        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.instructions, None);
    }

    #[test]
    fn test_ingredient_names() {
        let mut recipe: Recipe =
            serde_json::from_str(r#"{"id": 1, "title": "Toast", "image": ""}"#).unwrap();
        assert_eq!(recipe.ingredient_names(), None);

        recipe.extended_ingredients = vec![
            Ingredient {
                id: 1,
                name: "bread".to_string(),
                amount: 2.0,
                unit: "slices".to_string(),
            },
            Ingredient {
                id: 2,
                name: "butter".to_string(),
                amount: 1.0,
                unit: "tbsp".to_string(),
            },
        ];
        assert_eq!(recipe.ingredient_names().unwrap(), "bread, butter");
    }

    #[test]
    fn test_ingredient_display() {
        let ingredient = Ingredient {
            id: 1,
            name: "flour".to_string(),
            amount: 250.0,
            unit: "grams".to_string(),
        };
        assert_eq!(ingredient.to_string(), "flour: 250 grams");

        let eggs = Ingredient {
            id: 2,
            name: "eggs".to_string(),
            amount: 3.0,
            unit: String::new(),
        };
        assert_eq!(eggs.to_string(), "eggs: 3");
    }
}
