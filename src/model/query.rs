use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Dietary pattern accepted by the search endpoint's `diet` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, uniffi::Enum)]
pub enum Diet {
    GlutenFree,
    Ketogenic,
    Vegetarian,
    LactoVegetarian,
    OvoVegetarian,
    Vegan,
    Pescetarian,
    Paleo,
    Primal,
    LowFodmap,
    Whole30,
}

impl Diet {
    /// All diets in the order a picker should offer them.
    pub const ALL: [Diet; 11] = [
        Diet::GlutenFree,
        Diet::Ketogenic,
        Diet::Vegetarian,
        Diet::LactoVegetarian,
        Diet::OvoVegetarian,
        Diet::Vegan,
        Diet::Pescetarian,
        Diet::Paleo,
        Diet::Primal,
        Diet::LowFodmap,
        Diet::Whole30,
    ];

    /// Human readable label. This is also the value sent as the `diet` parameter.
    pub fn label(&self) -> &'static str {
        match self {
            Diet::GlutenFree => "Gluten Free",
            Diet::Ketogenic => "Ketogenic",
            Diet::Vegetarian => "Vegetarian",
            Diet::LactoVegetarian => "Lacto-Vegetarian",
            Diet::OvoVegetarian => "Ovo-Vegetarian",
            Diet::Vegan => "Vegan",
            Diet::Pescetarian => "Pescetarian",
            Diet::Paleo => "Paleo",
            Diet::Primal => "Primal",
            Diet::LowFodmap => "Low FODMAP",
            Diet::Whole30 => "Whole30",
        }
    }
}

impl fmt::Display for Diet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unknown diet: {0}")]
pub struct UnknownDiet(pub String);

impl FromStr for Diet {
    type Err = UnknownDiet;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Diet::ALL
            .into_iter()
            .find(|d| d.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownDiet(s.to_string()))
    }
}

/// Parameters of a single search.
///
/// Absent filters are omitted from the request so the server applies no
/// filtering for them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Free-text term, may be empty
    pub term: String,
    pub diet: Option<Diet>,
    pub cuisine: Option<String>,
    pub max_calories: Option<u32>,
}

impl SearchQuery {
    pub fn new(term: impl Into<String>) -> Self {
        SearchQuery {
            term: term.into(),
            ..Default::default()
        }
    }

    pub fn diet(mut self, diet: Option<Diet>) -> Self {
        self.diet = diet;
        self
    }

    /// Sets the cuisine filter. Blank text means no filter.
    pub fn cuisine(mut self, cuisine: Option<impl Into<String>>) -> Self {
        self.cuisine = cuisine
            .map(Into::into)
            .map(|c: String| c.trim().to_string())
            .filter(|c| !c.is_empty());
        self
    }

    pub fn max_calories(mut self, max_calories: Option<u32>) -> Self {
        self.max_calories = max_calories;
        self
    }

    /// Parses the free-text calorie field of a search form.
    ///
    /// Anything that is not a non-negative integer means "no ceiling".
    pub fn parse_max_calories(input: &str) -> Option<u32> {
        input.trim().parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diet_from_label() {
        assert_eq!("Vegan".parse::<Diet>().unwrap(), Diet::Vegan);
        assert_eq!("gluten free".parse::<Diet>().unwrap(), Diet::GlutenFree);
        assert_eq!(" Low FODMAP ".parse::<Diet>().unwrap(), Diet::LowFodmap);
        assert_eq!(
            "carnivore".parse::<Diet>(),
            Err(UnknownDiet("carnivore".to_string()))
        );
    }

    #[test]
    fn test_diet_labels_round_trip() {
        for diet in Diet::ALL {
            assert_eq!(diet.label().parse::<Diet>().unwrap(), diet);
        }
    }

    #[test]
    fn test_blank_cuisine_is_no_filter() {
        let query = SearchQuery::new("curry").cuisine(Some("   "));
        assert_eq!(query.cuisine, None);

        let query = SearchQuery::new("curry").cuisine(Some(" Indian "));
        assert_eq!(query.cuisine.as_deref(), Some("Indian"));

        let query = SearchQuery::new("curry").cuisine(None::<String>);
        assert_eq!(query.cuisine, None);
    }

    #[test]
    fn test_parse_max_calories() {
        assert_eq!(SearchQuery::parse_max_calories("500"), Some(500));
        assert_eq!(SearchQuery::parse_max_calories(" 800 "), Some(800));
        assert_eq!(SearchQuery::parse_max_calories(""), None);
        assert_eq!(SearchQuery::parse_max_calories("-5"), None);
        assert_eq!(SearchQuery::parse_max_calories("lots"), None);
    }
}
