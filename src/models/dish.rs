use serde::{Deserialize, Deserializer, Serialize};

use super::MealType;

/// A menu item as served by the canteen backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dish {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "dish")]
    pub name: String,
    /// Identifier understood by the recipe lookup service, empty when the backend has none
    #[serde(rename = "dishId", default, deserialize_with = "string_or_number")]
    pub recipe_id: String,
}

impl Dish {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        recipe_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            recipe_id: recipe_id.into(),
        }
    }

    /// Case-insensitive substring match on the dish name.
    ///
    /// `needle` must already be lowercased.
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
    }
}

/// Envelope returned by `GET /{canteen_id}/{meal_type}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealListResponse {
    pub data: Vec<Dish>,
}

/// The dishes of one meal at one canteen, replaced wholesale on every fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealList {
    pub canteen_id: String,
    pub meal_type: MealType,
    pub dishes: Vec<Dish>,
}

impl MealList {
    pub fn new(canteen_id: impl Into<String>, meal_type: MealType, dishes: Vec<Dish>) -> Self {
        Self {
            canteen_id: canteen_id.into(),
            meal_type,
            dishes,
        }
    }

}

/// Subset of the recipe information payload we care about
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeInformation {
    #[serde(rename = "spoonacularSourceUrl")]
    pub source_url: String,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
        Other(serde_json::Value),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
        // null, objects and the like leave the dish without a recipe
        Raw::Other(_) => String::new(),
    })
}
