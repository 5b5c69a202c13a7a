//! Outfit domain model

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::clothing::{ClothingItem, Season};
use super::null_as_default;
use super::result::{Error, Result};

/// Minimum number of garments in a newly created outfit
pub const MIN_OUTFIT_ITEMS: usize = 2;

/// A named combination of garments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outfit {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub season: Season,
    /// Free-text label such as "Sunny" or "Rain"
    #[serde(default)]
    pub weather_conditions: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub favorite: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<ClothingItem>,
}

impl Outfit {
    pub fn item_ids(&self) -> Vec<i64> {
        self.items.iter().map(|item| item.id).collect()
    }
}

/// Fields submitted when creating or updating an outfit
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitForm {
    pub name: String,
    pub season: Season,
    pub weather_conditions: String,
    pub clothing_item_ids: Vec<i64>,
}

impl OutfitForm {
    pub fn new(name: impl Into<String>, clothing_item_ids: Vec<i64>) -> Self {
        Self {
            name: name.into(),
            season: Season::All,
            weather_conditions: String::new(),
            clothing_item_ids,
        }
    }

    pub fn with_season(mut self, season: Season) -> Self {
        self.season = season;
        self
    }

    pub fn with_weather(mut self, label: impl Into<String>) -> Self {
        self.weather_conditions = label.into();
        self
    }

    /// Build an update form from an existing outfit
    pub fn from_outfit(outfit: &Outfit) -> Self {
        Self {
            name: outfit.name.clone(),
            season: outfit.season,
            weather_conditions: outfit.weather_conditions.clone().unwrap_or_default(),
            clothing_item_ids: outfit.item_ids(),
        }
    }

    /// Drop duplicate item ids, keeping first occurrence order
    pub fn dedup_items(&mut self) {
        let mut seen = BTreeSet::new();
        self.clothing_item_ids.retain(|id| seen.insert(*id));
    }

    /// Checks applied when an outfit is first created
    pub fn validate_new(&self) -> Result<()> {
        self.validate_name()?;
        let distinct: BTreeSet<_> = self.clothing_item_ids.iter().collect();
        if distinct.len() < MIN_OUTFIT_ITEMS {
            return Err(Error::validation(format!(
                "Select at least {} different items to create an outfit",
                MIN_OUTFIT_ITEMS
            )));
        }
        Ok(())
    }

    /// Checks applied on update; the item count is not enforced here
    pub fn validate_name(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::validation("Outfit name is required"));
        }
        Ok(())
    }
}

/// Which slice of the user's outfits to list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutfitFilter {
    #[default]
    All,
    Favorites,
    Season(Season),
    Weather(String),
}
