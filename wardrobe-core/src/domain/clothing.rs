//! Clothing item domain model

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::null_as_default;
use super::result::{Error, Result};

/// Kind of garment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Top,
    Bottom,
    Footwear,
    Outerwear,
    Accessory,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Top,
        Category::Bottom,
        Category::Footwear,
        Category::Outerwear,
        Category::Accessory,
    ];

    /// Name used on the wire and in URL paths
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Top => "Top",
            Category::Bottom => "Bottom",
            Category::Footwear => "Footwear",
            Category::Outerwear => "Outerwear",
            Category::Accessory => "Accessory",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                Error::validation(format!(
                    "Unknown category '{}'. Expected one of: top, bottom, footwear, outerwear, accessory",
                    s
                ))
            })
    }
}

/// Season a garment or outfit is meant for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Season {
    #[default]
    All,
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub const ALL: [Season; 5] = [
        Season::All,
        Season::Spring,
        Season::Summer,
        Season::Fall,
        Season::Winter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::All => "All",
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Season::ALL
            .into_iter()
            .find(|season| season.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                Error::validation(format!(
                    "Unknown season '{}'. Expected one of: all, spring, summer, fall, winter",
                    s
                ))
            })
    }
}

/// A garment in the user's wardrobe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClothingItem {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    pub category: Category,
    #[serde(default, deserialize_with = "null_as_default")]
    pub color: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub season: Season,
    /// File name under the static uploads path
    #[serde(default)]
    pub local_image_path: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub favorite: bool,
}

/// Fields submitted when creating or updating a garment
#[derive(Debug, Clone)]
pub struct ClothingItemForm {
    pub name: String,
    pub category: Category,
    pub color: String,
    pub season: Season,
    pub image: Option<PathBuf>,
}

impl ClothingItemForm {
    pub fn new(name: impl Into<String>, category: Category, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category,
            color: color.into(),
            season: Season::All,
            image: None,
        }
    }

    pub fn with_season(mut self, season: Season) -> Self {
        self.season = season;
        self
    }

    pub fn with_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.image = Some(path.into());
        self
    }

    /// Check required fields before anything is sent
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::validation("Item name is required"));
        }
        if self.color.trim().is_empty() {
            return Err(Error::validation("Item color is required"));
        }
        if let Some(path) = &self.image {
            if !path.is_file() {
                return Err(Error::validation(format!(
                    "Image file not found: {}",
                    path.display()
                )));
            }
        }
        Ok(())
    }
}

/// Which slice of the wardrobe to list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClothingFilter {
    #[default]
    All,
    Category(Category),
    Season(Season),
    Favorites,
}
