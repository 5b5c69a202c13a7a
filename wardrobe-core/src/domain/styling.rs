//! Body analysis and virtual try-on results

use std::fmt;

use serde::{Deserialize, Serialize};

/// Morphology label produced by the backend (e.g. "Hourglass")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BodyType(pub String);

impl BodyType {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BodyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of a body analysis, with the advice fetched for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyAnalysis {
    pub body_type: BodyType,
    pub recommendations: Vec<String>,
}

/// What to overlay on the user's photo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TryOnTarget {
    Outfit(i64),
    Item(i64),
}

impl TryOnTarget {
    pub fn kind(&self) -> &'static str {
        match self {
            TryOnTarget::Outfit(_) => "outfit",
            TryOnTarget::Item(_) => "item",
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            TryOnTarget::Outfit(id) | TryOnTarget::Item(id) => *id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TryOnResult {
    /// File name under the static uploads path
    pub result_image_path: String,
}
