//! Core domain entities
//!
//! Plain data structures mirroring what the backend returns, plus the local
//! validation applied before a request is sent. No I/O happens here.

mod clothing;
mod outfit;
mod styling;
mod user;
mod weather;
pub mod result;

pub use clothing::{Category, ClothingFilter, ClothingItem, ClothingItemForm, Season};
pub use outfit::{Outfit, OutfitFilter, OutfitForm, MIN_OUTFIT_ITEMS};
pub use styling::{BodyAnalysis, BodyType, TryOnResult, TryOnTarget};
pub use user::{has_valid_id, SessionRecord};
pub use weather::{Sky, WeatherSnapshot};

use serde::{Deserialize, Deserializer};

/// Deserialize `null` the same way as a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
