//! Service layer
//!
//! Session handling plus one thin service per backend resource. Resource
//! services take the user id explicitly; callers get it from
//! [`SessionContext::require_user`].

mod body_analysis;
mod outfit;
mod session;
mod session_store;
pub mod single_flight;
mod try_on;
mod wardrobe;
mod weather;

pub use body_analysis::BodyAnalysisService;
pub use outfit::OutfitService;
pub use session::{SessionContext, SessionState};
pub use session_store::{SessionStore, SESSION_KEY};
pub use single_flight::SingleFlight;
pub use try_on::TryOnService;
pub use wardrobe::WardrobeService;
pub use weather::WeatherService;
