//! Wardrobe Core - client library for the wardrobe-management backend
//!
//! The crate follows a ports-and-adapters layout:
//!
//! - **domain**: entities (SessionRecord, ClothingItem, Outfit, ...) and errors
//! - **ports**: traits for session storage and authentication
//! - **services**: session context and one service per backend resource
//! - **adapters**: reqwest HTTP client, file/memory session storage

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use adapters::auth::HttpAuthGateway;
use adapters::file_storage::FileSessionStorage;
use adapters::http::ApiClient;
use config::Config;
use ports::SessionStorage;
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::{Error, ErrorCategory, Result};
pub use domain::{
    BodyAnalysis, BodyType, Category, ClothingFilter, ClothingItem, ClothingItemForm, Outfit,
    OutfitFilter, OutfitForm, Season, SessionRecord, TryOnResult, TryOnTarget, WeatherSnapshot,
};

/// Directory (under the wardrobe dir) holding the stored session
pub const SESSION_DIR: &str = "session";

/// Main context for wardrobe operations
///
/// Built once at startup and passed by reference. Everything shares one
/// HTTP client and one session store, so a login is immediately visible to
/// every service.
pub struct WardrobeContext {
    pub config: Config,
    pub client: Arc<ApiClient>,
    pub store: Arc<SessionStore>,
    pub session: Arc<SessionContext>,
    pub wardrobe_service: WardrobeService,
    pub outfit_service: OutfitService,
    pub weather_service: WeatherService,
    pub body_analysis_service: BodyAnalysisService,
    pub try_on_service: TryOnService,
}

impl WardrobeContext {
    /// Create a context from the settings and session stored in `wardrobe_dir`
    pub fn new(wardrobe_dir: &Path) -> Result<Self> {
        let config = Config::load(wardrobe_dir)?;
        let storage = Arc::new(FileSessionStorage::new(wardrobe_dir.join(SESSION_DIR)));
        Self::with_storage(config, storage)
    }

    /// Create a context on top of any session storage
    pub fn with_storage(config: Config, storage: Arc<dyn SessionStorage>) -> Result<Self> {
        let store = Arc::new(SessionStore::new(storage));
        let client = Arc::new(ApiClient::new(&config.api, Arc::clone(&store))?);
        let auth = Arc::new(HttpAuthGateway::new(Arc::clone(&client)));
        let session = Arc::new(SessionContext::new(Arc::clone(&store), auth));

        tracing::debug!(base_url = client.base_url(), "wardrobe context ready");

        Ok(Self {
            wardrobe_service: WardrobeService::new(Arc::clone(&client)),
            outfit_service: OutfitService::new(Arc::clone(&client)),
            weather_service: WeatherService::new(Arc::clone(&client)),
            body_analysis_service: BodyAnalysisService::new(Arc::clone(&client)),
            try_on_service: TryOnService::new(Arc::clone(&client)),
            config,
            client,
            store,
            session,
        })
    }

    /// Current user, or an `Unauthenticated` error
    pub fn require_user(&self) -> Result<SessionRecord> {
        self.session.require_user()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory_storage::MemorySessionStorage;
    use crate::adapters::mock_backend::MockBackend;
    use crate::config::ApiSettings;

    fn config(base_url: String) -> Config {
        let mut config = Config::default();
        config.api = ApiSettings::with_base_url(base_url);
        config
    }

    #[test]
    fn test_login_is_visible_to_resource_services() {
        let server = MockBackend::start().unwrap();
        server.respond(
            "POST",
            "/api/auth/signin",
            200,
            r#"{"id": 8, "username": "lea", "token": "t-8"}"#,
        );
        server.respond("GET", "/wardrobe", 200, "[]");

        let ctx = WardrobeContext::with_storage(
            config(server.base_url()),
            Arc::new(MemorySessionStorage::new()),
        )
        .unwrap();
        assert!(ctx.require_user().is_err());

        let user = ctx.session.login("lea", "pw").unwrap();
        let items = ctx
            .wardrobe_service
            .list(ctx.require_user().unwrap().id, ClothingFilter::All)
            .unwrap();
        assert!(items.is_empty());
        assert_eq!(user.id, 8);

        let request = server.last_request();
        assert_eq!(request.header("authorization"), Some("Bearer t-8"));
        assert_eq!(request.query(), Some("userId=8"));
    }

    #[test]
    fn test_new_restores_session_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let storage = FileSessionStorage::new(dir.path().join(SESSION_DIR));
        storage
            .set(SESSION_KEY, r#"{"id": 3, "username": "sam"}"#)
            .unwrap();

        let ctx = WardrobeContext::new(dir.path()).unwrap();
        assert_eq!(ctx.require_user().unwrap().username, "sam");
    }

    #[test]
    fn test_new_rejects_bad_base_url() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{"api": {"baseUrl": "ftp://nowhere"}}"#,
        )
        .unwrap();

        assert!(matches!(
            WardrobeContext::new(dir.path()),
            Err(Error::Config(_))
        ));
    }
}
