//! Outfit resource

use std::sync::Arc;

use serde::Serialize;

use crate::adapters::http::ApiClient;
use crate::domain::result::{Error, Result};
use crate::domain::{Outfit, OutfitFilter, OutfitForm};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateOutfitBody<'a> {
    user_id: i64,
    #[serde(flatten)]
    form: &'a OutfitForm,
}

pub struct OutfitService {
    client: Arc<ApiClient>,
}

impl OutfitService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub fn list(&self, user_id: i64, filter: &OutfitFilter) -> Result<Vec<Outfit>> {
        let request = match filter {
            OutfitFilter::All => self.client.get(&["outfits"])?,
            OutfitFilter::Favorites => self.client.get(&["outfits", "favorites"])?,
            OutfitFilter::Season(season) => {
                self.client.get(&["outfits", "season", season.as_str()])?
            }
            OutfitFilter::Weather(label) => {
                let label = label.trim();
                if label.is_empty() {
                    return Err(Error::validation("Weather condition is required"));
                }
                self.client.get(&["outfits", "weather", label])?
            }
        };
        self.client.send_json(request.query(&[("userId", user_id)]))
    }

    pub fn get(&self, id: i64) -> Result<Outfit> {
        let id = id.to_string();
        self.client.send_json(self.client.get(&["outfits", &id])?)
    }

    /// Create an outfit; needs a name and at least two distinct items
    pub fn create(&self, user_id: i64, form: &OutfitForm) -> Result<Option<Outfit>> {
        let mut form = form.clone();
        form.dedup_items();
        form.validate_new()?;

        let body = CreateOutfitBody {
            user_id,
            form: &form,
        };
        self.client
            .send_optional_json(self.client.post(&["outfits"])?.json(&body))
    }

    pub fn update(&self, id: i64, form: &OutfitForm) -> Result<Option<Outfit>> {
        let mut form = form.clone();
        form.dedup_items();
        form.validate_name()?;

        let id = id.to_string();
        self.client
            .send_optional_json(self.client.put(&["outfits", &id])?.json(&form))
    }

    pub fn toggle_favorite(&self, id: i64) -> Result<Option<Outfit>> {
        let id = id.to_string();
        self.client
            .send_optional_json(self.client.put(&["outfits", &id, "favorite"])?)
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        let id = id.to_string();
        self.client.send_empty(self.client.delete(&["outfits", &id])?)
    }

    /// Weather-driven pick for `city`
    ///
    /// An empty body is `None`. A 404 stays `Error::NotFound` for the caller to render.
    pub fn recommend(&self, user_id: i64, city: &str) -> Result<Option<Outfit>> {
        let city = city.trim();
        if city.is_empty() {
            return Err(Error::validation("City is required"));
        }
        let request = self
            .client
            .get(&["outfits", "recommend"])?
            .query(&[("userId", user_id.to_string().as_str()), ("city", city)]);

        self.client.send_optional_json(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory_storage::MemorySessionStorage;
    use crate::adapters::mock_backend::MockBackend;
    use crate::config::ApiSettings;
    use crate::domain::Season;
    use crate::services::SessionStore;
    use serde_json::json;

    const OUTFIT: &str = r#"{"id": 9, "name": "Office", "season": "Fall",
        "weatherConditions": "Cloudy", "favorite": true,
        "items": [{"id": 1, "name": "Shirt", "category": "Top", "color": "white"},
                  {"id": 2, "name": "Chinos", "category": "Bottom", "color": "beige"}]}"#;

    fn service(server: &MockBackend) -> OutfitService {
        let store = Arc::new(SessionStore::new(Arc::new(MemorySessionStorage::new())));
        let client = ApiClient::new(&ApiSettings::with_base_url(server.base_url()), store).unwrap();
        OutfitService::new(Arc::new(client))
    }

    #[test]
    fn test_list_by_weather_encodes_label() {
        let server = MockBackend::start().unwrap();
        server.respond("GET", "/outfits/weather/Light%20rain", 200, format!("[{}]", OUTFIT));

        let outfits = service(&server)
            .list(5, &OutfitFilter::Weather("Light rain".into()))
            .unwrap();
        assert_eq!(outfits[0].item_ids(), vec![1, 2]);
        assert_eq!(server.last_request().query(), Some("userId=5"));
    }

    #[test]
    fn test_get_tolerates_null_items() {
        let server = MockBackend::start().unwrap();
        server.respond(
            "GET",
            "/outfits/3",
            200,
            r#"{"id": 3, "name": "Draft", "season": null, "favorite": null, "items": null}"#,
        );

        let outfit = service(&server).get(3).unwrap();
        assert!(outfit.items.is_empty());
        assert_eq!(outfit.season, Season::All);
    }

    #[test]
    fn test_list_by_season() {
        let server = MockBackend::start().unwrap();
        server.respond("GET", "/outfits/season/Fall", 200, format!("[{}]", OUTFIT));

        let outfits = service(&server)
            .list(5, &OutfitFilter::Season(Season::Fall))
            .unwrap();
        assert_eq!(outfits[0].season, Season::Fall);
    }

    #[test]
    fn test_create_posts_user_and_form() {
        let server = MockBackend::start().unwrap();
        server.respond("POST", "/outfits", 201, OUTFIT);

        let form = OutfitForm::new("Office", vec![1, 2, 1])
            .with_season(Season::Fall)
            .with_weather("Cloudy");
        let created = service(&server).create(5, &form).unwrap().unwrap();
        assert_eq!(created.id, 9);

        assert_eq!(
            server.last_request().json(),
            json!({
                "userId": 5,
                "name": "Office",
                "season": "Fall",
                "weatherConditions": "Cloudy",
                "clothingItemIds": [1, 2]
            })
        );
    }

    #[test]
    fn test_create_requires_two_distinct_items() {
        let server = MockBackend::start().unwrap();
        let form = OutfitForm::new("Solo", vec![3, 3]);

        let err = service(&server).create(5, &form).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(server.requests().is_empty());
    }

    #[test]
    fn test_update_allows_single_item() {
        let server = MockBackend::start().unwrap();
        server.respond("PUT", "/outfits/9", 200, "");

        let form = OutfitForm::new("Office", vec![1]);
        assert_eq!(service(&server).update(9, &form).unwrap(), None);
        assert!(server.last_request().json().get("userId").is_none());
    }

    #[test]
    fn test_recommend_not_found_is_reported() {
        let server = MockBackend::start().unwrap();
        server.respond("GET", "/outfits/recommend", 404, "");

        let err = service(&server).recommend(5, "Lyon").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(
            server.last_request().query(),
            Some("userId=5&city=Lyon")
        );
    }

    #[test]
    fn test_recommend_empty_body_is_none() {
        let server = MockBackend::start().unwrap();
        server.respond("GET", "/outfits/recommend", 200, "");

        assert_eq!(service(&server).recommend(5, "Lyon").unwrap(), None);
    }

    #[test]
    fn test_recommend_returns_outfit() {
        let server = MockBackend::start().unwrap();
        server.respond("GET", "/outfits/recommend", 200, OUTFIT);

        let outfit = service(&server).recommend(5, "Paris").unwrap().unwrap();
        assert_eq!(outfit.name, "Office");
    }

    #[test]
    fn test_recommend_rejects_blank_city() {
        let server = MockBackend::start().unwrap();
        assert!(matches!(
            service(&server).recommend(5, "  "),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_server_error_is_reported() {
        let server = MockBackend::start().unwrap();
        server.respond("DELETE", "/outfits/9", 500, r#"{"message": "boom"}"#);

        let err = service(&server).delete(9).unwrap_err();
        assert_eq!(err.status(), Some(500));
    }
}
