//! Wardrobe resource - the user's clothing items

use std::sync::Arc;

use reqwest::blocking::multipart::Form;

use crate::adapters::http::{file_part, ApiClient};
use crate::domain::result::Result;
use crate::domain::{ClothingFilter, ClothingItem, ClothingItemForm};

pub struct WardrobeService {
    client: Arc<ApiClient>,
}

impl WardrobeService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// List a user's items, optionally narrowed by `filter`
    pub fn list(&self, user_id: i64, filter: ClothingFilter) -> Result<Vec<ClothingItem>> {
        let request = match filter {
            ClothingFilter::All => self.client.get(&["wardrobe"])?,
            ClothingFilter::Category(category) => {
                self.client.get(&["wardrobe", "category", category.as_str()])?
            }
            ClothingFilter::Season(season) => {
                self.client.get(&["wardrobe", "season", season.as_str()])?
            }
            ClothingFilter::Favorites => self.client.get(&["wardrobe", "favorites"])?,
        };
        self.client.send_json(request.query(&[("userId", user_id)]))
    }

    pub fn get(&self, id: i64) -> Result<ClothingItem> {
        let id = id.to_string();
        self.client.send_json(self.client.get(&["wardrobe", &id])?)
    }

    /// Upload a new item; the image is optional
    pub fn create(&self, user_id: i64, form: &ClothingItemForm) -> Result<Option<ClothingItem>> {
        form.validate()?;
        let request = self
            .client
            .post(&["wardrobe"])?
            .query(&[("userId", user_id)])
            .multipart(multipart_form(form)?);
        self.client.send_optional_json(request)
    }

    pub fn update(&self, id: i64, form: &ClothingItemForm) -> Result<Option<ClothingItem>> {
        form.validate()?;
        let id = id.to_string();
        let request = self
            .client
            .put(&["wardrobe", &id])?
            .multipart(multipart_form(form)?);
        self.client.send_optional_json(request)
    }

    pub fn toggle_favorite(&self, id: i64) -> Result<Option<ClothingItem>> {
        let id = id.to_string();
        self.client
            .send_optional_json(self.client.put(&["wardrobe", &id, "favorite"])?)
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        let id = id.to_string();
        self.client.send_empty(self.client.delete(&["wardrobe", &id])?)
    }

    /// Public URL of the item's picture, if it has one
    pub fn image_url(&self, item: &ClothingItem) -> Option<String> {
        item.local_image_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| self.client.asset_url(p))
    }
}

fn multipart_form(form: &ClothingItemForm) -> Result<Form> {
    let mut multipart = Form::new()
        .text("name", form.name.trim().to_string())
        .text("category", form.category.as_str())
        .text("color", form.color.trim().to_string())
        .text("season", form.season.as_str());
    if let Some(path) = &form.image {
        multipart = multipart.part("image", file_part(path)?);
    }
    Ok(multipart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory_storage::MemorySessionStorage;
    use crate::adapters::mock_backend::MockBackend;
    use crate::config::ApiSettings;
    use crate::domain::result::Error;
    use crate::domain::{Category, Season};
    use crate::services::SessionStore;
    use std::io::Write;

    const ITEM: &str = r#"{"id": 4, "name": "Blue shirt", "category": "Top", "color": "blue",
        "season": "Summer", "localImagePath": "shirt.png", "favorite": false}"#;

    fn service(server: &MockBackend) -> WardrobeService {
        let store = Arc::new(SessionStore::new(Arc::new(MemorySessionStorage::new())));
        let client = ApiClient::new(&ApiSettings::with_base_url(server.base_url()), store).unwrap();
        WardrobeService::new(Arc::new(client))
    }

    #[test]
    fn test_list_routes_per_filter() {
        let server = MockBackend::start().unwrap();
        for path in [
            "/wardrobe",
            "/wardrobe/category/Outerwear",
            "/wardrobe/season/Winter",
            "/wardrobe/favorites",
        ] {
            server.respond("GET", path, 200, format!("[{}]", ITEM));
        }
        let svc = service(&server);

        for filter in [
            ClothingFilter::All,
            ClothingFilter::Category(Category::Outerwear),
            ClothingFilter::Season(Season::Winter),
            ClothingFilter::Favorites,
        ] {
            let items = svc.list(12, filter).unwrap();
            assert_eq!(items.len(), 1);
            assert_eq!(server.last_request().query(), Some("userId=12"));
        }
    }

    #[test]
    fn test_list_tolerates_null_fields() {
        let server = MockBackend::start().unwrap();
        server.respond(
            "GET",
            "/wardrobe",
            200,
            format!(
                r#"[{}, {{"id": 8, "name": "Cap", "category": "Accessory", "color": null,
                     "season": null, "localImagePath": null, "favorite": null}}]"#,
                ITEM
            ),
        );

        let items = service(&server).list(12, ClothingFilter::All).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].color, "");
        assert_eq!(items[1].season, Season::All);
        assert!(!items[1].favorite);
    }

    #[test]
    fn test_create_sends_multipart_with_image() {
        let server = MockBackend::start().unwrap();
        server.respond("POST", "/wardrobe", 200, ITEM);

        let dir = tempfile::TempDir::new().unwrap();
        let image = dir.path().join("shirt.png");
        std::fs::File::create(&image)
            .unwrap()
            .write_all(b"\x89PNG fake")
            .unwrap();

        let form = ClothingItemForm::new("Blue shirt", Category::Top, "blue")
            .with_season(Season::Summer)
            .with_image(&image);
        let created = service(&server).create(3, &form).unwrap().unwrap();
        assert_eq!(created.id, 4);

        let request = server.last_request();
        assert_eq!(request.query(), Some("userId=3"));
        assert!(request
            .header("content-type")
            .is_some_and(|v| v.starts_with("multipart/form-data")));
        let body = request.body_text();
        assert!(body.contains("name=\"name\""));
        assert!(body.contains("Blue shirt"));
        assert!(body.contains("name=\"season\""));
        assert!(body.contains("Summer"));
        assert!(body.contains("filename=\"shirt.png\""));
        assert!(body.contains("image/png"));
    }

    #[test]
    fn test_create_validates_before_sending() {
        let server = MockBackend::start().unwrap();
        let form = ClothingItemForm::new("", Category::Top, "blue");

        let err = service(&server).create(3, &form).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(server.requests().is_empty());
    }

    #[test]
    fn test_toggle_and_delete() {
        let server = MockBackend::start().unwrap();
        server.respond("PUT", "/wardrobe/4/favorite", 200, "");
        server.respond("DELETE", "/wardrobe/4", 204, "");
        let svc = service(&server);

        assert_eq!(svc.toggle_favorite(4).unwrap(), None);
        svc.delete(4).unwrap();

        let methods: Vec<_> = server.requests().iter().map(|r| r.method.clone()).collect();
        assert_eq!(methods, vec!["PUT", "DELETE"]);
    }

    #[test]
    fn test_get_missing_item() {
        let server = MockBackend::start().unwrap();
        server.respond("GET", "/wardrobe/99", 404, r#"{"message": "Item not found"}"#);

        let err = service(&server).get(99).unwrap_err();
        assert_eq!(err, Error::NotFound("Item not found".into()));
    }

    #[test]
    fn test_image_url() {
        let server = MockBackend::start().unwrap();
        let svc = service(&server);
        let item: ClothingItem = serde_json::from_str(ITEM).unwrap();
        assert_eq!(
            svc.image_url(&item),
            Some(format!("{}/uploads/shirt.png", server.base_url()))
        );
    }
}
