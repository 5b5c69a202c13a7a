//! Virtual try-on

use std::path::Path;
use std::sync::Arc;

use reqwest::blocking::multipart::Form;

use crate::adapters::http::{file_part, ApiClient};
use crate::domain::result::Result;
use crate::domain::{TryOnResult, TryOnTarget};
use crate::services::body_analysis::ensure_photo;

pub struct TryOnService {
    client: Arc<ApiClient>,
}

impl TryOnService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Upload a photo to be dressed with an outfit or a single item
    pub fn try_on(&self, target: TryOnTarget, photo: &Path) -> Result<TryOnResult> {
        ensure_photo(photo)?;
        let id = target.id().to_string();
        let request = self
            .client
            .post(&["virtual-try-on", target.kind(), &id])?
            .multipart(Form::new().part("photo", file_part(photo)?));
        self.client.send_json(request)
    }

    /// Public URL of the composed image
    pub fn result_url(&self, result: &TryOnResult) -> String {
        self.client.asset_url(&result.result_image_path)
    }
}
