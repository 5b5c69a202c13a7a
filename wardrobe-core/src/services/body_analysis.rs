//! Body morphology analysis

use std::path::Path;
use std::sync::Arc;

use reqwest::blocking::multipart::Form;
use serde_json::Value as JsonValue;

use crate::adapters::http::{file_part, ApiClient};
use crate::domain::result::{Error, Result};
use crate::domain::{BodyAnalysis, BodyType};

pub struct BodyAnalysisService {
    client: Arc<ApiClient>,
}

impl BodyAnalysisService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Upload a photo and get back the detected body type
    pub fn analyze(&self, user_id: i64, photo: &Path) -> Result<BodyType> {
        ensure_photo(photo)?;
        let form = Form::new()
            .part("photo", file_part(photo)?)
            .text("userId", user_id.to_string());
        let request = self
            .client
            .post(&["api", "body-analysis", "analyze"])?
            .multipart(form);

        parse_body_type(&self.client.send_text(request)?)
    }

    /// Style advice for a body type
    pub fn recommendations(&self, body_type: &BodyType) -> Result<Vec<String>> {
        let request = self
            .client
            .get(&["api", "body-analysis", "recommendations", body_type.as_str()])?;
        self.client.send_json(request)
    }

    /// `analyze` followed by `recommendations` for the detected type
    pub fn analyze_with_recommendations(&self, user_id: i64, photo: &Path) -> Result<BodyAnalysis> {
        let body_type = self.analyze(user_id, photo)?;
        tracing::debug!(%body_type, "body type detected");
        let recommendations = self.recommendations(&body_type)?;
        Ok(BodyAnalysis {
            body_type,
            recommendations,
        })
    }
}

pub(crate) fn ensure_photo(photo: &Path) -> Result<()> {
    if !photo.is_file() {
        return Err(Error::validation(format!(
            "Photo not found: {}",
            photo.display()
        )));
    }
    Ok(())
}

/// The label arrives as plain text, a JSON string or `{"bodyType": ...}`
fn parse_body_type(body: &str) -> Result<BodyType> {
    let label = match serde_json::from_str::<JsonValue>(body) {
        Ok(JsonValue::String(s)) => s,
        Ok(JsonValue::Object(map)) => map
            .get("bodyType")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| Error::Json("Analysis response has no bodyType".to_string()))?,
        _ => body.trim().to_string(),
    };

    let label = label.trim();
    if label.is_empty() {
        return Err(Error::Json("Empty body type in analysis response".to_string()));
    }
    Ok(BodyType(label.to_string()))
}
