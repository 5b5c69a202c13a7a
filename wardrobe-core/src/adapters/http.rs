//! Wardrobe backend HTTP client
//!
//! Every resource wrapper goes through [`ApiClient`]. It owns three rules:
//!
//! - the bearer token is read from the session store when a request is sent,
//!   never cached, so a login is visible to the very next request;
//! - failed responses are classified (401 / 403 / 404 / other) and logged;
//! - nothing is retried and nothing navigates. What happens after a 401 is
//!   governed by [`UnauthorizedPolicy`] and defaults to reporting only.

use std::path::Path;
use std::sync::Arc;

use reqwest::blocking::multipart::Part;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::{ApiSettings, UnauthorizedPolicy};
use crate::domain::result::{Error, FailureClass, Result};
use crate::services::SessionStore;

/// Longest server message we surface verbatim
const MAX_MESSAGE_LEN: usize = 200;

/// HTTP client bound to one backend
pub struct ApiClient {
    client: Client,
    base_url: Url,
    static_base: Url,
    store: Arc<SessionStore>,
    unauthorized_policy: UnauthorizedPolicy,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("static_base", &self.static_base.as_str())
            .field("unauthorized_policy", &self.unauthorized_policy)
            .finish()
    }
}

impl ApiClient {
    pub fn new(settings: &ApiSettings, store: Arc<SessionStore>) -> Result<Self> {
        let base_url = parse_base_url(&settings.base_url)?;
        let static_base = static_base_url(&base_url, &settings.static_path)?;

        let mut builder = Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            static_base,
            store,
            unauthorized_policy: settings.unauthorized_policy,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Build an endpoint URL; each segment is percent-encoded
    pub fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("Base URL cannot hold a path: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Start a request to the endpoint made of `segments`
    pub fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        Ok(self.client.request(method, self.url(segments)?))
    }

    pub fn get(&self, segments: &[&str]) -> Result<RequestBuilder> {
        self.request(Method::GET, segments)
    }

    pub fn post(&self, segments: &[&str]) -> Result<RequestBuilder> {
        self.request(Method::POST, segments)
    }

    pub fn put(&self, segments: &[&str]) -> Result<RequestBuilder> {
        self.request(Method::PUT, segments)
    }

    pub fn delete(&self, segments: &[&str]) -> Result<RequestBuilder> {
        self.request(Method::DELETE, segments)
    }

    /// Send a request with the current bearer token attached
    ///
    /// Returns the response only when its status is a success.
    pub fn send(&self, request: RequestBuilder) -> Result<Response> {
        let mut request = request
            .build()
            .map_err(|e| Error::validation(format!("Invalid request: {}", e)))?;

        if let Some(token) = self.store.token() {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| Error::InvalidSession("stored token is not a valid header".into()))?;
            value.set_sensitive(true);
            request.headers_mut().insert(AUTHORIZATION, value);
        }

        let method = request.method().clone();
        let path = request.url().path().to_string();
        tracing::debug!(%method, %path, "sending request");

        let response = self
            .client
            .execute(request)
            .map_err(|e| self.map_request_error(e))?;

        self.check_response(response, &method, &path)
    }

    /// Send and decode a JSON body
    pub fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.send(request)?;
        let path = response.url().path().to_string();
        let body = response
            .text()
            .map_err(|e| Error::Network(format!("Failed to read response: {}", e)))?;
        serde_json::from_str(&body)
            .map_err(|e| Error::Json(format!("Unexpected response from {}: {}", path, e)))
    }

    /// Send and decode a JSON body, treating an empty body as `None`
    pub fn send_optional_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<Option<T>> {
        let response = self.send(request)?;
        let path = response.url().path().to_string();
        let body = response
            .text()
            .map_err(|e| Error::Network(format!("Failed to read response: {}", e)))?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| Error::Json(format!("Unexpected response from {}: {}", path, e)))
    }

    /// Send and return the body as text
    pub fn send_text(&self, request: RequestBuilder) -> Result<String> {
        self.send(request)?
            .text()
            .map_err(|e| Error::Network(format!("Failed to read response: {}", e)))
    }

    /// Send and ignore the body
    pub fn send_empty(&self, request: RequestBuilder) -> Result<()> {
        self.send(request).map(|_| ())
    }

    /// Public URL of an uploaded asset
    pub fn asset_url(&self, file_name: &str) -> String {
        let mut url = self.static_base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(
                file_name
                    .split('/')
                    .filter(|s| !s.is_empty() && *s != "." && *s != ".."),
            );
        }
        url.to_string()
    }

    /// Map transport errors (no response received)
    fn map_request_error(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::Network("Request timed out".to_string())
        } else if error.is_connect() {
            Error::Network(format!("Unable to connect to {}", self.base_url()))
        } else {
            Error::Network(format!("Request failed: {}", error))
        }
    }

    /// Classify a non-success response
    fn check_response(&self, response: Response, method: &Method, path: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let code = status.as_u16();
        let class = FailureClass::from_status(code);
        let body = response.text().unwrap_or_default();
        let message = extract_message(&body, status);

        tracing::warn!(status = code, class = ?class, %method, %path, "request failed");

        if class == FailureClass::Unauthenticated
            && self.unauthorized_policy == UnauthorizedPolicy::ClearSession
        {
            match self.store.clear() {
                Ok(()) => tracing::info!("cleared stored session after 401"),
                Err(e) => tracing::warn!(error = %e, "failed to clear session after 401"),
            }
        }

        Err(class.into_error(code, message))
    }
}

/// Build a multipart file part from a path on disk
pub fn file_part(path: &Path) -> Result<Part> {
    let bytes = std::fs::read(path)
        .map_err(|e| Error::validation(format!("Cannot read {}: {}", path.display(), e)))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(mime.essence_str())
        .map_err(|e| Error::validation(format!("Invalid content type: {}", e)))
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| Error::Config(format!("Invalid API base URL '{}': {}", raw, e)))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(Error::Config(format!(
            "API base URL must use http or https: {}",
            raw
        )));
    }
    Ok(url)
}

fn static_base_url(base: &Url, static_path: &str) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| Error::Config(format!("Base URL cannot hold a path: {}", base)))?
        .pop_if_empty()
        .extend(
            static_path
                .split('/')
                .filter(|s| !s.is_empty() && *s != "." && *s != ".."),
        )
        .push("");
    Ok(url)
}

/// Pick the most useful human-readable message from an error body
fn extract_message(body: &str, status: StatusCode) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error", "detail"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                if !text.trim().is_empty() {
                    return truncate(text.trim());
                }
            }
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() && !trimmed.starts_with('{') && !trimmed.starts_with('<') {
        return truncate(trimmed);
    }

    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

fn truncate(text: &str) -> String {
    match text.char_indices().nth(MAX_MESSAGE_LEN) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
