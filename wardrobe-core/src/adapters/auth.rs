//! Auth endpoints of the wardrobe backend

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::adapters::http::ApiClient;
use crate::domain::result::{Error, Result};
use crate::ports::AuthGateway;

#[derive(Serialize)]
struct SignInRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct SignUpRequest<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

/// [`AuthGateway`] backed by `/api/auth/*`
pub struct HttpAuthGateway {
    client: Arc<ApiClient>,
}

impl HttpAuthGateway {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

impl AuthGateway for HttpAuthGateway {
    fn sign_in(&self, username: &str, password: &str) -> Result<JsonValue> {
        let request = self
            .client
            .post(&["api", "auth", "signin"])?
            .json(&SignInRequest { username, password });
        match self.client.send_optional_json(request) {
            Ok(Some(value)) => Ok(value),
            Ok(None) => Err(Error::IncompleteUserData),
            Err(Error::Json(message)) => {
                tracing::warn!(%message, "unreadable sign-in response");
                Err(Error::IncompleteUserData)
            }
            Err(e) => Err(e),
        }
    }

    fn sign_up(&self, username: &str, email: &str, password: &str) -> Result<String> {
        let request = self
            .client
            .post(&["api", "auth", "signup"])?
            .json(&SignUpRequest {
                username,
                email,
                password,
            });
        let body = self.client.send_text(request)?;
        Ok(confirmation_message(&body))
    }
}

/// The signup endpoint answers either `{"message": "..."}` or bare text
fn confirmation_message(body: &str) -> String {
    serde_json::from_str::<JsonValue>(body)
        .ok()
        .and_then(|v| match v {
            JsonValue::String(s) => Some(s),
            other => other.get("message").and_then(|m| m.as_str()).map(str::to_string),
        })
        .unwrap_or_else(|| body.trim().to_string())
}
