//! Quizzler REST client
//!
//! Every authenticated call goes through [`ApiClient::request`]:
//! the token is read from the session at call time, JSON bodies are encoded,
//! and the response status is interpreted in one place.
//!
//! Status handling:
//! - 204: `Ok(None)`, body is never read
//! - 401: session is cleared if the request carried a token, then
//!   `Error::Unauthorized` with the server's `error` field or "Unauthorized"
//! - other non-2xx: `Error::RequestFailed` with the server's `error` field or
//!   "Something went wrong"
//! - 2xx: the parsed JSON body
//!
//! An error body that is not JSON falls back to the generic message. A success
//! body that is not JSON is an `Error::Parse`.

mod auth;
mod cards;
mod decks;
mod public;

pub use public::{PUBLIC_CARDS_FAILED, PUBLIC_DECKS_FAILED, PUBLIC_DECK_NOT_FOUND};

use std::sync::Arc;

use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{Error, Result, REQUEST_FAILED_MESSAGE, UNAUTHORIZED_MESSAGE};
use crate::session::SessionStore;

/// One API call: endpoint, method, optional JSON body, header overrides.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    endpoint: String,
    method: Method,
    body: Option<Value>,
    headers: Vec<(String, String)>,
}

impl ApiRequest {
    /// GET request for an endpoint below `/api`
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method: Method::GET,
            body: None,
            headers: Vec::new(),
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(endpoint).method(Method::POST)
    }

    pub fn put(endpoint: impl Into<String>) -> Self {
        Self::new(endpoint).method(Method::PUT)
    }

    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(endpoint).method(Method::DELETE)
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Raw JSON body
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Serialize `body` as the JSON body
    pub fn json<B: Serialize + ?Sized>(self, body: &B) -> Result<Self> {
        Ok(self.body(serde_json::to_value(body)?))
    }

    /// Header override; replaces the default `Content-Type`/`Authorization`
    /// when the name matches
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn http_method(&self) -> &Method {
        &self.method
    }
}

/// Async client for the Quizzler API.
///
/// Cheap to clone; clones share the connection pool and the session.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    config: ClientConfig,
    session: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(config: ClientConfig, session: Arc<SessionStore>) -> Result<Self> {
        config.validate()?;

        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            config,
            session,
        })
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send a request and interpret the response.
    ///
    /// Returns `Ok(None)` for 204 responses.
    pub async fn request(&self, req: ApiRequest) -> Result<Option<Value>> {
        let token = self.session.get_token();
        let headers = build_headers(token.as_deref(), &req.headers)?;
        let url = self.config.api_url(&req.endpoint);

        log::debug!(
            "[api] {} {} (token: {})",
            req.method,
            req.endpoint,
            token.is_some()
        );

        let mut builder = self.http.request(req.method.clone(), &url).headers(headers);
        if let Some(body) = &req.body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let response = builder.send().await?;
        let status = response.status();

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let bytes = response.bytes().await?;
        let parsed = serde_json::from_slice::<Value>(&bytes);

        if status == StatusCode::UNAUTHORIZED {
            if token.is_some() {
                log::warn!(
                    "[api] {} {} rejected the session token, logging out",
                    req.method,
                    req.endpoint
                );
                if let Err(e) = self.session.logout() {
                    log::warn!("[api] Failed to clear session after 401: {}", e);
                }
            }
            return Err(Error::unauthorized(error_message(
                parsed.as_ref().ok(),
                UNAUTHORIZED_MESSAGE,
            )));
        }

        if !status.is_success() {
            log::debug!("[api] {} {} failed with {}", req.method, req.endpoint, status);
            return Err(Error::request_failed(
                status.as_u16(),
                error_message(parsed.as_ref().ok(), REQUEST_FAILED_MESSAGE),
            ));
        }

        parsed.map(Some).map_err(|e| {
            Error::parse(format!(
                "{} {} returned a non-JSON body: {}",
                req.method, req.endpoint, e
            ))
        })
    }

    /// Send a request and decode the response body into `T`
    pub async fn request_json<T: DeserializeOwned>(&self, req: ApiRequest) -> Result<T> {
        let context = format!("{} {}", req.method, req.endpoint);
        let value = self
            .request(req)
            .await?
            .ok_or_else(|| Error::parse(format!("{} returned no content", context)))?;

        serde_json::from_value(value)
            .map_err(|e| Error::parse(format!("{} returned an unexpected body: {}", context, e)))
    }

    /// Send a request whose response body is not needed
    pub async fn request_empty(&self, req: ApiRequest) -> Result<()> {
        self.request(req).await?;
        Ok(())
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.base_url)
            .field("session", &self.session)
            .finish()
    }
}

fn build_headers(token: Option<&str>, overrides: &[(String, String)]) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );

    if let Some(token) = token {
        let value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| Error::config(format!("Invalid bearer token: {}", e)))?;
        headers.insert(header::AUTHORIZATION, value);
    }

    for (name, value) in overrides {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::config(format!("Invalid header name {:?}: {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| Error::config(format!("Invalid value for header {}: {}", name, e)))?;
        headers.insert(name, value);
    }

    Ok(headers)
}

/// The server's `error` field, or `fallback` when absent or empty
fn error_message(body: Option<&Value>, fallback: &str) -> String {
    body.and_then(|b| b.get("error"))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::models::User;
    use crate::session::MemoryStorage;

    pub fn test_user() -> User {
        User {
            id: 1,
            email: "a@b.com".to_string(),
            ..Default::default()
        }
    }

    pub fn client_for(base_url: &str, session: Arc<SessionStore>) -> ApiClient {
        let config = ClientConfig::default().with_base_url(base_url);
        ApiClient::new(config, session).unwrap()
    }

    pub fn session_with_token(token: &str) -> (Arc<SessionStore>, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let session = Arc::new(SessionStore::load(storage.clone()).unwrap());
        session.set_session(token, test_user()).unwrap();
        (session, storage)
    }

    pub fn anonymous_session() -> (Arc<SessionStore>, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let session = Arc::new(SessionStore::load(storage.clone()).unwrap());
        (session, storage)
    }
}
