//! Login, registration and logout

use serde_json::Value;

use super::{ApiClient, ApiRequest};
use crate::error::{Error, Result};
use crate::models::{AuthResponse, Credentials};

impl ApiClient {
    /// `POST /login`; on success the token and user are stored in the session
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        self.authenticate("/login", email, password).await
    }

    /// `POST /register`; on success the token and user are stored in the session
    pub async fn register(&self, email: &str, password: &str) -> Result<AuthResponse> {
        self.authenticate("/register", email, password).await
    }

    /// Drop the local session. The server keeps no session state to revoke.
    pub fn logout(&self) -> Result<()> {
        self.session.logout()
    }

    async fn authenticate(&self, endpoint: &str, email: &str, password: &str) -> Result<AuthResponse> {
        let req = ApiRequest::post(endpoint).json(&Credentials { email, password })?;
        let body = self
            .request(req)
            .await?
            .ok_or_else(|| Error::parse(format!("POST {} returned no content", endpoint)))?;

        let token = body
            .get("token")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::parse(format!("POST {} returned no token", endpoint)))?;
        let raw_user = body
            .get("user")
            .ok_or_else(|| Error::parse(format!("POST {} returned no user", endpoint)))?;

        let user = self.session.set_session_json(token, raw_user)?;
        log::info!("[api] Authenticated as user {}", user.id);

        Ok(AuthResponse {
            token: token.to_string(),
            user,
        })
    }
}
