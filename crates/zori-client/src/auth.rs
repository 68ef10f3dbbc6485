//! OAuth + passkey login flow
//!
//! Two-phase login: the Google OAuth handshake yields an intermediate token
//! that only the passkey endpoints accept; completing the passkey ceremony
//! upgrades it to the final access/refresh pair. The intermediate token lives
//! in memory only and is dropped as soon as the ceremony finishes.

use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use zori_core::auth::{AuthTokens, GoogleCallbackResponse};
use zori_core::{ZoriError, ZoriResult};

use crate::config::ApiConfig;
use crate::store::{CredentialStore, SessionStore};

#[derive(Debug, Deserialize)]
struct GoogleLoginResponse {
    authorization_url: String,
}

/// State machine for the login ceremony.
pub struct AuthFlow {
    http: reqwest::Client,
    config: ApiConfig,
    credentials: CredentialStore,
    intermediate_token: Mutex<Option<String>>,
}

impl AuthFlow {
    /// Create a flow over a session store.
    pub fn new(config: ApiConfig, store: Arc<dyn SessionStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            credentials: CredentialStore::new(store),
            intermediate_token: Mutex::new(None),
        }
    }

    /// The credential store this flow writes tokens into.
    #[must_use]
    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Begin the Google OAuth handshake. Returns the authorization URL the
    /// host should navigate the user to.
    pub async fn initiate_google_login(&self) -> ZoriResult<String> {
        let response: GoogleLoginResponse = self
            .post_json(
                "/auth/google",
                &json!({ "redirect_uri": self.config.redirect_uri }),
                None,
            )
            .await?;
        Ok(response.authorization_url)
    }

    /// Exchange the OAuth authorization code. Caches the user record and
    /// holds the intermediate token for the passkey ceremony.
    pub async fn handle_google_callback(&self, code: &str) -> ZoriResult<GoogleCallbackResponse> {
        let response: GoogleCallbackResponse = self
            .post_json(
                "/auth/google/callback",
                &json!({ "code": code, "redirect_uri": self.config.redirect_uri }),
                None,
            )
            .await?;
        *self.intermediate_token.lock() = Some(response.intermediate_token.clone());
        self.credentials.set_user(&response.user);
        Ok(response)
    }

    /// Request a WebAuthn challenge for the identified user. Requires a
    /// pending intermediate token.
    pub async fn request_passkey_challenge(&self) -> ZoriResult<serde_json::Value> {
        let token = self.intermediate()?;
        self.post_json("/auth/passkey/challenge", &json!(null), Some(&token))
            .await
    }

    /// Complete the WebAuthn ceremony with the authenticator's credential
    /// response. On success the final tokens are stored and the intermediate
    /// token is dropped.
    pub async fn verify_passkey(&self, credential: &serde_json::Value) -> ZoriResult<AuthTokens> {
        let token = self.intermediate()?;
        let tokens: AuthTokens = self
            .post_json("/auth/passkey/verify", credential, Some(&token))
            .await?;
        self.credentials.set_tokens(&tokens);
        *self.intermediate_token.lock() = None;
        Ok(tokens)
    }

    /// Rotate the token pair using the stored refresh token.
    pub async fn refresh(&self) -> ZoriResult<AuthTokens> {
        let refresh_token = self
            .credentials
            .refresh_token()
            .ok_or_else(|| ZoriError::unauthorized("No refresh token available"))?;
        let tokens: AuthTokens = self
            .post_json("/auth/refresh", &json!({ "refresh_token": refresh_token }), None)
            .await?;
        self.credentials.set_tokens(&tokens);
        Ok(tokens)
    }

    /// Log out: best-effort server-side invalidation, then wipe local
    /// credentials unconditionally.
    pub async fn logout(&self) {
        if let Some(token) = self.credentials.access_token() {
            let result = self
                .http
                .post(self.config.endpoint("/auth/logout"))
                .bearer_auth(token)
                .send()
                .await;
            if let Err(error) = result {
                tracing::warn!("logout request failed: {error}");
            }
        }
        *self.intermediate_token.lock() = None;
        self.credentials.clear();
    }

    fn intermediate(&self) -> ZoriResult<String> {
        self.intermediate_token
            .lock()
            .clone()
            .ok_or_else(|| ZoriError::unauthorized("No intermediate token available"))
    }

    async fn post_json<B: serde::Serialize, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        bearer: Option<&str>,
    ) -> ZoriResult<T> {
        let mut request = self.http.post(self.config.endpoint(path)).json(body);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ZoriError::network(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status == reqwest::StatusCode::UNAUTHORIZED {
                return Err(ZoriError::unauthorized("Authentication rejected"));
            }
            return Err(ZoriError::server(if body.trim().is_empty() {
                status.to_string()
            } else {
                body.trim().to_string()
            }));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ZoriError::serialization(format!("Bad auth payload: {e}")))
    }
}
