//! Authenticated API client for the Zori backend
//!
//! Thin JSON-over-HTTPS wrappers around the wallet endpoints. Every
//! authenticated call shares the same failure contract: a 401 wipes the
//! stored credentials and surfaces as [`ZoriError::Unauthorized`], any other
//! failure response surfaces the backend's message as [`ZoriError::Server`],
//! and transport failures map to [`ZoriError::Network`].

use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use zori_core::validation::{digits_only, validate_cpf, validate_email};
use zori_core::wallet::{
    BalanceResponse, EstimateRequest, EstimateResponse, ReceiveAddress, SendRequest, SendResponse,
    TransactionsResponse,
};
use zori_core::{ProfileSnapshot, ZoriError, ZoriResult};

use crate::config::ApiConfig;
use crate::store::{CredentialStore, SessionStore};

/// One uploaded document of a KYC application.
#[derive(Debug, Clone)]
pub struct KycDocument {
    /// Multipart field name (e.g. `selfie`, `proof_of_address`, `cnh_pdf`)
    pub field_name: String,
    /// Original file name
    pub file_name: String,
    /// MIME type of the file
    pub content_type: String,
    /// File contents
    pub bytes: Vec<u8>,
}

/// Fields and documents of a Brazilian account-opening application,
/// submitted as multipart form data to `POST /kyc/open-account-br`.
#[derive(Debug, Clone)]
pub struct KycApplication {
    /// Full legal name
    pub full_name: String,
    /// Mother's full name
    pub mother_name: String,
    /// CPF, formatted or not; submitted digits-only
    pub cpf: String,
    /// Contact email
    pub email: String,
    /// Contact phone in international format
    pub phone: String,
    /// Identity and address documents
    pub documents: Vec<KycDocument>,
}

/// Bearer-authenticated client for the Zori wallet endpoints.
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    credentials: CredentialStore,
}

impl ApiClient {
    /// Create a client over a session store.
    pub fn new(config: ApiConfig, store: Arc<dyn SessionStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            credentials: CredentialStore::new(store),
        }
    }

    /// The credential store this client reads tokens from.
    #[must_use]
    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Fetch the per-currency balances of the authenticated user.
    pub async fn balances(&self) -> ZoriResult<BalanceResponse> {
        self.get_authed("/balance").await
    }

    /// Fetch the transaction history, optionally filtered by currency and
    /// capped at `limit` entries.
    pub async fn transactions(
        &self,
        currency_code: Option<&str>,
        limit: Option<u32>,
    ) -> ZoriResult<TransactionsResponse> {
        let token = self.bearer()?;
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(code) = currency_code {
            query.push(("currency_code", code.to_string()));
        }
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        let response = self
            .http
            .get(self.config.endpoint("/transactions"))
            .query(&query)
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport_error)?;
        self.decode(response).await
    }

    /// Fetch the profile snapshot of the authenticated user.
    pub async fn profile(&self) -> ZoriResult<ProfileSnapshot> {
        self.get_authed("/profile").await
    }

    /// Fetch the deposit address of the authenticated user.
    pub async fn receive_address(&self) -> ZoriResult<ReceiveAddress> {
        self.get_authed("/receive").await
    }

    /// Estimate the fee and maximum sendable amount for a transfer.
    pub async fn estimate_send(&self, request: &EstimateRequest) -> ZoriResult<EstimateResponse> {
        self.post_authed("/send/estimate", request).await
    }

    /// Submit a transfer.
    pub async fn send(&self, request: &SendRequest) -> ZoriResult<SendResponse> {
        self.post_authed("/send", request).await
    }

    /// Submit a Brazilian account-opening application. Unauthenticated; CPF
    /// and email are validated locally first, and the CPF is normalized to
    /// digits only before submission.
    pub async fn open_account_br(&self, application: &KycApplication) -> ZoriResult<serde_json::Value> {
        if !validate_cpf(&application.cpf) {
            return Err(ZoriError::validation("Invalid CPF"));
        }
        if !validate_email(&application.email) {
            return Err(ZoriError::validation("Invalid email address"));
        }

        let mut form = Form::new()
            .text("full_name", application.full_name.clone())
            .text("mother_name", application.mother_name.clone())
            .text("cpf", digits_only(&application.cpf))
            .text("email", application.email.clone())
            .text("phone", application.phone.clone());
        for document in &application.documents {
            let part = Part::bytes(document.bytes.clone())
                .file_name(document.file_name.clone())
                .mime_str(&document.content_type)
                .map_err(|e| ZoriError::validation(format!("Bad document type: {e}")))?;
            form = form.part(document.field_name.clone(), part);
        }

        let response = self
            .http
            .post(self.config.endpoint("/kyc/open-account-br"))
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;
        self.decode(response).await
    }

    async fn get_authed<T: DeserializeOwned>(&self, path: &str) -> ZoriResult<T> {
        let token = self.bearer()?;
        let response = self
            .http
            .get(self.config.endpoint(path))
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport_error)?;
        self.decode(response).await
    }

    async fn post_authed<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ZoriResult<T> {
        let token = self.bearer()?;
        let response = self
            .http
            .post(self.config.endpoint(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;
        self.decode(response).await
    }

    /// The stored access token, or `Unauthorized` without touching the
    /// network.
    fn bearer(&self) -> ZoriResult<String> {
        self.credentials
            .access_token()
            .ok_or_else(|| ZoriError::unauthorized("No access token found. Please log in."))
    }

    async fn decode<T: DeserializeOwned>(&self, response: reqwest::Response) -> ZoriResult<T> {
        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| ZoriError::serialization(format!("Bad response payload: {e}")));
        }
        let body = response.text().await.unwrap_or_default();
        Err(self.classify_failure(status, &body))
    }

    /// Map a failure response to the error taxonomy. A 401 clears the stored
    /// credentials as a side effect.
    pub(crate) fn classify_failure(&self, status: StatusCode, body: &str) -> ZoriError {
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("401 from backend, clearing stored credentials");
            self.credentials.clear();
            return ZoriError::unauthorized("Session expired. Please log in again.");
        }
        tracing::warn!(status = %status, "request failed");
        ZoriError::server(failure_message(status, body))
    }
}

fn transport_error(error: reqwest::Error) -> ZoriError {
    tracing::warn!("transport failure: {error}");
    ZoriError::network(error.to_string())
}

/// Extract the backend's message from a failure body: the JSON `error` field,
/// else `message`, else the raw body, else the status line.
fn failure_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error", "message"] {
            if let Some(message) = value.get(key).and_then(|m| m.as_str()) {
                return message.to_string();
            }
        }
    }
    if body.trim().is_empty() {
        status.to_string()
    } else {
        body.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemorySessionStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY};
    use assert_matches::assert_matches;

    fn client_with_session() -> (ApiClient, Arc<MemorySessionStore>) {
        let store = Arc::new(MemorySessionStore::new());
        store.set(ACCESS_TOKEN_KEY, "at-1");
        store.set(REFRESH_TOKEN_KEY, "rt-1");
        store.set(USER_KEY, "{}");
        let client = ApiClient::new(ApiConfig::default(), store.clone());
        (client, store)
    }

    #[test]
    fn unauthorized_clears_all_credentials() {
        let (client, store) = client_with_session();
        let err = client.classify_failure(StatusCode::UNAUTHORIZED, "");
        assert!(err.is_session_expired());
        assert!(store.get(ACCESS_TOKEN_KEY).is_none());
        assert!(store.get(REFRESH_TOKEN_KEY).is_none());
        assert!(store.get(USER_KEY).is_none());
    }

    #[test]
    fn server_failure_keeps_credentials_and_message() {
        let (client, store) = client_with_session();
        let err =
            client.classify_failure(StatusCode::BAD_REQUEST, r#"{"error": "insufficient funds"}"#);
        assert_matches!(err, ZoriError::Server { message } if message == "insufficient funds");
        assert!(store.get(ACCESS_TOKEN_KEY).is_some());
    }

    #[test]
    fn failure_message_fallbacks() {
        assert_eq!(
            failure_message(StatusCode::BAD_GATEWAY, r#"{"message": "upstream down"}"#),
            "upstream down"
        );
        assert_eq!(failure_message(StatusCode::BAD_GATEWAY, "plain text"), "plain text");
        assert_eq!(
            failure_message(StatusCode::BAD_GATEWAY, ""),
            "502 Bad Gateway"
        );
    }

    #[test]
    fn missing_token_fails_before_any_request() {
        let client = ApiClient::new(ApiConfig::default(), Arc::new(MemorySessionStore::new()));
        assert_matches!(client.bearer(), Err(ZoriError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn kyc_rejects_invalid_cpf_locally() {
        let (client, _) = client_with_session();
        let application = KycApplication {
            full_name: "Jane Doe".into(),
            mother_name: "Joan Doe".into(),
            cpf: "529.982.247-26".into(), // tampered check digit
            email: "jane@example.com".into(),
            phone: "+5511999999999".into(),
            documents: vec![],
        };
        let err = client.open_account_br(&application).await.unwrap_err();
        assert_matches!(err, ZoriError::Validation { .. });
    }
}
