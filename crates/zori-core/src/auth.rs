//! # Auth Wire Types
//!
//! Token and user-record payloads of the OAuth + passkey login flow. The
//! flow itself (endpoint calls, token storage) lives in `zori-client`.

use serde::{Deserialize, Serialize};

/// The authenticated user's basic record, cached locally after login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Backend person identifier
    pub person_id: String,
    /// Login email
    pub email: String,
    /// Display name
    pub display_name: String,
    /// Avatar URL from the identity provider, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Final token set issued after passkey verification or refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTokens {
    /// Bearer token for API calls
    pub access_token: String,
    /// Token used to obtain a new access token
    pub refresh_token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: u64,
}

/// Response of `POST /auth/google/callback`: an intermediate token that must
/// be upgraded through the passkey ceremony before API access is granted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoogleCallbackResponse {
    /// Short-lived token accepted only by the passkey endpoints
    pub intermediate_token: String,
    /// Intermediate token lifetime in seconds
    pub expires_in: u64,
    /// The identified user
    pub user: UserRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_record_round_trips_without_avatar() {
        let user = UserRecord {
            person_id: "p-1".into(),
            email: "jane@example.com".into(),
            display_name: "Jane".into(),
            avatar_url: None,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("avatar_url"));
        let back: UserRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, user);
    }
}
