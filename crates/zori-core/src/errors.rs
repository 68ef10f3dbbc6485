//! Unified error type for the Zori client
//!
//! One flat enum shared across the domain, network, and app layers. Variants
//! map to how the UI reacts: validation and section conflicts stay local and
//! block the offending action, unauthorized forces a re-login, network and
//! server failures degrade to a retry affordance.

use serde::{Deserialize, Serialize};

/// Result alias used throughout the Zori crates.
pub type ZoriResult<T> = Result<T, ZoriError>;

/// Unified error type for all Zori client operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum ZoriError {
    /// The request never completed (DNS, connect, timeout, transport).
    #[error("Network error: {message}")]
    Network {
        /// Description of the transport failure
        message: String,
    },

    /// The backend rejected the credentials (401). Stored credentials have
    /// been cleared by the time this surfaces; the user must log in again.
    #[error("Session expired: {message}")]
    Unauthorized {
        /// Description of the auth failure
        message: String,
    },

    /// Client-side format or business-rule failure. Resolved locally; no
    /// state was mutated.
    #[error("Validation failed: {message}")]
    Validation {
        /// Human-readable reason shown next to the offending control
        message: String,
    },

    /// An edit was attempted on one profile section while another is active.
    /// Non-fatal; the active section's in-progress edits are untouched.
    #[error("Finish editing \"{active}\" first")]
    SectionConflict {
        /// Display name of the section currently being edited
        active: String,
    },

    /// Non-401 failure response from the backend, with its message.
    #[error("Server error: {message}")]
    Server {
        /// Message reported by the backend
        message: String,
    },

    /// Payload could not be encoded or decoded.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Description of the serialization failure
        message: String,
    },
}

impl ZoriError {
    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a section conflict carrying the active section's display name.
    pub fn section_conflict(active: impl Into<String>) -> Self {
        Self::SectionConflict {
            active: active.into(),
        }
    }

    /// Create a server error.
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server {
            message: message.into(),
        }
    }

    /// Create a serialization error.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Whether this error means the session is gone and the user must
    /// authenticate again.
    #[must_use]
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Whether this error is likely transient and worth a retry affordance.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Server { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_expired_is_distinct_from_other_failures() {
        assert!(ZoriError::unauthorized("expired").is_session_expired());
        assert!(!ZoriError::network("down").is_session_expired());
        assert!(!ZoriError::server("boom").is_session_expired());
    }

    #[test]
    fn retryable_classification() {
        assert!(ZoriError::network("down").is_retryable());
        assert!(ZoriError::server("boom").is_retryable());
        assert!(!ZoriError::validation("bad cpf").is_retryable());
        assert!(!ZoriError::unauthorized("expired").is_retryable());
    }

    #[test]
    fn section_conflict_names_the_active_section() {
        let err = ZoriError::section_conflict("Contact");
        assert_eq!(err.to_string(), "Finish editing \"Contact\" first");
    }
}
