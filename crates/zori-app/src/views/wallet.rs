//! Panel load lifecycle
//!
//! Every data-backed panel moves through the same four states. Session
//! expiry is its own state rather than a failure message: the shell reacts
//! to it by routing to login, not by showing a retry affordance.

use zori_core::{ZoriError, ZoriResult};

/// Load state of a data-backed panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Panel<T> {
    /// Fetch in flight
    #[default]
    Loading,
    /// Data arrived
    Ready(T),
    /// Fetch failed for a reason other than auth
    Failed {
        /// User-facing failure message
        message: String,
    },
    /// Credentials were rejected; the shell must route to login
    SessionExpired,
}

impl<T> Panel<T> {
    /// Fold a fetch result into a panel state, routing auth failures to
    /// [`Panel::SessionExpired`].
    pub fn from_result(result: ZoriResult<T>) -> Self {
        match result {
            Ok(value) => Panel::Ready(value),
            Err(err) if err.is_session_expired() => Panel::SessionExpired,
            Err(err) => Panel::Failed {
                message: err.to_string(),
            },
        }
    }

    /// Whether the fetch is still in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Panel::Loading)
    }

    /// Whether the shell must route to login.
    #[must_use]
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Panel::SessionExpired)
    }

    /// The loaded value, if ready.
    #[must_use]
    pub fn as_ready(&self) -> Option<&T> {
        match self {
            Panel::Ready(value) => Some(value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn auth_failures_become_session_expired_not_failed() {
        let panel: Panel<u32> =
            Panel::from_result(Err(ZoriError::unauthorized("Session expired. Please log in again.")));
        assert!(panel.is_session_expired());

        let panel: Panel<u32> = Panel::from_result(Err(ZoriError::server("backend exploded")));
        assert_matches!(panel, Panel::Failed { message } if message.contains("backend exploded"));
    }

    #[test]
    fn ready_exposes_the_value() {
        let panel = Panel::from_result(Ok(7u32));
        assert_eq!(panel.as_ready(), Some(&7));
        assert!(!panel.is_loading());
    }

    #[test]
    fn default_is_loading() {
        let panel: Panel<()> = Panel::default();
        assert!(panel.is_loading());
    }
}
