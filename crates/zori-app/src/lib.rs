//! # Zori App
//!
//! Portable headless application core for the Zori wallet. Pure state:
//! every transition happens synchronously in response to a discrete user
//! action or a completed network response, so frontends on any runtime can
//! drive it. Network I/O lives in `zori-client`; rendering is the frontend's
//! problem.
//!
//! The main pieces:
//! - [`settings::ProfileEditor`]: the profile edit-session state machine
//!   (one active section, pending change set, contact delta reconciliation)
//! - [`settings::compose_change_request`]: renders pending changes into the
//!   change request handed to the delivery mechanism
//! - [`views::SendWizard`]: the send-money flow with its duplicate-submission
//!   guard and failure rollback
//! - [`views::Panel`]: per-panel load state, with session expiry distinct
//!   from retryable failures

pub mod settings;
pub mod views;

pub use settings::{
    compose_change_request, mailto_url, ContactDelta, FieldEdit, NewEmail, NewPhone,
    PendingChangeSet, ProfileEditor, ProfileSection, RequestIdentity,
};
pub use views::{Panel, SendStep, SendWizard};
