//! # Profile Settings Workflow
//!
//! The profile screen shows a read-only snapshot; edits accumulate locally as
//! pending changes and are submitted for back-office approval as a composed
//! change request, never written to the backend directly. This module owns
//! that whole lifecycle: the per-section edit session, the pending change
//! set, and the change-request composer.

mod compose;
mod editor;
mod section;

pub use compose::{compose_change_request, mailto_url, RequestIdentity};
pub use editor::{
    ContactDelta, FieldEdit, NewEmail, NewPhone, PendingChangeSet, ProfileEditor,
    FIELD_BIRTH_CITY, FIELD_BIRTH_COUNTRY, FIELD_FULL_NAME,
};
pub use section::ProfileSection;
