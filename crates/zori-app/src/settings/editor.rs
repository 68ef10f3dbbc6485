//! Profile edit-session state machine
//!
//! The editor owns three layers of state:
//!
//! 1. the immutable [`ProfileSnapshot`] fetched on mount,
//! 2. the transient edit session: which section is open and the in-progress
//!    field edits (plus, for the contact section, the working contact delta),
//! 3. the [`PendingChangeSet`]: edits saved out of a session but not yet
//!    submitted.
//!
//! The "one active section" rule is a mutex over the profile form: starting a
//! second section while another is open fails with a section conflict and
//! mutates nothing. Contact edits have two homes, the working delta while
//! editing and the single pending delta after saving, and re-entering the
//! contact section moves the pending delta back into the working state so the
//! two are never visible at once.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use zori_core::validation::{normalize_phone, validate_email, validate_phone};
use zori_core::{ProfileSnapshot, ZoriError, ZoriResult};

use super::section::ProfileSection;

/// Field key for the full name.
pub const FIELD_FULL_NAME: &str = "Full Name";
/// Field key for the birth city (jointly required with the birth country).
pub const FIELD_BIRTH_CITY: &str = "Birth City";
/// Field key for the birth country (jointly required with the birth city).
pub const FIELD_BIRTH_COUNTRY: &str = "Birth Country";

/// One edited free-text/date/select field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEdit {
    /// Value at edit time, straight from the snapshot
    pub original_value: Option<String>,
    /// Value the user entered
    pub new_value: String,
    /// Whether the field was blank when editing started. Decides whether the
    /// change request phrases this as an addition or a modification.
    pub was_blank: bool,
}

/// A phone number being added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPhone {
    /// Number, normalized to international format
    pub phone_number: String,
    /// Phone type code
    pub phone_type: String,
}

/// An email address being added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmail {
    /// Address, trimmed and lowercased
    pub email_address: String,
    /// Email type code
    pub email_type: String,
}

/// Aggregate delta for the contact section. The section is a single logical
/// unit: at most one delta is pending at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDelta {
    /// Phones to add
    pub new_phones: Vec<NewPhone>,
    /// Existing phone numbers marked for removal
    pub deleted_phones: BTreeSet<String>,
    /// Emails to add
    pub new_emails: Vec<NewEmail>,
    /// Existing email addresses marked for removal
    pub deleted_emails: BTreeSet<String>,
    /// Proposed new login phone, if any
    pub new_login_phone: Option<String>,
    /// Proposed new login email, if any
    pub new_login_email: Option<String>,
}

impl ContactDelta {
    /// Whether the delta carries no changes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.new_phones.is_empty()
            && self.deleted_phones.is_empty()
            && self.new_emails.is_empty()
            && self.deleted_emails.is_empty()
            && self.new_login_phone.is_none()
            && self.new_login_email.is_none()
    }
}

/// Everything saved out of edit sessions but not yet submitted. Cleared only
/// on successful submission hand-off or a full reload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingChangeSet {
    /// Field edits, keyed by field name. Ordered for deterministic rendering.
    pub fields: BTreeMap<String, FieldEdit>,
    /// The single pending contact delta, if any
    pub contact: Option<ContactDelta>,
}

impl PendingChangeSet {
    /// Whether anything is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.contact.is_none()
    }
}

/// The transient per-section edit state.
#[derive(Debug, Clone, Default)]
struct SessionBuffer {
    fields: BTreeMap<String, FieldEdit>,
    contact: ContactDelta,
}

/// The profile edit-session state machine. See the module docs for the state
/// layering.
#[derive(Debug, Clone)]
pub struct ProfileEditor {
    snapshot: ProfileSnapshot,
    pending: PendingChangeSet,
    active: Option<(ProfileSection, SessionBuffer)>,
}

impl ProfileEditor {
    /// Create an editor over a freshly fetched snapshot.
    #[must_use]
    pub fn new(snapshot: ProfileSnapshot) -> Self {
        Self {
            snapshot,
            pending: PendingChangeSet::default(),
            active: None,
        }
    }

    /// The read-only snapshot.
    #[must_use]
    pub fn snapshot(&self) -> &ProfileSnapshot {
        &self.snapshot
    }

    /// The section currently being edited, if any.
    #[must_use]
    pub fn active_section(&self) -> Option<ProfileSection> {
        self.active.as_ref().map(|(section, _)| *section)
    }

    /// Saved-but-unsubmitted changes.
    #[must_use]
    pub fn pending(&self) -> &PendingChangeSet {
        &self.pending
    }

    /// Whether anything awaits submission.
    #[must_use]
    pub fn has_pending_changes(&self) -> bool {
        !self.pending.is_empty()
    }

    /// The contact delta of the active contact session, if one is open.
    #[must_use]
    pub fn working_contact(&self) -> Option<&ContactDelta> {
        match &self.active {
            Some((ProfileSection::Contact, buffer)) => Some(&buffer.contact),
            _ => None,
        }
    }

    /// Flush the pending set after the composed change request was handed to
    /// the delivery mechanism.
    pub fn clear_pending(&mut self) {
        self.pending = PendingChangeSet::default();
    }

    // =========================================================================
    // Session lifecycle
    // =========================================================================

    /// Open an edit session on a section.
    ///
    /// Fails with [`ZoriError::SectionConflict`] (carrying the active
    /// section's display name, mutating nothing) if a different section is
    /// already open. Re-entering the already-active section is a no-op. For
    /// the contact section, any pending contact delta is moved back into the
    /// working state so saved and in-progress edits are never both visible.
    pub fn start_edit(&mut self, section: ProfileSection) -> ZoriResult<()> {
        if let Some((active, _)) = &self.active {
            if *active == section {
                return Ok(());
            }
            return Err(ZoriError::section_conflict(active.title()));
        }

        let mut buffer = SessionBuffer::default();
        if section == ProfileSection::Contact {
            if let Some(delta) = self.pending.contact.take() {
                tracing::debug!(section = section.title(), "rehydrating pending contact delta");
                buffer.contact = delta;
            }
        }
        self.active = Some((section, buffer));
        Ok(())
    }

    /// Discard the active session's buffer and return to idle. Previously
    /// saved pending changes are untouched.
    pub fn cancel_edit(&mut self) {
        self.active = None;
    }

    /// Record a field edit in the active session.
    ///
    /// `was_blank` is computed from `original_value` on every call; since the
    /// snapshot is read-only, the value is invariant per field within a
    /// session.
    pub fn edit_field(
        &mut self,
        key: &str,
        new_value: &str,
        original_value: Option<&str>,
    ) -> ZoriResult<()> {
        let (_, buffer) = self.active_mut()?;
        let was_blank = original_value.map_or(true, |v| v.trim().is_empty());
        buffer.fields.insert(
            key.to_string(),
            FieldEdit {
                original_value: original_value.map(str::to_string),
                new_value: new_value.to_string(),
                was_blank,
            },
        );
        Ok(())
    }

    /// Validate and save the active session into the pending set, then return
    /// to idle.
    ///
    /// On a validation failure the session stays open with its buffer intact.
    /// Only fields whose value actually differs from the original are
    /// promoted; the contact delta replaces any pending one wholesale (only
    /// one can exist, and re-editing already drained it).
    pub fn save_section(&mut self) -> ZoriResult<()> {
        let (section, buffer) = match &self.active {
            Some((section, buffer)) => (*section, buffer),
            None => return Err(ZoriError::validation("No section is being edited")),
        };

        match section {
            ProfileSection::Personal => self.validate_birthplace(buffer)?,
            ProfileSection::Contact => self.validate_login_replacement(&buffer.contact)?,
            _ => {}
        }

        let (section, buffer) = match self.active.take() {
            Some(active) => active,
            None => return Err(ZoriError::validation("No section is being edited")),
        };

        let mut promoted = 0usize;
        for (key, edit) in buffer.fields {
            let original = edit.original_value.as_deref().unwrap_or_default();
            if edit.new_value != original {
                self.pending.fields.insert(key, edit);
                promoted += 1;
            }
        }
        if section == ProfileSection::Contact && !buffer.contact.is_empty() {
            self.pending.contact = Some(buffer.contact);
        }
        tracing::debug!(section = section.title(), promoted, "section saved");
        Ok(())
    }

    // =========================================================================
    // Contact operations (require an active contact session)
    // =========================================================================

    /// Add a phone number to the working delta. The number is normalized
    /// (separators stripped) before validation and duplicate checks against
    /// both the snapshot and the in-progress additions.
    pub fn add_phone(&mut self, number: &str, phone_type: &str) -> ZoriResult<()> {
        let snapshot_has = self
            .snapshot
            .contact
            .as_ref()
            .is_some_and(|c| c.has_phone(&normalize_phone(number)));
        let contact = self.contact_mut()?;

        let number = normalize_phone(number);
        if number.is_empty() {
            return Err(ZoriError::validation("Phone number is required"));
        }
        if !validate_phone(&number) {
            return Err(ZoriError::validation(
                "Invalid format. Use the international format: +55...",
            ));
        }
        if snapshot_has || contact.new_phones.iter().any(|p| p.phone_number == number) {
            return Err(ZoriError::validation("This phone already exists"));
        }
        contact.new_phones.push(NewPhone {
            phone_number: number,
            phone_type: phone_type.to_string(),
        });
        Ok(())
    }

    /// Add an email address to the working delta. The address is trimmed and
    /// lowercased before validation and duplicate checks.
    pub fn add_email(&mut self, address: &str, email_type: &str) -> ZoriResult<()> {
        let address = address.trim().to_lowercase();
        let snapshot_has = self
            .snapshot
            .contact
            .as_ref()
            .is_some_and(|c| c.has_email(&address));
        let contact = self.contact_mut()?;

        if address.is_empty() {
            return Err(ZoriError::validation("Email is required"));
        }
        if !validate_email(&address) {
            return Err(ZoriError::validation("Invalid email format"));
        }
        if snapshot_has || contact.new_emails.iter().any(|e| e.email_address == address) {
            return Err(ZoriError::validation("This email already exists"));
        }
        contact.new_emails.push(NewEmail {
            email_address: address,
            email_type: email_type.to_string(),
        });
        Ok(())
    }

    /// Remove a not-yet-persisted phone outright. A login selection pointing
    /// at the removed number is cleared with it.
    pub fn remove_new_phone(&mut self, number: &str) -> ZoriResult<()> {
        let contact = self.contact_mut()?;
        contact.new_phones.retain(|p| p.phone_number != number);
        if contact.new_login_phone.as_deref() == Some(number) {
            contact.new_login_phone = None;
        }
        Ok(())
    }

    /// Remove a not-yet-persisted email outright. A login selection pointing
    /// at the removed address is cleared with it.
    pub fn remove_new_email(&mut self, address: &str) -> ZoriResult<()> {
        let contact = self.contact_mut()?;
        contact.new_emails.retain(|e| e.email_address != address);
        if contact.new_login_email.as_deref() == Some(address) {
            contact.new_login_email = None;
        }
        Ok(())
    }

    /// Toggle an existing (snapshot-sourced) phone in the working deleted
    /// set. Numbers not on file are ignored; newly added numbers are removed
    /// via [`Self::remove_new_phone`] instead.
    pub fn toggle_delete_phone(&mut self, number: &str) -> ZoriResult<()> {
        let on_file = self
            .snapshot
            .contact
            .as_ref()
            .is_some_and(|c| c.has_phone(number));
        let contact = self.contact_mut()?;
        if !on_file {
            return Ok(());
        }
        if !contact.deleted_phones.remove(number) {
            contact.deleted_phones.insert(number.to_string());
        }
        Ok(())
    }

    /// Toggle an existing (snapshot-sourced) email in the working deleted
    /// set.
    pub fn toggle_delete_email(&mut self, address: &str) -> ZoriResult<()> {
        let on_file = self
            .snapshot
            .contact
            .as_ref()
            .is_some_and(|c| c.has_email(address));
        let contact = self.contact_mut()?;
        if !on_file {
            return Ok(());
        }
        if !contact.deleted_emails.remove(address) {
            contact.deleted_emails.insert(address.to_string());
        }
        Ok(())
    }

    /// Toggle a phone (existing or newly added) as the proposed new login
    /// credential. At most one candidate may be marked; re-toggling the same
    /// candidate clears the selection.
    pub fn set_new_login_phone(&mut self, number: &str) -> ZoriResult<()> {
        let known = self
            .snapshot
            .contact
            .as_ref()
            .is_some_and(|c| c.has_phone(number));
        let contact = self.contact_mut()?;
        let added = contact.new_phones.iter().any(|p| p.phone_number == number);
        if !known && !added {
            return Err(ZoriError::validation("Unknown phone number"));
        }
        contact.new_login_phone = if contact.new_login_phone.as_deref() == Some(number) {
            None
        } else {
            Some(number.to_string())
        };
        Ok(())
    }

    /// Toggle an email (existing or newly added) as the proposed new login
    /// credential.
    pub fn set_new_login_email(&mut self, address: &str) -> ZoriResult<()> {
        let known = self
            .snapshot
            .contact
            .as_ref()
            .is_some_and(|c| c.has_email(address));
        let contact = self.contact_mut()?;
        let added = contact.new_emails.iter().any(|e| e.email_address == address);
        if !known && !added {
            return Err(ZoriError::validation("Unknown email address"));
        }
        contact.new_login_email = if contact.new_login_email.as_deref() == Some(address) {
            None
        } else {
            Some(address.to_string())
        };
        Ok(())
    }

    // =========================================================================
    // Display queries
    // =========================================================================

    /// Value an edit control should show: the in-progress edit if one exists,
    /// else the pending value, else the original.
    #[must_use]
    pub fn edited_value(&self, key: &str, original: Option<&str>) -> String {
        if let Some((_, buffer)) = &self.active {
            if let Some(edit) = buffer.fields.get(key) {
                return edit.new_value.clone();
            }
        }
        if let Some(edit) = self.pending.fields.get(key) {
            return edit.new_value.clone();
        }
        original.unwrap_or_default().to_string()
    }

    /// Value display mode should show: the pending value if one exists, else
    /// the original.
    #[must_use]
    pub fn display_value(&self, key: &str, original: Option<&str>) -> Option<String> {
        if let Some(edit) = self.pending.fields.get(key) {
            return Some(edit.new_value.clone());
        }
        original.map(str::to_string)
    }

    /// Whether a field has a pending (saved, unsubmitted) change.
    #[must_use]
    pub fn is_field_changed(&self, key: &str) -> bool {
        self.pending.fields.contains_key(key)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn active_mut(&mut self) -> ZoriResult<&mut (ProfileSection, SessionBuffer)> {
        self.active
            .as_mut()
            .ok_or_else(|| ZoriError::validation("No section is being edited"))
    }

    fn contact_mut(&mut self) -> ZoriResult<&mut ContactDelta> {
        match &mut self.active {
            Some((ProfileSection::Contact, buffer)) => Ok(&mut buffer.contact),
            _ => Err(ZoriError::validation(
                "The contact section is not being edited",
            )),
        }
    }

    /// Birth city and country are jointly required: if either was edited,
    /// both must end up non-empty.
    fn validate_birthplace(&self, buffer: &SessionBuffer) -> ZoriResult<()> {
        let city_edited = buffer.fields.contains_key(FIELD_BIRTH_CITY);
        let country_edited = buffer.fields.contains_key(FIELD_BIRTH_COUNTRY);
        if !city_edited && !country_edited {
            return Ok(());
        }

        let personal = self.snapshot.personal.as_ref();
        let city = buffer
            .fields
            .get(FIELD_BIRTH_CITY)
            .map(|e| e.new_value.clone())
            .or_else(|| personal.and_then(|p| p.birth_city.clone()))
            .unwrap_or_default();
        let country = buffer
            .fields
            .get(FIELD_BIRTH_COUNTRY)
            .map(|e| e.new_value.clone())
            .or_else(|| personal.and_then(|p| p.birth_country.clone()))
            .unwrap_or_default();

        if !city.is_empty() && country.is_empty() {
            return Err(ZoriError::validation("Please select a country of birth"));
        }
        if !country.is_empty() && city.is_empty() {
            return Err(ZoriError::validation("Please enter a city of birth"));
        }
        Ok(())
    }

    /// A login credential may only be deleted if a replacement was selected
    /// in the same pass.
    fn validate_login_replacement(&self, contact: &ContactDelta) -> ZoriResult<()> {
        if let Some(login_phone) = self.snapshot.login_phone() {
            if contact.deleted_phones.contains(login_phone) && contact.new_login_phone.is_none() {
                return Err(ZoriError::validation(
                    "You must select a new login phone before deleting the current one",
                ));
            }
        }
        if let Some(login_email) = self.snapshot.login_email() {
            if contact.deleted_emails.contains(login_email) && contact.new_login_email.is_none() {
                return Err(ZoriError::validation(
                    "You must select a new login email before deleting the current one",
                ));
            }
        }
        Ok(())
    }
}
