//! Change-request composition
//!
//! Profile edits are not written back through the API; they are routed to the
//! operations team as a plain-text change request delivered over `mailto:`.
//! The composer renders the pending set deterministically so the same edits
//! always produce the same request text.

use super::editor::{PendingChangeSet, ProfileEditor, FIELD_FULL_NAME};

/// Who the change request is about. Pending-aware: a pending full-name edit
/// shows the requested name, not the one on file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestIdentity {
    /// Display name, or "Unknown"
    pub user_name: String,
    /// Contact email, or "Unknown"
    pub user_email: String,
}

impl RequestIdentity {
    /// Derive the identity from the editor's current state.
    #[must_use]
    pub fn from_editor(editor: &ProfileEditor) -> Self {
        let user_name = editor
            .display_value(FIELD_FULL_NAME, editor.snapshot().full_name())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "Unknown".to_string());
        let user_email = editor
            .snapshot()
            .identity_email()
            .map(str::to_string)
            .unwrap_or_else(|| "Unknown".to_string());
        Self {
            user_name,
            user_email,
        }
    }
}

/// Render the pending change set as the plain-text request body.
///
/// Additions (fields that were blank) and modifications are listed under
/// separate headings; contact changes get their own sections. Empty sections
/// are omitted entirely.
#[must_use]
pub fn compose_change_request(pending: &PendingChangeSet, identity: &RequestIdentity) -> String {
    let mut sections: Vec<String> = Vec::new();

    let additions: Vec<String> = pending
        .fields
        .iter()
        .filter(|(_, edit)| edit.was_blank)
        .map(|(key, edit)| format!("- {key}: \"{}\"", edit.new_value))
        .collect();
    if !additions.is_empty() {
        sections.push(format!("New data to be added:\n{}", additions.join("\n")));
    }

    let changes: Vec<String> = pending
        .fields
        .iter()
        .filter(|(_, edit)| !edit.was_blank)
        .map(|(key, edit)| {
            let old = edit.original_value.as_deref().unwrap_or_default();
            format!("- {key}: \"{old}\" -> \"{}\"", edit.new_value)
        })
        .collect();
    if !changes.is_empty() {
        sections.push(format!("Data changes requested:\n{}", changes.join("\n")));
    }

    if let Some(contact) = &pending.contact {
        if !contact.new_phones.is_empty() {
            let lines: Vec<String> = contact
                .new_phones
                .iter()
                .map(|p| format!("- {} ({})", p.phone_number, p.phone_type))
                .collect();
            sections.push(format!("New phones to add:\n{}", lines.join("\n")));
        }
        if !contact.deleted_phones.is_empty() {
            let lines: Vec<String> = contact
                .deleted_phones
                .iter()
                .map(|n| format!("- {n}"))
                .collect();
            sections.push(format!("Phones to remove:\n{}", lines.join("\n")));
        }
        if !contact.new_emails.is_empty() {
            let lines: Vec<String> = contact
                .new_emails
                .iter()
                .map(|e| format!("- {} ({})", e.email_address, e.email_type))
                .collect();
            sections.push(format!("New emails to add:\n{}", lines.join("\n")));
        }
        if !contact.deleted_emails.is_empty() {
            let lines: Vec<String> = contact
                .deleted_emails
                .iter()
                .map(|a| format!("- {a}"))
                .collect();
            sections.push(format!("Emails to remove:\n{}", lines.join("\n")));
        }
        if let Some(phone) = &contact.new_login_phone {
            sections.push(format!("Change login phone to: {phone}"));
        }
        if let Some(email) = &contact.new_login_email {
            sections.push(format!("Change login email to: {email}"));
        }
    }

    let mut body = format!(
        "Profile Update Request\n\nUser: {}\nEmail: {}\n\n",
        identity.user_name, identity.user_email
    );
    body.push_str(&sections.join("\n\n"));
    body.push_str("\n\nPlease review and update the user's profile accordingly.");
    body
}

/// Build a `mailto:` URL with percent-encoded subject and body.
#[must_use]
pub fn mailto_url(to: &str, subject: &str, body: &str) -> String {
    format!(
        "mailto:{to}?subject={}&body={}",
        percent_encode(subject),
        percent_encode(body)
    )
}

/// RFC 3986 percent-encoding, keeping only unreserved characters.
fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => {
                out.push_str(&format!("%{byte:02X}"));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::editor::{ContactDelta, FieldEdit, NewPhone};

    fn identity() -> RequestIdentity {
        RequestIdentity {
            user_name: "Jane Doe".into(),
            user_email: "jane@example.com".into(),
        }
    }

    #[test]
    fn blank_fields_render_as_additions() {
        let mut pending = PendingChangeSet::default();
        pending.fields.insert(
            "Date of Birth".into(),
            FieldEdit {
                original_value: None,
                new_value: "1990-01-01".into(),
                was_blank: true,
            },
        );
        let body = compose_change_request(&pending, &identity());
        assert!(body.contains("New data to be added:\n- Date of Birth: \"1990-01-01\""));
        assert!(!body.contains("Data changes requested:"));
    }

    #[test]
    fn edited_fields_render_as_changes_with_both_values() {
        let mut pending = PendingChangeSet::default();
        pending.fields.insert(
            "Full Name".into(),
            FieldEdit {
                original_value: Some("Jane Doe".into()),
                new_value: "Janet Doe".into(),
                was_blank: false,
            },
        );
        let body = compose_change_request(&pending, &identity());
        assert!(body.contains("Data changes requested:\n- Full Name: \"Jane Doe\" -> \"Janet Doe\""));
        assert!(!body.contains("New data to be added:"));
    }

    #[test]
    fn contact_delta_renders_all_sections() {
        let mut delta = ContactDelta::default();
        delta.new_phones.push(NewPhone {
            phone_number: "+5511999999999".into(),
            phone_type: "mobile".into(),
        });
        delta.deleted_phones.insert("+5511933332222".into());
        delta.new_login_phone = Some("+5511999999999".into());
        let pending = PendingChangeSet {
            fields: Default::default(),
            contact: Some(delta),
        };

        let body = compose_change_request(&pending, &identity());
        assert!(body.contains("New phones to add:\n- +5511999999999 (mobile)"));
        assert!(body.contains("Phones to remove:\n- +5511933332222"));
        assert!(body.contains("Change login phone to: +5511999999999"));
        assert!(body.starts_with("Profile Update Request\n\nUser: Jane Doe\nEmail: jane@example.com"));
        assert!(body.ends_with("Please review and update the user's profile accordingly."));
    }

    #[test]
    fn mailto_url_percent_encodes_subject_and_body() {
        let url = mailto_url("support@zori.example", "Profile Update Request", "line 1\nline 2");
        assert_eq!(
            url,
            "mailto:support@zori.example?subject=Profile%20Update%20Request&body=line%201%0Aline%202"
        );
    }

    #[test]
    fn unicode_is_encoded_per_byte() {
        assert_eq!(super::percent_encode("São"), "S%C3%A3o");
    }
}
