//! # Profile Read Model
//!
//! Server-provided projection of a user's registration data. The snapshot is
//! immutable for the duration of an edit session; edits accumulate separately
//! in `zori-app` and are submitted as a change request, never written back
//! into these types.

use serde::{Deserialize, Serialize};

/// Personal information section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    /// Full legal name
    pub full_name: String,
    /// Date of birth (ISO date string as served by the backend)
    pub date_of_birth: Option<String>,
    /// City of birth
    pub birth_city: Option<String>,
    /// Country of birth (ISO code)
    pub birth_country: Option<String>,
}

/// A phone number on file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneInfo {
    /// Number in international dialing format
    pub phone_number: String,
    /// Phone type code (mobile, work, voip, ...)
    pub phone_type: Option<String>,
    /// Whether this number is the login credential
    pub is_primary_for_login: bool,
}

/// An email address on file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailInfo {
    /// Address, stored lowercase
    pub email_address: String,
    /// Email type code (personal, work, other)
    pub email_type: Option<String>,
    /// Whether this address is the login credential
    pub is_primary_for_login: bool,
}

/// Contact section: phones and emails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    /// Phone numbers on file
    pub phones: Vec<PhoneInfo>,
    /// Email addresses on file
    pub emails: Vec<EmailInfo>,
}

impl ContactInfo {
    /// The phone number currently designated for login, if any.
    #[must_use]
    pub fn login_phone(&self) -> Option<&str> {
        self.phones
            .iter()
            .find(|p| p.is_primary_for_login)
            .map(|p| p.phone_number.as_str())
    }

    /// The email address currently designated for login, if any.
    #[must_use]
    pub fn login_email(&self) -> Option<&str> {
        self.emails
            .iter()
            .find(|e| e.is_primary_for_login)
            .map(|e| e.email_address.as_str())
    }

    /// Whether a phone number already exists on file.
    #[must_use]
    pub fn has_phone(&self, number: &str) -> bool {
        self.phones.iter().any(|p| p.phone_number == number)
    }

    /// Whether an email address already exists on file.
    #[must_use]
    pub fn has_email(&self, address: &str) -> bool {
        self.emails.iter().any(|e| e.email_address == address)
    }
}

/// Residential address section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressInfo {
    /// Street address line 1
    pub line1: Option<String>,
    /// Street address line 2
    pub line2: Option<String>,
    /// City
    pub city: Option<String>,
    /// State or province code
    pub state: Option<String>,
    /// Postal code
    pub postal_code: Option<String>,
    /// Country (ISO code)
    pub country: Option<String>,
}

/// Blockchain section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockchainInfo {
    /// Custodial wallet address on Polygon
    pub polygon_address: Option<String>,
}

/// Brazilian bank account on file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrazilBankAccount {
    /// Bank code
    pub bank_code: Option<String>,
    /// Branch (agência) number
    pub branch_number: Option<String>,
    /// Account number
    pub account_number: Option<String>,
}

/// US bank account on file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsaBankAccount {
    /// ABA routing number
    pub routing_number: String,
    /// Account number
    pub account_number: String,
}

/// Bank accounts section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountsInfo {
    /// Brazilian account, if any
    pub brazil: Option<BrazilBankAccount>,
    /// US account, if any
    pub usa: Option<UsaBankAccount>,
}

/// Brazilian identity documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrazilDocuments {
    /// CPF, digits only. Read-only; never part of a change request.
    pub cpf: String,
    /// RG number
    pub rg_number: Option<String>,
    /// RG issuing body (e.g. SSP/SP)
    pub rg_issuer: Option<String>,
    /// RG issue date
    pub rg_issued_at: Option<String>,
}

/// US identity documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsaDocuments {
    /// Last four digits of the SSN
    pub ssn_last4: Option<String>,
    /// Driver's license number
    pub drivers_license_number: Option<String>,
    /// Driver's license issuing state
    pub drivers_license_state: Option<String>,
}

/// Documents section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentsInfo {
    /// Brazilian documents, if any
    pub brazil: Option<BrazilDocuments>,
    /// US documents, if any
    pub usa: Option<UsaDocuments>,
}

/// Full profile snapshot as returned by `GET /profile`.
///
/// Fetched once on mount and treated as read-only; refreshed only on a full
/// reload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    /// Personal information
    pub personal: Option<PersonalInfo>,
    /// Contact information
    pub contact: Option<ContactInfo>,
    /// Residential address
    pub address: Option<AddressInfo>,
    /// Blockchain data
    pub blockchain: Option<BlockchainInfo>,
    /// Bank accounts
    pub accounts: Option<AccountsInfo>,
    /// Identity documents
    pub documents: Option<DocumentsInfo>,
}

impl ProfileSnapshot {
    /// The login phone number, if one is on file.
    #[must_use]
    pub fn login_phone(&self) -> Option<&str> {
        self.contact.as_ref().and_then(ContactInfo::login_phone)
    }

    /// The login email address, if one is on file.
    #[must_use]
    pub fn login_email(&self) -> Option<&str> {
        self.contact.as_ref().and_then(ContactInfo::login_email)
    }

    /// Best email to identify the user: the login email, else the first
    /// email on file.
    #[must_use]
    pub fn identity_email(&self) -> Option<&str> {
        self.login_email().or_else(|| {
            self.contact
                .as_ref()
                .and_then(|c| c.emails.first())
                .map(|e| e.email_address.as_str())
        })
    }

    /// The full name on file, if present.
    #[must_use]
    pub fn full_name(&self) -> Option<&str> {
        self.personal
            .as_ref()
            .map(|p| p.full_name.as_str())
            .filter(|n| !n.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact() -> ContactInfo {
        ContactInfo {
            phones: vec![
                PhoneInfo {
                    phone_number: "+5511988887777".into(),
                    phone_type: Some("mobile".into()),
                    is_primary_for_login: true,
                },
                PhoneInfo {
                    phone_number: "+5511933332222".into(),
                    phone_type: Some("work".into()),
                    is_primary_for_login: false,
                },
            ],
            emails: vec![EmailInfo {
                email_address: "jane@example.com".into(),
                email_type: Some("personal".into()),
                is_primary_for_login: true,
            }],
        }
    }

    #[test]
    fn login_credential_lookup() {
        let c = contact();
        assert_eq!(c.login_phone(), Some("+5511988887777"));
        assert_eq!(c.login_email(), Some("jane@example.com"));
        assert!(c.has_phone("+5511933332222"));
        assert!(!c.has_phone("+19990000000"));
    }

    #[test]
    fn identity_email_falls_back_to_first() {
        let mut c = contact();
        c.emails[0].is_primary_for_login = false;
        let snapshot = ProfileSnapshot {
            contact: Some(c),
            ..Default::default()
        };
        assert_eq!(snapshot.identity_email(), Some("jane@example.com"));
    }

    #[test]
    fn deserializes_backend_shape() {
        let json = r#"{
            "personal": {"full_name": "Jane Doe", "date_of_birth": null, "birth_city": null, "birth_country": null},
            "contact": {"phones": [], "emails": []},
            "address": null,
            "blockchain": {"polygon_address": "0x0000000000000000000000000000000000000001"},
            "accounts": null,
            "documents": null
        }"#;
        let snapshot: ProfileSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.full_name(), Some("Jane Doe"));
        assert!(snapshot.address.is_none());
    }
}
