//! Profile sections

use serde::{Deserialize, Serialize};

/// The editable sections of the profile screen. At most one may be in an
/// active edit session at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfileSection {
    /// Name, date of birth, birthplace
    Personal,
    /// Identity documents (CPF is shown but never editable)
    Documents,
    /// Phones and emails, including the login credential
    Contact,
    /// Residential address
    Address,
    /// Blockchain addresses
    Blockchain,
    /// Bank accounts
    Accounts,
}

impl ProfileSection {
    /// All sections in display order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[
            Self::Personal,
            Self::Documents,
            Self::Contact,
            Self::Address,
            Self::Blockchain,
            Self::Accounts,
        ]
    }

    /// Display name, used in conflict warnings and section headers.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Personal => "Personal Information",
            Self::Documents => "Documents",
            Self::Contact => "Contact",
            Self::Address => "Address",
            Self::Blockchain => "Blockchain",
            Self::Accounts => "Bank Accounts",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_sections_have_distinct_titles() {
        let titles: std::collections::HashSet<_> =
            ProfileSection::all().iter().map(|s| s.title()).collect();
        assert_eq!(titles.len(), ProfileSection::all().len());
    }
}
