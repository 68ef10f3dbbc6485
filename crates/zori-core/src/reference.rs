//! # Reference Data
//!
//! Backend-provided enumerations used to populate form controls: countries,
//! states, phone/email types, currencies, networks, and address/asset types.
//! Served by `GET /reference-data` and cached by `zori-client`.

use serde::{Deserialize, Serialize};

/// A country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// ISO country code
    pub iso_code: String,
    /// Display name
    pub name: String,
}

/// A state or province within a country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    /// ISO code of the owning country
    pub country_code: String,
    /// State code
    pub state_code: String,
    /// Display name
    pub name: String,
}

/// A phone type (mobile, work, voip, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneType {
    /// Type code
    pub code: String,
    /// Display description
    pub description: String,
}

/// An email type (personal, work, other).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailType {
    /// Type code
    pub code: String,
    /// Display description
    pub description: String,
}

/// A supported currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    /// Currency code
    pub code: String,
    /// Display name
    pub name: String,
    /// Asset type code (fiat, crypto, stablecoin)
    pub asset_type_code: String,
    /// Decimal places
    pub decimals: u32,
}

/// A blockchain network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockchainNetwork {
    /// Network code
    pub code: String,
    /// Display name
    pub name: String,
}

/// An address type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressType {
    /// Type code
    pub code: String,
    /// Display description
    pub description: String,
}

/// An asset type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetType {
    /// Type code
    pub code: String,
    /// Display description
    pub description: String,
}

/// Full reference-data payload of `GET /reference-data`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceData {
    /// All countries
    pub countries: Vec<Country>,
    /// All states
    pub states: Vec<State>,
    /// Phone type codes
    pub phone_types: Vec<PhoneType>,
    /// Email type codes
    pub email_types: Vec<EmailType>,
    /// Supported currencies
    pub currencies: Vec<Currency>,
    /// Supported blockchain networks
    pub blockchain_networks: Vec<BlockchainNetwork>,
    /// Address type codes
    pub address_types: Vec<AddressType>,
    /// Asset type codes
    pub asset_types: Vec<AssetType>,
}

impl ReferenceData {
    /// States belonging to a country.
    pub fn states_for_country<'a>(
        &'a self,
        country_code: &'a str,
    ) -> impl Iterator<Item = &'a State> + 'a {
        self.states
            .iter()
            .filter(move |s| s.country_code == country_code)
    }

    /// Currencies of a given asset type (fiat, crypto, stablecoin).
    pub fn currencies_by_type<'a>(
        &'a self,
        asset_type: &'a str,
    ) -> impl Iterator<Item = &'a Currency> + 'a {
        self.currencies
            .iter()
            .filter(move |c| c.asset_type_code == asset_type)
    }

    /// Display name for a country ISO code, falling back to the code itself.
    #[must_use]
    pub fn country_name<'a>(&'a self, iso_code: &'a str) -> &'a str {
        self.countries
            .iter()
            .find(|c| c.iso_code == iso_code)
            .map_or(iso_code, |c| c.name.as_str())
    }

    /// Look up a currency by code.
    #[must_use]
    pub fn currency(&self, code: &str) -> Option<&Currency> {
        self.currencies.iter().find(|c| c.code == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ReferenceData {
        ReferenceData {
            countries: vec![
                Country {
                    iso_code: "BR".into(),
                    name: "Brazil".into(),
                },
                Country {
                    iso_code: "US".into(),
                    name: "United States".into(),
                },
            ],
            states: vec![
                State {
                    country_code: "BR".into(),
                    state_code: "SP".into(),
                    name: "São Paulo".into(),
                },
                State {
                    country_code: "US".into(),
                    state_code: "CA".into(),
                    name: "California".into(),
                },
            ],
            currencies: vec![
                Currency {
                    code: "USDC".into(),
                    name: "USD Coin".into(),
                    asset_type_code: "stablecoin".into(),
                    decimals: 6,
                },
                Currency {
                    code: "POL".into(),
                    name: "Polygon".into(),
                    asset_type_code: "crypto".into(),
                    decimals: 18,
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn states_filtered_by_country() {
        let data = sample();
        let br: Vec<_> = data.states_for_country("BR").collect();
        assert_eq!(br.len(), 1);
        assert_eq!(br[0].state_code, "SP");
    }

    #[test]
    fn country_name_falls_back_to_code() {
        let data = sample();
        assert_eq!(data.country_name("BR"), "Brazil");
        assert_eq!(data.country_name("ZZ"), "ZZ");
    }

    #[test]
    fn currencies_by_asset_type() {
        let data = sample();
        let stable: Vec<_> = data.currencies_by_type("stablecoin").collect();
        assert_eq!(stable.len(), 1);
        assert_eq!(stable[0].code, "USDC");
    }

    #[test]
    fn tolerates_missing_sections() {
        // Older backends may omit sections entirely.
        let data: ReferenceData = serde_json::from_str(r#"{"countries": []}"#).unwrap();
        assert!(data.currencies.is_empty());
    }
}
