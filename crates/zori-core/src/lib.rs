//! # Zori Core
//!
//! Domain layer for the Zori wallet client: the read models served by the
//! backend (profile, balances, transactions, reference data, auth tokens),
//! client-side format validators, and the unified error type.
//!
//! This crate is pure: no I/O, no async, no global state. The network layer
//! lives in `zori-client` and the stateful UI workflows in `zori-app`.

pub mod auth;
pub mod errors;
pub mod profile;
pub mod reference;
pub mod validation;
pub mod wallet;

pub use auth::{AuthTokens, GoogleCallbackResponse, UserRecord};
pub use errors::{ZoriError, ZoriResult};
pub use profile::{
    AccountsInfo, AddressInfo, BlockchainInfo, BrazilBankAccount, BrazilDocuments, ContactInfo,
    DocumentsInfo, EmailInfo, PersonalInfo, PhoneInfo, ProfileSnapshot, UsaBankAccount,
    UsaDocuments,
};
pub use reference::{
    AddressType, AssetType, BlockchainNetwork, Country, Currency, EmailType, PhoneType,
    ReferenceData, State,
};
pub use wallet::{
    BalanceResponse, CurrencyBalance, Direction, EstimateRequest, EstimateResponse,
    ReceiveAddress, SendRequest, SendResponse, Transaction, TransactionsResponse,
};
