//! # Zori Client
//!
//! Network layer for the Zori wallet: a bearer-authenticated JSON client over
//! the backend REST API, the local session/credential store, the OAuth +
//! passkey login flow, and the ETag-validated reference-data cache.
//!
//! All shared state is explicit and injected: the application root constructs
//! one [`ApiConfig`], one [`SessionStore`], and hands them to the pieces that
//! need them. There are no process-wide singletons.

pub mod api;
pub mod auth;
pub mod config;
pub mod reference;
pub mod store;

pub use api::{ApiClient, KycApplication, KycDocument};
pub use auth::AuthFlow;
pub use config::ApiConfig;
pub use reference::ReferenceDataCache;
pub use store::{
    CredentialStore, MemorySessionStore, SessionStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY,
    USER_KEY,
};
