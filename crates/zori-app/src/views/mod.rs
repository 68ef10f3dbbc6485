//! View-level state: panel load lifecycles and the send wizard.

mod send;
mod wallet;

pub use send::{SendStep, SendWizard};
pub use wallet::Panel;
