//! UI components built with Leptos.
//!
//! - [`gate`] - Dispatches on the connection outcome
//! - [`account`] - Connected account display

pub mod account;
pub mod gate;

pub use account::AccountStatus;
pub use gate::ConnectionGate;
