//! Data models and types for the application.
//!
//! Contains domain types for:
//! - [`ConnectionResult`], [`ConnectionStatus`] - Outcome of the provider connection
//! - [`AccountState`] - Active account shown once connected

mod account;
mod connection;

pub use account::{AccountState, checksum_address};
pub use connection::{ConnectionResult, ConnectionStatus};
