//! Core wallet logic.
//!
//! This module provides:
//! - [`connect`] one-shot provider detection and authorization
//! - [`AccountObserver`] active-account tracking with [`refresh`] drivers
//! - [`provider`] capability traits and the [`Web3Client`] handle
//! - [`ethereum`] the browser bridge over injected provider objects

mod connector;
pub mod error;
pub mod ethereum;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
mod observer;
pub mod provider;
pub mod refresh;
mod rpc;

pub use connector::connect;
pub use ethereum::BrowserEnvironment;
pub use observer::AccountObserver;
pub use provider::{Environment, Subscription, Web3Client};
