//! Browser front-end that connects to an injected wallet provider and shows
//! the active account.

pub mod app;
pub mod components;
pub mod config;
pub mod core;
pub mod models;
pub mod utils;

pub use app::{App, AppContext, Dapp};
