//! Utility modules for web and DOM operations.
//!
//! Provides:
//! - [`dom`] - Window access, injected-object lookup, element helpers

pub mod dom;
