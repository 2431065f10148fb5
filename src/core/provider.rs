//! Capability traits for injected wallet providers.
//!
//! Core logic only sees these traits. The browser bridge in
//! [`crate::core::ethereum`] implements them over `window.ethereum` and
//! `window.web3`, and [`crate::core::mock`] implements them for tests.

use std::fmt;
use std::rc::Rc;

use async_trait::async_trait;

use crate::core::error::WalletError;

/// Callback invoked with the new account list on `accountsChanged`.
pub type AccountsCallback = Box<dyn Fn(Vec<String>)>;

/// Anything that can report the authorized accounts.
#[async_trait(?Send)]
pub trait AccountSource {
    /// Query the authorized accounts, in provider order. May be empty.
    async fn accounts(&self) -> Result<Vec<String>, WalletError>;

    /// Whether [`AccountSource::on_accounts_changed`] is available.
    fn supports_notifications(&self) -> bool {
        false
    }

    /// Register for account-change notifications.
    ///
    /// The listener stays registered until the returned [`Subscription`]
    /// is dropped.
    fn on_accounts_changed(&self, _callback: AccountsCallback) -> Result<Subscription, WalletError> {
        Err(WalletError::NotificationsUnsupported)
    }
}

/// A modern (EIP-1193) provider with an authorization prompt.
#[async_trait(?Send)]
pub trait InjectedProvider: AccountSource {
    /// Ask the user to authorize account access. Resolves or rejects once.
    async fn request_authorization(&self) -> Result<(), WalletError>;
}

/// The host environment's injected capabilities.
pub trait Environment {
    /// The modern provider, if one with a supported shape is present.
    fn injected_provider(&self) -> Option<Rc<dyn InjectedProvider>>;

    /// The legacy provider's current endpoint, if present.
    fn legacy_endpoint(&self) -> Option<Rc<dyn AccountSource>>;
}

// ============================================================================
// Subscription
// ============================================================================

/// Releases a refresh mechanism (listener or timer) when dropped.
#[must_use = "dropping a Subscription releases it immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Wrap a release action.
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Release now.
    pub fn cancel(mut self) {
        self.run_release();
    }

    fn run_release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

// ============================================================================
// Web3Client
// ============================================================================

/// Which capability a [`Web3Client`] is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// `window.ethereum`, authorized through the prompt.
    Injected,
    /// `window.web3.currentProvider`, assumed pre-authorized.
    Legacy,
}

/// Client handle bound to a single injected capability.
///
/// Cloning is cheap and every clone queries the same capability.
#[derive(Clone)]
pub struct Web3Client {
    source: Rc<dyn AccountSource>,
    kind: ProviderKind,
}

impl Web3Client {
    /// Bind to a modern provider.
    pub fn injected(provider: Rc<dyn InjectedProvider>) -> Self {
        Self {
            source: provider,
            kind: ProviderKind::Injected,
        }
    }

    /// Bind to a legacy provider endpoint.
    pub fn legacy(endpoint: Rc<dyn AccountSource>) -> Self {
        Self {
            source: endpoint,
            kind: ProviderKind::Legacy,
        }
    }

    pub fn kind(&self) -> ProviderKind {
        self.kind
    }

    /// Query all authorized accounts.
    pub async fn accounts(&self) -> Result<Vec<String>, WalletError> {
        self.source.accounts().await
    }

    pub fn supports_notifications(&self) -> bool {
        self.source.supports_notifications()
    }

    /// Register for account-change notifications.
    pub fn on_accounts_changed(
        &self,
        callback: impl Fn(Vec<String>) + 'static,
    ) -> Result<Subscription, WalletError> {
        self.source.on_accounts_changed(Box::new(callback))
    }
}

impl fmt::Debug for Web3Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Web3Client").field("kind", &self.kind).finish()
    }
}
