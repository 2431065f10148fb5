//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the application.

// =============================================================================
// Application Metadata
// =============================================================================

/// Application name used in log lines.
pub const APP_NAME: &str = "web3-connect";

/// Element id the application mounts into. Falls back to `<body>` when absent.
pub const MOUNT_ELEMENT_ID: &str = "app";

// =============================================================================
// Logging
// =============================================================================

/// Maximum level forwarded to the browser console.
pub const LOG_LEVEL: log::Level = log::Level::Info;

// =============================================================================
// Status Messages
// =============================================================================

/// Status text for each connection outcome.
pub mod messages {
    /// Shown while the provider has not answered yet.
    pub const PENDING: &str = "Waiting for web3 provider.";
    /// Shown when the user declined the authorization prompt.
    pub const DENIED: &str = "You must allow the website to connect to your metamask account.";
    /// Shown when no wallet provider was found.
    pub const ABSENT: &str = "You must install metamask to use this website.";
    /// Prefix of the connected account line.
    pub const ACCOUNT_PREFIX: &str = "Metamask connected with account: ";
    /// Shown when the provider is connected but reports no accounts.
    pub const NO_ACCOUNT: &str = "Metamask connected, but no account is available.";
}

// =============================================================================
// Provider Configuration
// =============================================================================

/// Global names of the injected provider objects.
pub mod globals {
    /// EIP-1193 provider (`window.ethereum`).
    pub const ETHEREUM: &str = "ethereum";
    /// Legacy web3 instance (`window.web3`).
    pub const WEB3: &str = "web3";
    /// Provider property of the legacy instance.
    pub const CURRENT_PROVIDER: &str = "currentProvider";
}

/// JSON-RPC methods sent to the provider.
pub mod rpc_methods {
    /// Prompts the user and returns the authorized accounts.
    pub const REQUEST_ACCOUNTS: &str = "eth_requestAccounts";
    /// Returns the authorized accounts without prompting.
    pub const ACCOUNTS: &str = "eth_accounts";
}

/// Provider event fired when the active accounts change.
pub const ACCOUNTS_CHANGED_EVENT: &str = "accountsChanged";

/// EIP-1193 error code for a request the user rejected.
pub const USER_REJECTED_CODE: i64 = 4001;

// =============================================================================
// Account Refresh
// =============================================================================

/// Polling interval in milliseconds when push notifications are unavailable.
pub const POLL_INTERVAL_MS: u32 = 100;

/// How the displayed account is kept current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshStrategy {
    /// Push when the provider supports notifications, otherwise poll.
    #[default]
    Auto,
    /// Subscribe to `accountsChanged`. Falls back to polling if unsupported.
    Push,
    /// Re-query on a fixed interval.
    Poll { interval_ms: u32 },
}

/// Refresh strategy used by the account view.
pub const REFRESH_STRATEGY: RefreshStrategy = RefreshStrategy::Auto;
