//! Error types for wallet provider interaction.
//!
//! Only two kinds reach application logic: a failed authorization, which ends
//! in the `Denied` state, and a failed account query, which is logged and
//! otherwise ignored. An explicit user rejection of the prompt arrives as
//! [`WalletError::Rpc`] with code 4001. The remaining variants describe why
//! a request failed.

use thiserror::Error;

use crate::config::USER_REJECTED_CODE;

/// Wallet-related errors for EIP-1193 and legacy web3 providers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    /// The authorization prompt failed for a reason other than a rejection.
    #[error("authorization denied: {0}")]
    AuthorizationDenied(String),
    /// Fetching the account list failed.
    #[error("account query failed: {0}")]
    QueryFailed(String),
    /// The provider answered with a JSON-RPC error object.
    #[error("provider error {code}: {message}")]
    Rpc { code: i64, message: String },
    /// The provider answered with a value of unexpected shape.
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
    /// A provider method was missing or could not be called.
    #[error("failed to create wallet request")]
    RequestCreationFailed,
    /// The provider exposes no account-change channel.
    #[error("provider does not support account notifications")]
    NotificationsUnsupported,
}

impl WalletError {
    /// Whether this error is an explicit user rejection (EIP-1193 code 4001).
    pub fn is_user_rejection(&self) -> bool {
        matches!(self, Self::Rpc { code, .. } if *code == USER_REJECTED_CODE)
    }
}
