use std::str::FromStr;

use alloy_primitives::Address;

/// Active account as last observed from the provider.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AccountState {
    /// No successful query yet.
    #[default]
    Unresolved,
    /// First authorized account, or `None` when the provider reported none.
    Resolved(Option<String>),
}

impl AccountState {
    /// State for an account list in provider order.
    pub fn from_accounts(accounts: &[String]) -> Self {
        AccountState::Resolved(accounts.first().cloned())
    }

    /// The active address, if resolved and non-empty.
    pub fn address(&self) -> Option<&str> {
        match self {
            AccountState::Resolved(Some(address)) => Some(address),
            _ => None,
        }
    }
}

/// EIP-55 checksummed form of `address`, or `None` if it is not a valid
/// 20-byte hex address.
pub fn checksum_address(address: &str) -> Option<String> {
    Address::from_str(address.trim())
        .ok()
        .map(|parsed| parsed.to_checksum(None))
}
