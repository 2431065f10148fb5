use crate::config::messages;
use crate::core::provider::Web3Client;

/// Outcome of the one-shot provider connection.
#[derive(Clone, Debug, Default)]
pub enum ConnectionResult {
    #[default]
    Pending,
    Connected(Web3Client),
    Denied,
    Absent,
}

/// Payload-free tag of a [`ConnectionResult`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionStatus {
    Pending,
    Connected,
    Denied,
    Absent,
}

impl ConnectionResult {
    pub fn status(&self) -> ConnectionStatus {
        match self {
            ConnectionResult::Pending => ConnectionStatus::Pending,
            ConnectionResult::Connected(_) => ConnectionStatus::Connected,
            ConnectionResult::Denied => ConnectionStatus::Denied,
            ConnectionResult::Absent => ConnectionStatus::Absent,
        }
    }

    /// The client handle, if connected.
    pub fn client(&self) -> Option<&Web3Client> {
        match self {
            ConnectionResult::Connected(client) => Some(client),
            _ => None,
        }
    }

    /// Status text for the states that render a plain message.
    ///
    /// `Connected` renders the account view instead and returns `None`.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            ConnectionResult::Pending => Some(messages::PENDING),
            ConnectionResult::Connected(_) => None,
            ConnectionResult::Denied => Some(messages::DENIED),
            ConnectionResult::Absent => Some(messages::ABSENT),
        }
    }
}
