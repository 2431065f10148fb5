//! One-shot provider detection and authorization.

use crate::core::provider::{Environment, Web3Client};
use crate::models::ConnectionResult;

/// Detect a wallet provider in `environment` and classify the outcome.
///
/// A modern provider is preferred and must pass the authorization prompt.
/// A legacy endpoint is assumed pre-authorized. The future stays pending for
/// as long as the prompt goes unanswered.
pub async fn connect(environment: &dyn Environment) -> ConnectionResult {
    if let Some(provider) = environment.injected_provider() {
        let client = Web3Client::injected(provider.clone());
        return match provider.request_authorization().await {
            Ok(()) => {
                log::info!("wallet provider authorized");
                ConnectionResult::Connected(client)
            }
            Err(e) if e.is_user_rejection() => {
                log::info!("wallet authorization rejected by user");
                ConnectionResult::Denied
            }
            Err(e) => {
                log::warn!("wallet authorization failed: {}", e);
                ConnectionResult::Denied
            }
        };
    }

    if let Some(endpoint) = environment.legacy_endpoint() {
        log::info!("using legacy web3 provider");
        return ConnectionResult::Connected(Web3Client::legacy(endpoint));
    }

    log::info!("no wallet provider detected");
    ConnectionResult::Absent
}
