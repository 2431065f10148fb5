//! Drives an [`AccountObserver`] in the browser event loop.
//!
//! Push notifications are used when the provider supports them. Otherwise
//! the account is re-queried on a `gloo_timers` interval. Either mechanism is
//! handed to the observer, which releases it on teardown.

use gloo_timers::callback::Interval;
use wasm_bindgen_futures::spawn_local;

use crate::config::{POLL_INTERVAL_MS, RefreshStrategy};
use crate::core::observer::AccountObserver;
use crate::core::provider::{Subscription, Web3Client};

/// Concrete refresh mechanism chosen for a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    Push,
    Poll { interval_ms: u32 },
}

/// Pick the mechanism for `strategy`, falling back to polling when the
/// client has no notification channel.
pub fn resolve(strategy: RefreshStrategy, client: &Web3Client) -> Refresh {
    let fallback = Refresh::Poll {
        interval_ms: POLL_INTERVAL_MS,
    };
    match strategy {
        RefreshStrategy::Poll { interval_ms } => Refresh::Poll { interval_ms },
        RefreshStrategy::Push | RefreshStrategy::Auto if client.supports_notifications() => {
            Refresh::Push
        }
        RefreshStrategy::Push => {
            log::warn!("push refresh requested but unsupported by provider, polling instead");
            fallback
        }
        RefreshStrategy::Auto => fallback,
    }
}

/// Fetch the initial account and keep it current until teardown.
pub fn start(observer: &AccountObserver, strategy: RefreshStrategy) {
    let initial = observer.clone();
    spawn_local(async move { initial.refresh().await });

    match resolve(strategy, observer.client()) {
        Refresh::Push => {
            if let Err(e) = observer.subscribe() {
                log::warn!("account subscription failed, polling instead: {}", e);
                observer.hold(poll(observer, POLL_INTERVAL_MS));
            }
        }
        Refresh::Poll { interval_ms } => observer.hold(poll(observer, interval_ms)),
    }
}

/// Re-query every `interval_ms`. The timer stops when the subscription drops.
fn poll(observer: &AccountObserver, interval_ms: u32) -> Subscription {
    log::debug!("polling accounts every {}ms", interval_ms);
    let weak = observer.downgrade();
    let interval = Interval::new(interval_ms, move || {
        if let Some(observer) = weak.upgrade() {
            spawn_local(async move { observer.refresh().await });
        }
    });
    Subscription::new(move || drop(interval))
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::core::mock::MockProvider;

    fn push_client() -> Web3Client {
        Web3Client::injected(Rc::new(MockProvider::approving(["0xaaa"])))
    }

    fn legacy_client() -> Web3Client {
        Web3Client::legacy(Rc::new(MockProvider::legacy(["0xaaa"])))
    }

    #[test]
    fn test_auto_prefers_push() {
        assert_eq!(resolve(RefreshStrategy::Auto, &push_client()), Refresh::Push);
    }

    #[test]
    fn test_auto_polls_legacy() {
        assert_eq!(
            resolve(RefreshStrategy::Auto, &legacy_client()),
            Refresh::Poll { interval_ms: 100 }
        );
    }

    #[test]
    fn test_push_falls_back_to_poll() {
        assert_eq!(
            resolve(RefreshStrategy::Push, &legacy_client()),
            Refresh::Poll {
                interval_ms: POLL_INTERVAL_MS
            }
        );
        assert_eq!(resolve(RefreshStrategy::Push, &push_client()), Refresh::Push);
    }

    #[test]
    fn test_explicit_poll_respected() {
        assert_eq!(
            resolve(RefreshStrategy::Poll { interval_ms: 250 }, &push_client()),
            Refresh::Poll { interval_ms: 250 }
        );
    }
}
