//! Active-account observation.
//!
//! An [`AccountObserver`] owns the displayed [`AccountState`] and forwards
//! every visible change to a sink. Refresh mechanisms (a notification
//! listener or a poll timer) are held by the observer as [`Subscription`]s
//! and released by [`AccountObserver::teardown`]. After teardown the sink is
//! never called again, including for queries that were already in flight.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::core::error::WalletError;
use crate::core::provider::{Subscription, Web3Client};
use crate::models::AccountState;

struct Inner {
    client: Web3Client,
    state: RefCell<AccountState>,
    active: Cell<bool>,
    in_flight: Cell<bool>,
    /// Bumped by every applied update.
    generation: Cell<u64>,
    refresher: RefCell<Option<Subscription>>,
    sink: Box<dyn Fn(&AccountState)>,
}

/// Keeps the active account of a [`Web3Client`] current.
#[derive(Clone)]
pub struct AccountObserver {
    inner: Rc<Inner>,
}

/// Non-owning handle used by timers and listeners.
#[derive(Clone)]
pub struct WeakAccountObserver {
    inner: Weak<Inner>,
}

impl WeakAccountObserver {
    pub fn upgrade(&self) -> Option<AccountObserver> {
        self.inner.upgrade().map(|inner| AccountObserver { inner })
    }
}

impl AccountObserver {
    /// Create an observer that reports changes to `sink`.
    pub fn new(client: Web3Client, sink: impl Fn(&AccountState) + 'static) -> Self {
        Self {
            inner: Rc::new(Inner {
                client,
                state: RefCell::new(AccountState::Unresolved),
                active: Cell::new(true),
                in_flight: Cell::new(false),
                generation: Cell::new(0),
                refresher: RefCell::new(None),
                sink: Box::new(sink),
            }),
        }
    }

    pub fn downgrade(&self) -> WeakAccountObserver {
        WeakAccountObserver {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn client(&self) -> &Web3Client {
        &self.inner.client
    }

    pub fn current(&self) -> AccountState {
        self.inner.state.borrow().clone()
    }

    pub fn is_active(&self) -> bool {
        self.inner.active.get()
    }

    /// Query the provider and apply the result.
    ///
    /// Skipped while another query is in flight. Failures are logged and keep
    /// the last known account. A result is dropped if a notification was
    /// applied while the query was pending.
    pub async fn refresh(&self) {
        if !self.is_active() || self.inner.in_flight.replace(true) {
            return;
        }

        let generation = self.inner.generation.get();
        let result = self.inner.client.accounts().await;
        self.inner.in_flight.set(false);

        if !self.is_active() {
            log::debug!("discarding account query result after teardown");
            return;
        }
        if self.inner.generation.get() != generation {
            log::debug!("discarding account query result overtaken by a notification");
            return;
        }

        match result {
            Ok(accounts) => {
                self.apply(&accounts);
            }
            Err(e) => log::warn!("account query failed: {}", e),
        }
    }

    /// Replace the current account with the first of `accounts`.
    ///
    /// Returns `true` if the visible state changed. Identical updates and
    /// updates after teardown are ignored.
    pub fn apply(&self, accounts: &[String]) -> bool {
        if !self.is_active() {
            return false;
        }
        self.inner.generation.set(self.inner.generation.get() + 1);

        let next = AccountState::from_accounts(accounts);
        if *self.inner.state.borrow() == next {
            return false;
        }

        log::info!(
            "active account changed to {}",
            next.address().unwrap_or("<none>")
        );
        self.inner.state.replace(next.clone());
        (self.inner.sink)(&next);
        true
    }

    /// Listen for `accountsChanged` on the client and apply each update.
    pub fn subscribe(&self) -> Result<(), WalletError> {
        let weak = self.downgrade();
        let subscription = self.inner.client.on_accounts_changed(move |accounts| {
            if let Some(observer) = weak.upgrade() {
                observer.apply(&accounts);
            }
        })?;
        self.hold(subscription);
        Ok(())
    }

    /// Keep `refresher` alive until teardown, releasing any previous one.
    ///
    /// After teardown the refresher is released immediately.
    pub fn hold(&self, refresher: Subscription) {
        if !self.is_active() {
            refresher.cancel();
            return;
        }
        let previous = self.inner.refresher.replace(Some(refresher));
        drop(previous);
    }

    /// Stop observing: release the refresh mechanism and ignore late results.
    pub fn teardown(&self) {
        if !self.inner.active.replace(false) {
            return;
        }
        log::debug!("account observer torn down");
        let refresher = self.inner.refresher.borrow_mut().take();
        drop(refresher);
    }
}
