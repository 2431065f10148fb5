//! In-memory providers for exercising connection and observer logic without
//! a browser.

use std::cell::{Cell, RefCell};
use std::future::{pending, poll_fn};
use std::rc::Rc;
use std::task::{Poll, Waker};

use async_trait::async_trait;

use crate::config::USER_REJECTED_CODE;
use crate::core::error::WalletError;
use crate::core::provider::{
    AccountSource, AccountsCallback, Environment, InjectedProvider, Subscription,
};

/// How a [`MockProvider`] answers the authorization prompt.
#[derive(Debug, Clone)]
pub enum Authorization {
    Approve,
    Fail(WalletError),
    /// Never resolves, like a prompt the user ignores.
    NeverAnswer,
}

#[derive(Default)]
struct PendingQuery {
    result: Option<Result<Vec<String>, WalletError>>,
    waker: Option<Waker>,
}

type Listeners = Rc<RefCell<Vec<(u64, Rc<dyn Fn(Vec<String>)>)>>>;

/// Scriptable provider that records how it was used.
pub struct MockProvider {
    accounts: RefCell<Result<Vec<String>, WalletError>>,
    authorization: Authorization,
    notifications: bool,
    hold_queries: Cell<bool>,
    pending: RefCell<Vec<Rc<RefCell<PendingQuery>>>>,
    listeners: Listeners,
    next_listener: Cell<u64>,
    authorization_calls: Cell<usize>,
    account_calls: Cell<usize>,
}

impl MockProvider {
    fn new<I, S>(accounts: I, authorization: Authorization, notifications: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            accounts: RefCell::new(Ok(accounts.into_iter().map(Into::into).collect())),
            authorization,
            notifications,
            hold_queries: Cell::new(false),
            pending: RefCell::new(Vec::new()),
            listeners: Rc::new(RefCell::new(Vec::new())),
            next_listener: Cell::new(0),
            authorization_calls: Cell::new(0),
            account_calls: Cell::new(0),
        }
    }

    /// Modern provider that approves the prompt and supports notifications.
    pub fn approving<I, S>(accounts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(accounts, Authorization::Approve, true)
    }

    /// Modern provider whose user rejects the prompt (code 4001).
    pub fn rejecting(reason: impl Into<String>) -> Self {
        let rejection = WalletError::Rpc {
            code: USER_REJECTED_CODE,
            message: reason.into(),
        };
        Self::new(Vec::<String>::new(), Authorization::Fail(rejection), true)
    }

    /// Modern provider whose prompt fails without a user decision.
    pub fn failing_authorization(reason: impl Into<String>) -> Self {
        let failure = WalletError::AuthorizationDenied(reason.into());
        Self::new(Vec::<String>::new(), Authorization::Fail(failure), true)
    }

    /// Modern provider whose prompt never resolves.
    pub fn never_answering() -> Self {
        Self::new(Vec::<String>::new(), Authorization::NeverAnswer, true)
    }

    /// Legacy endpoint: no notifications.
    pub fn legacy<I, S>(accounts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(accounts, Authorization::Approve, false)
    }

    /// Replace the answer to subsequent account queries.
    pub fn set_accounts<I, S>(&self, accounts: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self.accounts.borrow_mut() = Ok(accounts.into_iter().map(Into::into).collect());
    }

    /// Make subsequent account queries fail.
    pub fn fail_queries(&self, reason: impl Into<String>) {
        *self.accounts.borrow_mut() = Err(WalletError::QueryFailed(reason.into()));
    }

    /// Park subsequent account queries until [`MockProvider::release_queries`].
    pub fn hold_queries(&self) {
        self.hold_queries.set(true);
    }

    /// Resolve every parked query with the current scripted answer.
    pub fn release_queries(&self) {
        self.hold_queries.set(false);
        let answer = self.accounts.borrow().clone();
        for query in self.pending.borrow_mut().drain(..) {
            let mut query = query.borrow_mut();
            query.result = Some(answer.clone());
            if let Some(waker) = query.waker.take() {
                waker.wake();
            }
        }
    }

    /// Deliver an `accountsChanged` event to every registered listener.
    pub fn emit_accounts_changed<I, S>(&self, accounts: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let accounts: Vec<String> = accounts.into_iter().map(Into::into).collect();
        let listeners: Vec<_> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, callback)| callback.clone())
            .collect();
        for callback in listeners {
            callback(accounts.clone());
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn authorization_calls(&self) -> usize {
        self.authorization_calls.get()
    }

    pub fn account_calls(&self) -> usize {
        self.account_calls.get()
    }
}

#[async_trait(?Send)]
impl AccountSource for MockProvider {
    async fn accounts(&self) -> Result<Vec<String>, WalletError> {
        self.account_calls.set(self.account_calls.get() + 1);

        if !self.hold_queries.get() {
            return self.accounts.borrow().clone();
        }

        let query = Rc::new(RefCell::new(PendingQuery::default()));
        self.pending.borrow_mut().push(query.clone());
        poll_fn(move |cx| {
            let mut query = query.borrow_mut();
            match query.result.take() {
                Some(result) => Poll::Ready(result),
                None => {
                    query.waker = Some(cx.waker().clone());
                    Poll::Pending
                }
            }
        })
        .await
    }

    fn supports_notifications(&self) -> bool {
        self.notifications
    }

    fn on_accounts_changed(&self, callback: AccountsCallback) -> Result<Subscription, WalletError> {
        if !self.notifications {
            return Err(WalletError::NotificationsUnsupported);
        }

        let id = self.next_listener.get();
        self.next_listener.set(id + 1);
        self.listeners.borrow_mut().push((id, Rc::from(callback)));

        let listeners = Rc::downgrade(&self.listeners);
        Ok(Subscription::new(move || {
            if let Some(listeners) = listeners.upgrade() {
                listeners.borrow_mut().retain(|(entry, _)| *entry != id);
            }
        }))
    }
}

#[async_trait(?Send)]
impl InjectedProvider for MockProvider {
    async fn request_authorization(&self) -> Result<(), WalletError> {
        self.authorization_calls.set(self.authorization_calls.get() + 1);
        match &self.authorization {
            Authorization::Approve => Ok(()),
            Authorization::Fail(error) => Err(error.clone()),
            Authorization::NeverAnswer => pending().await,
        }
    }
}

/// Environment with optional mock capabilities.
#[derive(Default)]
pub struct MockEnvironment {
    pub injected: Option<Rc<MockProvider>>,
    pub legacy: Option<Rc<MockProvider>>,
}

impl MockEnvironment {
    /// Neither capability present.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_injected(provider: Rc<MockProvider>) -> Self {
        Self {
            injected: Some(provider),
            legacy: None,
        }
    }

    pub fn with_legacy(endpoint: Rc<MockProvider>) -> Self {
        Self {
            injected: None,
            legacy: Some(endpoint),
        }
    }
}

impl Environment for MockEnvironment {
    fn injected_provider(&self) -> Option<Rc<dyn InjectedProvider>> {
        self.injected
            .clone()
            .map(|provider| provider as Rc<dyn InjectedProvider>)
    }

    fn legacy_endpoint(&self) -> Option<Rc<dyn AccountSource>> {
        self.legacy
            .clone()
            .map(|endpoint| endpoint as Rc<dyn AccountSource>)
    }
}
