//! Browser bridge to injected wallet providers.
//!
//! Implements the capability traits over `window.ethereum` (EIP-1193) and
//! `window.web3.currentProvider` (legacy) through direct JavaScript interop
//! via the Reflect API. Objects of any other shape are not detected.

use std::rc::Rc;

use async_trait::async_trait;
use js_sys::{Function, Object, Promise};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen_futures::JsFuture;

use crate::config::{ACCOUNTS_CHANGED_EVENT, globals, rpc_methods};
use crate::core::error::WalletError;
use crate::core::provider::{
    AccountSource, AccountsCallback, Environment, InjectedProvider, Subscription,
};
use crate::core::rpc::{RequestArguments, RpcErrorObject, RpcRequest, RpcResponse};
use crate::utils::dom;

/// The real browser environment. Globals are read at call time.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserEnvironment;

impl Environment for BrowserEnvironment {
    fn injected_provider(&self) -> Option<Rc<dyn InjectedProvider>> {
        Eip1193Provider::detect().map(|provider| Rc::new(provider) as Rc<dyn InjectedProvider>)
    }

    fn legacy_endpoint(&self) -> Option<Rc<dyn AccountSource>> {
        LegacyEndpoint::detect().map(|endpoint| Rc::new(endpoint) as Rc<dyn AccountSource>)
    }
}

// ============================================================================
// Shared helpers
// ============================================================================

/// Map a rejection value to a [`WalletError`], keeping EIP-1193 error codes.
fn rejection_error(value: &JsValue) -> WalletError {
    match serde_wasm_bindgen::from_value::<RpcErrorObject>(value.clone()) {
        Ok(err) => err.into(),
        Err(_) => WalletError::QueryFailed(dom::describe_js_value(value)),
    }
}

fn parse_accounts(value: JsValue) -> Result<Vec<String>, WalletError> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| WalletError::MalformedResponse(e.to_string()))
}

/// Await the value returned by a provider call, which may be a promise.
async fn settle(returned: Result<JsValue, JsValue>) -> Result<JsValue, WalletError> {
    let returned = returned.map_err(|e| rejection_error(&e))?;
    JsFuture::from(Promise::resolve(&returned))
        .await
        .map_err(|e| rejection_error(&e))
}

/// Call `provider.request({ method })` and await the result.
async fn request(provider: &Object, method: &str) -> Result<JsValue, WalletError> {
    let request_fn = dom::method(provider, "request").ok_or(WalletError::RequestCreationFailed)?;
    let args = serde_wasm_bindgen::to_value(&RequestArguments { method })
        .map_err(|_| WalletError::RequestCreationFailed)?;

    settle(request_fn.call1(provider, &args)).await
}

fn callback_send(provider: &Object) -> Option<Function> {
    dom::method(provider, "sendAsync").or_else(|| dom::method(provider, "send"))
}

fn has_query_method(provider: &Object) -> bool {
    dom::method(provider, "request").is_some() || callback_send(provider).is_some()
}

/// `eth_accounts` through `request`, or through `sendAsync`/`send` when the
/// provider predates EIP-1193.
async fn query_accounts(provider: &Object) -> Result<Vec<String>, WalletError> {
    if dom::method(provider, "request").is_some() {
        return parse_accounts(request(provider, rpc_methods::ACCOUNTS).await?);
    }

    let send = callback_send(provider).ok_or(WalletError::RequestCreationFailed)?;
    send_with_callback(provider, &send, rpc_methods::ACCOUNTS).await
}

/// Call a callback-style `send(payload, (error, response) => ...)` method and
/// unwrap the JSON-RPC envelope it answers with.
async fn send_with_callback<T: DeserializeOwned>(
    provider: &Object,
    send: &Function,
    method: &str,
) -> Result<T, WalletError> {
    let payload = serde_wasm_bindgen::to_value(&RpcRequest::new(method))
        .map_err(|_| WalletError::RequestCreationFailed)?;

    let mut thrown = None;
    let promise = Promise::new(&mut |resolve, reject| {
        let callback = Closure::once_into_js(move |error: JsValue, response: JsValue| {
            let _ = if error.is_null() || error.is_undefined() {
                resolve.call1(&JsValue::NULL, &response)
            } else {
                reject.call1(&JsValue::NULL, &error)
            };
        });
        if let Err(e) = send.call2(provider, &payload, &callback) {
            thrown = Some(e);
        }
    });

    if let Some(e) = thrown {
        return Err(rejection_error(&e));
    }

    let response = JsFuture::from(promise)
        .await
        .map_err(|e| rejection_error(&e))?;
    let envelope: RpcResponse<T> = serde_wasm_bindgen::from_value(response)
        .map_err(|e| WalletError::MalformedResponse(e.to_string()))?;
    envelope.into_result()
}

// ============================================================================
// EIP-1193 provider
// ============================================================================

/// `window.ethereum`.
///
/// Either an EIP-1193 provider with `request`, or the earlier shape that
/// authorizes through `enable()` and answers queries through `sendAsync`.
pub struct Eip1193Provider {
    object: Object,
}

impl Eip1193Provider {
    pub fn detect() -> Option<Self> {
        let object = dom::global_object(globals::ETHEREUM)?;
        let enable_only =
            dom::method(&object, "enable").is_some() && callback_send(&object).is_some();
        (dom::method(&object, "request").is_some() || enable_only).then_some(Self { object })
    }

    fn listener_methods(&self) -> Option<(Function, Function)> {
        Some((
            dom::method(&self.object, "on")?,
            dom::method(&self.object, "removeListener")?,
        ))
    }
}

#[async_trait(?Send)]
impl AccountSource for Eip1193Provider {
    async fn accounts(&self) -> Result<Vec<String>, WalletError> {
        query_accounts(&self.object).await
    }

    fn supports_notifications(&self) -> bool {
        self.listener_methods().is_some()
    }

    fn on_accounts_changed(&self, callback: AccountsCallback) -> Result<Subscription, WalletError> {
        let (on, remove_listener) = self
            .listener_methods()
            .ok_or(WalletError::NotificationsUnsupported)?;

        let closure = Closure::<dyn Fn(JsValue)>::new(move |accounts: JsValue| {
            match parse_accounts(accounts) {
                Ok(accounts) => callback(accounts),
                Err(e) => log::warn!("ignoring accountsChanged event: {}", e),
            }
        });

        let event = JsValue::from_str(ACCOUNTS_CHANGED_EVENT);
        on.call2(&self.object, &event, closure.as_ref())
            .map_err(|_| WalletError::RequestCreationFailed)?;

        let provider = self.object.clone();
        Ok(Subscription::new(move || {
            if let Err(e) = remove_listener.call2(&provider, &event, closure.as_ref()) {
                log::warn!(
                    "failed to remove accountsChanged listener: {}",
                    dom::describe_js_value(&e)
                );
            }
            drop(closure);
        }))
    }
}

#[async_trait(?Send)]
impl InjectedProvider for Eip1193Provider {
    async fn request_authorization(&self) -> Result<(), WalletError> {
        let outcome = if dom::method(&self.object, "request").is_some() {
            request(&self.object, rpc_methods::REQUEST_ACCOUNTS).await
        } else {
            match dom::method(&self.object, "enable") {
                Some(enable) => settle(enable.call0(&self.object)).await,
                None => Err(WalletError::RequestCreationFailed),
            }
        };

        // Rejections keep their code so callers can tell them apart.
        outcome.map(|_| ()).map_err(|e| match e {
            e if e.is_user_rejection() => e,
            e => WalletError::AuthorizationDenied(e.to_string()),
        })
    }
}

// ============================================================================
// Legacy provider
// ============================================================================

/// `window.web3.currentProvider`. Pre-authorized, no notifications.
pub struct LegacyEndpoint {
    provider: Object,
}

impl LegacyEndpoint {
    pub fn detect() -> Option<Self> {
        let web3 = dom::global_object(globals::WEB3)?;
        let provider = dom::property_object(&web3, globals::CURRENT_PROVIDER)?;
        has_query_method(&provider).then_some(Self { provider })
    }
}

#[async_trait(?Send)]
impl AccountSource for LegacyEndpoint {
    async fn accounts(&self) -> Result<Vec<String>, WalletError> {
        query_accounts(&self.provider).await
    }
}
