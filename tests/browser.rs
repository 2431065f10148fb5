//! Browser tests for the injected-provider bridge and the rendered states.
//!
//! Run with `wasm-pack test --headless --chrome`.

#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use js_sys::{Array, Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::HtmlElement;

use web3_connect::App;
use web3_connect::config::messages;
use web3_connect::core::provider::{AccountSource, InjectedProvider, ProviderKind};
use web3_connect::core::{BrowserEnvironment, Environment, connect};
use web3_connect::models::ConnectionStatus;
use web3_connect::utils::dom;

wasm_bindgen_test_configure!(run_in_browser);

const APPROVING: &str = r#"
    const listeners = [];
    return {
        listeners,
        request: (args) => Promise.resolve(['0xABC...']),
        on: (event, cb) => { if (event === 'accountsChanged') listeners.push(cb); },
        removeListener: (event, cb) => {
            const i = listeners.indexOf(cb);
            if (i >= 0) listeners.splice(i, 1);
        },
    };
"#;

const REJECTING: &str = r#"
    return {
        request: (args) => args.method === 'eth_requestAccounts'
            ? Promise.reject({ code: 4001, message: 'User rejected the request.' })
            : Promise.resolve([]),
    };
"#;

const LEGACY_CALLBACK: &str = r#"
    return {
        currentProvider: {
            sendAsync: (payload, cb) => cb(null, { id: payload.id, jsonrpc: '2.0', result: ['0xLEGACY'] }),
        },
    };
"#;

const COUNTING_LEGACY: &str = r#"
    const currentProvider = {
        calls: 0,
        sendAsync(payload, cb) {
            this.calls += 1;
            cb(null, { id: payload.id, jsonrpc: '2.0', result: ['0xLEGACY'] });
        },
    };
    return { currentProvider };
"#;

const ENABLE_ONLY: &str = r#"
    return {
        enabled: false,
        enable() {
            this.enabled = true;
            return Promise.resolve(['0xOLD']);
        },
        sendAsync(payload, cb) {
            cb(null, { id: payload.id, jsonrpc: '2.0', result: this.enabled ? ['0xOLD'] : [] });
        },
    };
"#;

const MALFORMED: &str = r#"
    return { enable: () => Promise.resolve() };
"#;

fn window() -> web_sys::Window {
    web_sys::window().expect("browser window")
}

fn reset_globals() {
    for name in ["ethereum", "web3"] {
        Reflect::delete_property(&window(), &JsValue::from_str(name)).unwrap();
    }
}

fn install(name: &str, factory: &str) -> JsValue {
    let value = Function::new_no_args(factory)
        .call0(&JsValue::NULL)
        .unwrap();
    Reflect::set(&window(), &JsValue::from_str(name), &value).unwrap();
    value
}

fn property(target: &JsValue, name: &str) -> JsValue {
    Reflect::get(target, &JsValue::from_str(name)).unwrap()
}

fn mount_root() -> HtmlElement {
    let document = window().document().unwrap();
    let root: HtmlElement = document.create_element("div").unwrap().unchecked_into();
    document.body().unwrap().append_child(&root).unwrap();
    root
}

async fn rendered_text(root: &HtmlElement) -> String {
    TimeoutFuture::new(50).await;
    root.text_content().unwrap_or_default()
}

#[wasm_bindgen_test]
async fn test_absent_without_globals() {
    reset_globals();
    let result = connect(&BrowserEnvironment).await;
    assert_eq!(result.status(), ConnectionStatus::Absent);
}

#[wasm_bindgen_test]
fn test_global_object_requires_object() {
    reset_globals();
    Reflect::set(
        &window(),
        &JsValue::from_str("ethereum"),
        &JsValue::from_str("not a provider"),
    )
    .unwrap();
    assert!(dom::global_object("ethereum").is_none());

    install("ethereum", APPROVING);
    assert!(dom::global_object("ethereum").is_some());
}

#[wasm_bindgen_test]
async fn test_unsupported_shape_is_absent() {
    reset_globals();
    install("ethereum", MALFORMED);
    let result = connect(&BrowserEnvironment).await;
    assert_eq!(result.status(), ConnectionStatus::Absent);
}

#[wasm_bindgen_test]
async fn test_injected_provider_approved() {
    reset_globals();
    install("ethereum", APPROVING);

    let result = connect(&BrowserEnvironment).await;
    let client = result.client().expect("connected").clone();
    assert_eq!(client.kind(), ProviderKind::Injected);
    assert!(client.supports_notifications());
    assert_eq!(client.accounts().await, Ok(vec!["0xABC...".to_string()]));
}

#[wasm_bindgen_test]
async fn test_injected_provider_rejected() {
    reset_globals();
    install("ethereum", REJECTING);

    let result = connect(&BrowserEnvironment).await;
    assert_eq!(result.status(), ConnectionStatus::Denied);

    let provider = BrowserEnvironment.injected_provider().expect("provider");
    let err = provider.request_authorization().await.unwrap_err();
    assert!(err.is_user_rejection(), "error: {}", err);
}

#[wasm_bindgen_test]
async fn test_enable_only_provider_connects() {
    reset_globals();
    let ethereum = install("ethereum", ENABLE_ONLY);

    let result = connect(&BrowserEnvironment).await;
    let client = result.client().expect("connected").clone();
    assert_eq!(client.kind(), ProviderKind::Injected);
    assert_eq!(property(&ethereum, "enabled"), JsValue::TRUE);
    assert_eq!(client.accounts().await, Ok(vec!["0xOLD".to_string()]));
}

#[wasm_bindgen_test]
async fn test_legacy_callback_query() {
    reset_globals();
    install("web3", LEGACY_CALLBACK);

    let result = connect(&BrowserEnvironment).await;
    let client = result.client().expect("connected").clone();
    assert_eq!(client.kind(), ProviderKind::Legacy);
    assert!(!client.supports_notifications());
    assert_eq!(client.accounts().await, Ok(vec!["0xLEGACY".to_string()]));
}

#[wasm_bindgen_test]
fn test_accounts_changed_listener_lifecycle() {
    reset_globals();
    let ethereum = install("ethereum", APPROVING);
    let provider = BrowserEnvironment.injected_provider().expect("provider");

    let received = Rc::new(RefCell::new(Vec::new()));
    let sink = received.clone();
    let subscription = provider
        .on_accounts_changed(Box::new(move |accounts: Vec<String>| {
            sink.borrow_mut().push(accounts)
        }))
        .unwrap();

    let listeners: Array = Reflect::get(&ethereum, &JsValue::from_str("listeners"))
        .unwrap()
        .unchecked_into();
    assert_eq!(listeners.length(), 1);

    let listener: Function = listeners.get(0).unchecked_into();
    listener
        .call1(&JsValue::NULL, &Array::of1(&JsValue::from_str("0xNEW")))
        .unwrap();
    assert_eq!(*received.borrow(), vec![vec!["0xNEW".to_string()]]);

    subscription.cancel();
    assert_eq!(listeners.length(), 0);
}

#[wasm_bindgen_test]
async fn test_renders_connected_account() {
    reset_globals();
    install("ethereum", APPROVING);
    let root = mount_root();

    let handle = leptos::mount::mount_to(root.clone(), App);
    let text = rendered_text(&root).await;
    assert!(text.contains("0xABC..."), "rendered: {}", text);
    assert!(text.contains(messages::ACCOUNT_PREFIX.trim_end()));
    drop(handle);
}

#[wasm_bindgen_test]
async fn test_renders_denied_message() {
    reset_globals();
    install("ethereum", REJECTING);
    let root = mount_root();

    let handle = leptos::mount::mount_to(root.clone(), App);
    assert_eq!(rendered_text(&root).await, messages::DENIED);
    drop(handle);
}

#[wasm_bindgen_test]
async fn test_renders_absent_message() {
    reset_globals();
    let root = mount_root();

    let handle = leptos::mount::mount_to(root.clone(), App);
    assert_eq!(rendered_text(&root).await, messages::ABSENT);
    drop(handle);
}

#[wasm_bindgen_test]
async fn test_unmount_stops_polling() {
    reset_globals();
    let web3 = install("web3", COUNTING_LEGACY);
    let provider = property(&web3, "currentProvider");
    let calls = || property(&provider, "calls").as_f64().unwrap_or_default();
    let root = mount_root();

    let handle = leptos::mount::mount_to(root.clone(), App);
    TimeoutFuture::new(350).await;
    assert!(calls() >= 2.0, "polled {} times", calls());
    assert!(root.text_content().unwrap_or_default().contains("0xLEGACY"));

    drop(handle);
    TimeoutFuture::new(20).await;
    let settled = calls();
    TimeoutFuture::new(350).await;
    assert_eq!(calls(), settled);
}

#[wasm_bindgen_test]
async fn test_unmount_removes_accounts_listener() {
    reset_globals();
    let ethereum = install("ethereum", APPROVING);
    let listeners: Array = property(&ethereum, "listeners").unchecked_into();
    let root = mount_root();

    let handle = leptos::mount::mount_to(root.clone(), App);
    assert!(rendered_text(&root).await.contains("0xABC..."));
    assert_eq!(listeners.length(), 1);

    drop(handle);
    TimeoutFuture::new(10).await;
    assert_eq!(listeners.length(), 0);
}
