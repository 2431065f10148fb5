//! Root application module.
//!
//! Contains the App component, AppContext definition, and the one-shot
//! connection run on mount, following Leptos conventions.

use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::components::ConnectionGate;
use crate::core::{BrowserEnvironment, Environment, connect};
use crate::models::ConnectionResult;

// ============================================================================
// AppContext
// ============================================================================

/// Application-wide reactive context.
///
/// Provided by [`Dapp`] and read by any child with
/// `use_context::<AppContext>()`.
///
/// # Note
///
/// The connection signal uses local storage because [`ConnectionResult`]
/// carries an `Rc`-based client handle. The signal handle itself is still
/// `Copy`.
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Outcome of the provider connection. Set once per mount.
    pub connection: RwSignal<ConnectionResult, LocalStorage>,
}

impl AppContext {
    /// Creates a context in the `Pending` state.
    pub fn new() -> Self {
        Self {
            connection: RwSignal::new_local(ConnectionResult::Pending),
        }
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Components
// ============================================================================

/// Root application component bound to the browser's injected providers.
#[component]
pub fn App() -> impl IntoView {
    let environment: Rc<dyn Environment> = Rc::new(BrowserEnvironment);
    view! { <Dapp environment=environment /> }
}

/// Connects to a wallet in `environment` once and renders the outcome.
///
/// The connection is never retried. If the authorization prompt is never
/// answered the view stays in the pending state.
#[component]
pub fn Dapp(environment: Rc<dyn Environment>) -> impl IntoView {
    let ctx = AppContext::new();
    provide_context(ctx);

    spawn_local(async move {
        let result = connect(environment.as_ref()).await;
        log::info!("connection resolved: {:?}", result.status());
        ctx.connection.try_set(result);
    });

    view! { <ConnectionGate /> }
}
