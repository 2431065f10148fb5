//! Connected account view.

use leptos::prelude::*;

use crate::config::{REFRESH_STRATEGY, messages};
use crate::core::{AccountObserver, Web3Client, refresh};
use crate::models::{AccountState, checksum_address};

stylance::import_crate_style!(css, "src/components/account/account.module.css");

/// Tears the observer down when the owning view is disposed.
struct ObserverGuard(AccountObserver);

impl Drop for ObserverGuard {
    fn drop(&mut self) {
        self.0.teardown();
    }
}

/// Shows the active account of `client` and keeps it current.
///
/// Renders nothing until the first successful query.
#[component]
pub fn AccountStatus(client: Web3Client) -> impl IntoView {
    let account = RwSignal::new(AccountState::Unresolved);

    let observer = AccountObserver::new(client, move |state: &AccountState| {
        account.try_set(state.clone());
    });
    refresh::start(&observer, REFRESH_STRATEGY);

    // Stored in the reactive owner so unmounting drops the guard.
    let guard = StoredValue::new_local(ObserverGuard(observer));
    on_cleanup(move || {
        guard.try_with_value(|guard| guard.0.teardown());
    });

    move || match account.get() {
        AccountState::Unresolved => None,
        AccountState::Resolved(Some(address)) => {
            let checksummed = checksum_address(&address);
            Some(
                view! {
                    <p class=css::account title=checksummed>
                        {messages::ACCOUNT_PREFIX}
                        <span class=css::address>{address}</span>
                    </p>
                }
                .into_any(),
            )
        }
        AccountState::Resolved(None) => {
            Some(view! { <p class=css::account>{messages::NO_ACCOUNT}</p> }.into_any())
        }
    }
}
