//! Connection status view.

use leptos::prelude::*;

use crate::app::AppContext;
use crate::components::AccountStatus;
use crate::models::ConnectionResult;

stylance::import_crate_style!(css, "src/components/gate/gate.module.css");

/// Renders one of the four connection states.
///
/// `Connected` mounts [`AccountStatus`] with the obtained client. The other
/// states render their status message.
#[component]
pub fn ConnectionGate() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");

    move || match ctx.connection.get() {
        ConnectionResult::Connected(client) => view! { <AccountStatus client=client /> }.into_any(),
        status @ (ConnectionResult::Pending | ConnectionResult::Denied | ConnectionResult::Absent) => {
            view! { <div class=css::message>{status.message()}</div> }.into_any()
        }
    }
}
