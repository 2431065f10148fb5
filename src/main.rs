use leptos::mount::{mount_to, mount_to_body};
use web3_connect::App;
use web3_connect::config::{APP_NAME, LOG_LEVEL, MOUNT_ELEMENT_ID};
use web3_connect::utils::dom;

fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(LOG_LEVEL));
    log::info!("{} starting", APP_NAME);

    match dom::element_by_id(MOUNT_ELEMENT_ID) {
        Some(root) => mount_to(root, App).forget(),
        None => mount_to_body(App),
    }
}
