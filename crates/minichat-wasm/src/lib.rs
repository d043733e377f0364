use wasm_bindgen::prelude::*;

mod dom;
mod http;
mod ids;
mod markdown;
mod storage;
mod utils;
mod widget;

pub use http::HttpBackend;
pub use ids::BrowserIds;
pub use storage::LocalStorage;

/// Initialize the WASM module
/// This sets up panic hooks and logging
#[wasm_bindgen(start)]
pub fn init() {
    // Set panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    wasm_logger::init(wasm_logger::Config::default());

    log::info!("minichat WASM initialized");
}

/// Mount the chat widget onto the host page
#[wasm_bindgen]
pub async fn init_chat_widget() -> Result<(), JsValue> {
    log::info!("Initializing chat widget");
    widget::ChatWidget::mount()?.start().await
}
