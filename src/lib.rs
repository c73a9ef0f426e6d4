// ============================================================================
// CAR RENTAL WEB - Browser front-end for the server-rendered rental pages
// ============================================================================
// Layers:
// - Views: attach to the rendered DOM and apply outcomes (wasm only)
// - ViewModels: page decisions as plain values
// - Services: backend communication only
// - State: client storage and session keys
// - Models: DTOs shared with the backend
// ============================================================================

pub mod config;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod views;

#[cfg(target_arch = "wasm32")]
mod browser {
    use wasm_bindgen::prelude::*;

    use crate::app::App;
    use crate::config::CONFIG;
    use crate::state::session::SessionState;
    use crate::state::storage::ClientStorage;
    use crate::viewmodels::message::MessageKind;
    use crate::views;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if CONFIG.enable_logging {
            wasm_logger::init(wasm_logger::Config::new(CONFIG.log_level()));
        }
        log::info!("🚀 [APP] car rental web starting ({})", CONFIG.environment);

        App::new().start()
    }

    /// `showMessage(text, type, containerId?)` for the page's own scripts.
    #[wasm_bindgen(js_name = showMessage)]
    pub fn show_message(text: &str, kind: &str, container_id: Option<String>) {
        views::show_message(text, MessageKind::parse(kind), container_id.as_deref());
    }

    #[wasm_bindgen(js_name = clearMessage)]
    pub fn clear_message(container_id: Option<String>) {
        views::clear_message(container_id.as_deref());
    }

    /// Queues a message for the next page load.
    #[wasm_bindgen(js_name = setFlashMessage)]
    pub fn set_flash_message(message: &str, kind: &str) {
        SessionState::new(ClientStorage::browser()).set_flash(message, MessageKind::parse(kind));
    }
}
