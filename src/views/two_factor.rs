// ============================================================================
// TWO-FACTOR VIEWS - Login verification, QR setup and enabling
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlImageElement, HtmlInputElement};

use crate::dom::{
    control_value, exists, get_element_by_id, navigate, on_click, query_selector,
    set_text_content, set_value_of, show_by_id, value_of,
};
use crate::viewmodels::context::PageContext;
use crate::viewmodels::form::PageEntry;
use crate::viewmodels::two_factor::{QrSetup, TwoFactorSetupViewModel, VerifyForm, VerifyViewModel};
use crate::views::button::set_loading;
use crate::views::form::{apply_outcome, bind_submit, MessageTarget};

pub const VERIFY_FORM_ID: &str = "verify-2fa-form";
pub const ENABLE_BUTTON_ID: &str = "enable-2fa-btn";

const SETUP_CONTAINER: &str = "setup-container";
const QR_CONTAINER: &str = "qr-container";
const QR_IMAGE: &str = "qr-code";
const QR_ERROR: &str = "qr-error";
const QR_LOADING: &str = "qr-loading";
const SECRET_KEY: &str = "secret-key";

/// The setup page reuses the verify form for the first code, so the
/// enable button decides which page this is.
pub fn mount(ctx: &PageContext) -> Result<(), JsValue> {
    if exists(ENABLE_BUTTON_ID) {
        mount_setup(ctx)
    } else {
        mount_verify(ctx)
    }
}

// ============================================================================
// VERIFY
// ============================================================================

fn mount_verify(ctx: &PageContext) -> Result<(), JsValue> {
    let Some(form) = get_element_by_id(VERIFY_FORM_ID) else {
        return Ok(());
    };

    let vm = Rc::new(VerifyViewModel::new(ctx));
    match vm.entry() {
        PageEntry::Leave(url) => {
            log::warn!("⚠️ [2FA] no pending login, back to {}", url);
            navigate(&url);
            return Ok(());
        }
        PageEntry::Ready(email) => set_value_of("email", &email),
    }
    log::info!("📋 [2FA] verify form attached");

    bind_submit(
        &form,
        MessageTarget::Default,
        |_| {
            Ok(VerifyForm {
                email: value_of("email"),
                code: value_of("code"),
            })
        },
        move |input| {
            let vm = vm.clone();
            async move { vm.submit(&input).await }
        },
    )
}

// ============================================================================
// SETUP
// ============================================================================

fn page_email() -> Option<String> {
    query_selector("input[type=\"email\"]")
        .ok()
        .flatten()
        .as_ref()
        .and_then(control_value)
        .filter(|e| !e.trim().is_empty())
}

fn show_qr(qr: &QrSetup) {
    let image = get_element_by_id(QR_IMAGE).and_then(|e| e.dyn_into::<HtmlImageElement>().ok());
    if let Some(image) = image {
        image.set_src(&qr.image_src);
    }
    if let Some(secret) = get_element_by_id(SECRET_KEY) {
        set_text_content(&secret, &qr.secret);
    }
    show_by_id(QR_ERROR, false);
    show_by_id(QR_CONTAINER, true);
}

async fn request_qr(vm: Rc<TwoFactorSetupViewModel>) {
    show_by_id(SETUP_CONTAINER, true);
    show_by_id(QR_LOADING, true);
    let timestamp = js_sys::Date::now() as i64;

    let result = vm.request_qr(page_email().as_deref(), timestamp).await;
    show_by_id(QR_LOADING, false);
    match &result.qr {
        Some(qr) => {
            show_qr(qr);
            apply_outcome(None, &result.outcome, MessageTarget::Default);
        }
        None => {
            show_by_id(QR_CONTAINER, false);
            let target = match exists(QR_ERROR) {
                true => MessageTarget::Container(QR_ERROR),
                false => MessageTarget::Default,
            };
            apply_outcome(None, &result.outcome, target);
        }
    }
}

fn mount_setup(ctx: &PageContext) -> Result<(), JsValue> {
    let vm = Rc::new(TwoFactorSetupViewModel::new(ctx));
    match vm.entry() {
        PageEntry::Leave(url) => {
            log::warn!("⚠️ [2FA] setup page without a session");
            navigate(&url);
            return Ok(());
        }
        PageEntry::Ready(email) if !email.is_empty() && page_email().is_none() => {
            if let Ok(Some(input)) = query_selector("input[type=\"email\"]") {
                if let Some(input) = input.dyn_ref::<HtmlInputElement>() {
                    input.set_value(&email);
                }
            }
        }
        PageEntry::Ready(_) => {}
    }
    log::info!("📋 [2FA] setup page attached");

    if let Some(button) = get_element_by_id(ENABLE_BUTTON_ID) {
        let vm = vm.clone();
        let owner = button.clone();
        on_click(&button, move |_| {
            let vm = vm.clone();
            let button = owner.clone();
            set_loading(&button, true);
            spawn_local(async move {
                request_qr(vm).await;
                set_loading(&button, false);
            });
        })?;
    }

    if let Some(form) = get_element_by_id(VERIFY_FORM_ID) {
        bind_submit(
            &form,
            MessageTarget::Default,
            |_| Ok(value_of("code")),
            move |code| {
                let vm = vm.clone();
                async move { vm.enable(&code).await }
            },
        )?;
    }
    Ok(())
}
