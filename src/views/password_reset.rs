// ============================================================================
// PASSWORD RESET VIEWS - Forgot password and reset with authenticator code
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::dom::{get_element_by_id, navigate, set_value_of, value_of};
use crate::viewmodels::context::PageContext;
use crate::viewmodels::form::PageEntry;
use crate::viewmodels::password_reset::{ForgotPasswordViewModel, ResetForm, ResetPasswordViewModel};
use crate::views::form::{bind_submit, MessageTarget};

pub const FORGOT_FORM_ID: &str = "forgot-password-form";
pub const RESET_FORM_ID: &str = "reset-password-form";

pub fn mount_forgot(ctx: &PageContext) -> Result<(), JsValue> {
    let Some(form) = get_element_by_id(FORGOT_FORM_ID) else {
        return Ok(());
    };
    log::info!("📋 [RESET] forgot-password form attached");

    let vm = Rc::new(ForgotPasswordViewModel::new(ctx));
    bind_submit(
        &form,
        MessageTarget::Default,
        |_| Ok(value_of("email")),
        move |email| {
            let vm = vm.clone();
            async move { vm.submit(&email).await }
        },
    )
}

fn read_reset_form() -> ResetForm {
    ResetForm {
        email: value_of("email"),
        otp: value_of("otp"),
        new_password: value_of("newPassword"),
        confirm_password: value_of("confirmPassword"),
    }
}

pub fn mount_reset(ctx: &PageContext) -> Result<(), JsValue> {
    let Some(form) = get_element_by_id(RESET_FORM_ID) else {
        return Ok(());
    };

    let vm = Rc::new(ResetPasswordViewModel::new(ctx));
    match vm.entry() {
        PageEntry::Leave(url) => {
            log::warn!("⚠️ [RESET] no reset in progress");
            navigate(&url);
            return Ok(());
        }
        PageEntry::Ready(email) => set_value_of("email", &email),
    }
    log::info!("📋 [RESET] reset form attached");

    let validator = vm.clone();
    bind_submit(
        &form,
        MessageTarget::Default,
        move |_| {
            let input = read_reset_form();
            validator.validate(&input).map(|_| input)
        },
        move |input| {
            let vm = vm.clone();
            async move { vm.submit(&input).await }
        },
    )
}
