// ============================================================================
// REGISTER VIEW - Registration form with the staff code toggle
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::dom::{get_element_by_id, on_change, show_by_id, value_of};
use crate::viewmodels::context::PageContext;
use crate::viewmodels::register::{needs_registration_code, RegisterForm, RegisterViewModel};
use crate::views::form::{bind_submit, MessageTarget};

pub const FORM_ID: &str = "register-form";
const ROLE_SELECT: &str = "roleName";
const CODE_GROUP: &str = "registrationCodeGroup";

fn read_form() -> RegisterForm {
    RegisterForm {
        first_name: value_of("firstName"),
        last_name: value_of("lastName"),
        email: value_of("email"),
        password: value_of("password"),
        password_confirm: value_of("passwordConfirm"),
        role_name: value_of(ROLE_SELECT),
        registration_code: value_of("registrationCode").trim().to_string(),
    }
}

fn sync_code_field() {
    show_by_id(CODE_GROUP, needs_registration_code(&value_of(ROLE_SELECT)));
}

pub fn mount(ctx: &PageContext) -> Result<(), JsValue> {
    let Some(form) = get_element_by_id(FORM_ID) else {
        return Ok(());
    };
    log::info!("📋 [REGISTER] form attached");

    if let Some(select) = get_element_by_id(ROLE_SELECT) {
        sync_code_field();
        on_change(&select, |_| sync_code_field())?;
    }

    let vm = Rc::new(RegisterViewModel::new(ctx));
    let validator = vm.clone();

    bind_submit(
        &form,
        MessageTarget::Default,
        move |_| {
            let input = read_form();
            validator.validate(&input).map(|_| input)
        },
        move |input| {
            let vm = vm.clone();
            async move {
                let outcome = vm.submit(&input).await;
                if outcome.reset_form {
                    // The reset puts the role back to its default option.
                    sync_code_field();
                }
                outcome
            }
        },
    )
}
