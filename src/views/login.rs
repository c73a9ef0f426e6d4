// ============================================================================
// LOGIN VIEW
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::dom::{get_element_by_id, value_of};
use crate::utils::query::QueryParams;
use crate::viewmodels::context::PageContext;
use crate::viewmodels::login::{LoginForm, LoginViewModel};
use crate::views::form::{bind_submit, MessageTarget};

pub const FORM_ID: &str = "login-form";

fn read_form() -> LoginForm {
    LoginForm {
        email: value_of("email").trim().to_string(),
        password: value_of("password"),
    }
}

pub fn mount(ctx: &PageContext, query: QueryParams) -> Result<(), JsValue> {
    let Some(form) = get_element_by_id(FORM_ID) else {
        return Ok(());
    };
    log::info!("📋 [LOGIN] form attached");

    let vm = Rc::new(LoginViewModel::new(ctx));
    let query = Rc::new(query);
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
            let query = query.clone();
            async move { vm.submit(&input, &query).await }
        },
    )
}
