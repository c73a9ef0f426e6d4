// ============================================================================
// PROFILE VIEWS - Account editor, customer profile and password change
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlInputElement};

use crate::dom::{
    get_element_by_id, on_click, optional_value_of, query_selector_all, reset_form, show_by_id,
    value_of,
};
use crate::models::profile::{CustomerFields, StaffFields};
use crate::viewmodels::context::PageContext;
use crate::viewmodels::profile::{
    AccountForm, PasswordForm, ProfileForm, ProfileViewModel, SAVING_ACCOUNT_MESSAGE,
    SAVING_PROFILE_MESSAGE,
};
use crate::viewmodels::message::MessageKind;
use crate::views::button::{set_busy_label, set_loading};
use crate::views::form::{apply_outcome, bind_submit, clear_invalid, MessageTarget};
use crate::views::message::{hide_alert, show_message};

pub const ACCOUNT_SAVE_BUTTON: &str = "save-profile-btn";
pub const PROFILE_FORM_ID: &str = "profileForm";
pub const PASSWORD_FORM_ID: &str = "passwordForm";

const ACCOUNT_ALERTS: &str = "alert-container";
const PROFILE_ALERTS: MessageTarget = MessageTarget::Alerts {
    success: "successAlert",
    error: "errorAlert",
};
const PASSWORD_ALERTS: MessageTarget = MessageTarget::Alerts {
    success: "passwordSuccessAlert",
    error: "passwordErrorAlert",
};

pub fn mount(ctx: &PageContext, query_email: Option<&str>) -> Result<(), JsValue> {
    let vm = Rc::new(ProfileViewModel::new(ctx, query_email));
    mount_account_editor(&vm)?;
    mount_profile_form(&vm)?;
    mount_password_form(&vm)
}

// ============================================================================
// ACCOUNT EDITOR
// ============================================================================

fn trimmed_value(id: &str) -> Option<String> {
    optional_value_of(id).map(|v| v.trim().to_string())
}

fn read_account_form() -> AccountForm {
    let customer = optional_value_of("contactNumber").map(|contact| CustomerFields {
        contact_number: contact.trim().to_string(),
        address_street: trimmed_value("addressStreet"),
        address_city: trimmed_value("addressCity"),
        address_postal_code: trimmed_value("addressPostalCode"),
        is_customer: true,
    });
    let staff = optional_value_of("staffIdCode").map(|code| StaffFields {
        staff_id_code: code.trim().to_string(),
        department: trimmed_value("department"),
        position: trimmed_value("position"),
        employee_id: trimmed_value("employeeId"),
        is_staff: true,
    });

    AccountForm {
        user_id: value_of("userId"),
        first_name: value_of("firstName"),
        last_name: value_of("lastName"),
        email: value_of("email"),
        role_name: optional_value_of("roleName").filter(|r| !r.is_empty()),
        password: value_of("password"),
        confirm_password: value_of("confirmPassword"),
        customer,
        staff,
    }
}

fn mount_account_editor(vm: &Rc<ProfileViewModel>) -> Result<(), JsValue> {
    let Some(button) = get_element_by_id(ACCOUNT_SAVE_BUTTON) else {
        return Ok(());
    };
    log::info!("📋 [PROFILE] account editor attached");

    let vm = vm.clone();
    let owner = button.clone();
    on_click(&button, move |event| {
        event.prevent_default();
        let vm = vm.clone();
        let button = owner.clone();
        let form = read_account_form();
        set_busy_label(&button, SAVING_ACCOUNT_MESSAGE);
        spawn_local(async move {
            let outcome = vm.save_account(&form).await;
            set_loading(&button, false);
            apply_outcome(None, &outcome, MessageTarget::Container(ACCOUNT_ALERTS));
        });
    })
}

// ============================================================================
// CUSTOMER PROFILE
// ============================================================================

fn profile_inputs(form: &Element) -> Vec<HtmlInputElement> {
    query_selector_all(Some(form), "input")
        .unwrap_or_default()
        .into_iter()
        .filter_map(|e| e.dyn_into::<HtmlInputElement>().ok())
        .collect()
}

/// Read-only display vs. edit mode. The email stays read-only either way.
fn set_editing(form: &Element, editing: bool) {
    for input in profile_inputs(form) {
        if input.id() != "email" {
            input.set_read_only(!editing);
        }
    }
    show_by_id("editBtn", !editing);
    show_by_id("saveBtn", editing);
    show_by_id("cancelBtn", editing);
}

fn read_profile_form() -> ProfileForm {
    ProfileForm {
        first_name: value_of("firstName"),
        last_name: value_of("lastName"),
        email: value_of("email"),
        contact_number: optional_value_of("contactNumber"),
        address_street: optional_value_of("addressStreet"),
        address_city: optional_value_of("addressCity"),
        address_postal_code: optional_value_of("addressPostalCode"),
    }
}

fn mount_profile_form(vm: &Rc<ProfileViewModel>) -> Result<(), JsValue> {
    let Some(form) = get_element_by_id(PROFILE_FORM_ID) else {
        return Ok(());
    };
    log::info!("📋 [PROFILE] profile form attached");
    set_editing(&form, false);

    if let Some(edit) = get_element_by_id("editBtn") {
        let form = form.clone();
        on_click(&edit, move |_| set_editing(&form, true))?;
    }
    if let Some(cancel) = get_element_by_id("cancelBtn") {
        let form = form.clone();
        on_click(&cancel, move |_| {
            reset_form(&form);
            clear_invalid(&form);
            hide_alert("successAlert");
            hide_alert("errorAlert");
            set_editing(&form, false);
        })?;
    }

    let vm = vm.clone();
    bind_submit(
        &form,
        PROFILE_ALERTS,
        |_| Ok(read_profile_form()),
        move |input| {
            let vm = vm.clone();
            async move {
                show_message(SAVING_PROFILE_MESSAGE, MessageKind::Info, None);
                vm.save_profile(&input).await
            }
        },
    )
}

// ============================================================================
// PASSWORD CHANGE
// ============================================================================

fn read_password_form() -> PasswordForm {
    PasswordForm {
        current_password: value_of("currentPassword"),
        new_password: value_of("newPassword"),
        confirm_password: value_of("confirmPassword"),
    }
}

fn mount_password_form(vm: &Rc<ProfileViewModel>) -> Result<(), JsValue> {
    let Some(form) = get_element_by_id(PASSWORD_FORM_ID) else {
        return Ok(());
    };
    log::info!("📋 [PROFILE] password form attached");

    let vm = vm.clone();
    bind_submit(
        &form,
        PASSWORD_ALERTS,
        |_| {
            let input = read_password_form();
            ProfileViewModel::validate_password(&input).map(|_| input)
        },
        move |input| {
            let vm = vm.clone();
            async move { vm.change_password(&input, &value_of("email")).await }
        },
    )
}
