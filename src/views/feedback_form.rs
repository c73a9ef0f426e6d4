// ============================================================================
// FEEDBACK FORM VIEW - Customer feedback page checks and star widget
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{
    add_class, append_child, control_value, focus, get_attribute, get_element_by_id,
    on_checked_submit, on_click, on_input, query_selector_all, remove_class, set_control_value,
    value_of, window, ElementBuilder,
};
use crate::viewmodels::feedback_form::{
    current_rating, star_states, validate_feedback, validation_error_html, FeedbackForm,
    FeedbackRejection, COMMENTS_FIELD, DEFAULT_RATING, NAME_FIELD, RATING_FIELD,
    SUBMITTING_MARKUP,
};
use crate::views::button::set_busy_label;
use crate::views::form::submit_button;

pub const FORM_ID: &str = "feedbackForm";
const STAR_WIDGET_SELECTOR: &str = ".star-rating";
const ERROR_CLASS: &str = "validation-error";
const INVALID_CLASS: &str = "is-invalid";

fn read_form() -> FeedbackForm {
    FeedbackForm {
        customer_name: value_of(NAME_FIELD),
        comments: value_of(COMMENTS_FIELD),
        rating: value_of(RATING_FIELD),
    }
}

// ============================================================================
// INLINE ERRORS
// ============================================================================

fn clear_field_error(field: &Element) {
    let _ = remove_class(field, INVALID_CLASS);
    if let Some(parent) = field.parent_element() {
        for error in query_selector_all(Some(&parent), &format!(".{}", ERROR_CLASS)).unwrap_or_default() {
            error.remove();
        }
    }
}

fn show_field_error(field_id: &str, message: &str) -> Result<(), JsValue> {
    let Some(field) = get_element_by_id(field_id) else {
        return Ok(());
    };
    clear_field_error(&field);
    add_class(&field, INVALID_CLASS)?;

    let error = ElementBuilder::new("div")?
        .class("validation-error text-danger mt-1")
        .html(&validation_error_html(message))
        .build();
    if let Some(parent) = field.parent_element() {
        append_child(&parent, &error)?;
    }
    focus(field_id);
    Ok(())
}

fn clear_validation_errors() {
    for error in query_selector_all(None, &format!(".{}", ERROR_CLASS)).unwrap_or_default() {
        error.remove();
    }
    for field in query_selector_all(None, &format!(".{}", INVALID_CLASS)).unwrap_or_default() {
        let _ = remove_class(&field, INVALID_CLASS);
    }
}

// ============================================================================
// STAR RATING
// ============================================================================

fn paint_stars(stars: &[Element], rating: u8) {
    for (star, filled) in stars.iter().zip(star_states(rating)) {
        let (on, off) = if filled { ("fas", "far") } else { ("far", "fas") };
        let _ = remove_class(star, off);
        let _ = add_class(star, on);
    }
}

fn mount_star_widget(widget: &Element) -> Result<(), JsValue> {
    let stars = query_selector_all(Some(widget), "i")?;
    let Some(input) = widget.query_selector("input[name=\"rating\"]")? else {
        return Ok(());
    };

    if control_value(&input).unwrap_or_default().is_empty() {
        set_control_value(&input, &DEFAULT_RATING.to_string());
        paint_stars(&stars, DEFAULT_RATING);
    }

    for star in &stars {
        let rating = get_attribute(star, "data-rating")
            .map(|r| current_rating(&r))
            .unwrap_or(0);
        let stars = stars.clone();
        let input = input.clone();
        on_click(star, move |_| {
            set_control_value(&input, &rating.to_string());
            paint_stars(&stars, rating);
        })?;
    }
    Ok(())
}

pub fn mount() -> Result<(), JsValue> {
    for widget in query_selector_all(None, STAR_WIDGET_SELECTOR)? {
        mount_star_widget(&widget)?;
    }

    let Some(form) = get_element_by_id(FORM_ID) else {
        return Ok(());
    };
    log::info!("📋 [FEEDBACK] form attached");

    for field_id in [NAME_FIELD, COMMENTS_FIELD] {
        if let Some(field) = get_element_by_id(field_id) {
            let owner = field.clone();
            on_input(&field, move |_| clear_field_error(&owner))?;
        }
    }

    let owner = form.clone();
    on_checked_submit(&form, move |_| match validate_feedback(&read_form()) {
        Ok(()) => {
            if let Some(button) = submit_button(&owner) {
                set_busy_label(&button, SUBMITTING_MARKUP);
            }
            clear_validation_errors();
            true
        }
        Err(FeedbackRejection::Field { field, message }) => {
            log::debug!("🔍 [FEEDBACK] {} rejected", field);
            if let Err(e) = show_field_error(field, message) {
                log::warn!("⚠️ [FEEDBACK] cannot show error: {:?}", e);
            }
            false
        }
        Err(FeedbackRejection::Rating(message)) => {
            if let Some(w) = window() {
                let _ = w.alert_with_message(message);
            }
            false
        }
    })
}
