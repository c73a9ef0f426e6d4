// ============================================================================
// PACKAGE BOOKING VIEW - Booking modal duration and price lines
// ============================================================================

use wasm_bindgen::prelude::*;

use crate::dom::{
    get_element_by_id, on_change, set_attribute, set_text_content, set_value_of, value_of,
};
use crate::viewmodels::context::PageContext;
use crate::viewmodels::package_booking::quote;

const START_DATE_ID: &str = "package-start-date";
const END_DATE_ID: &str = "package-end-date";
const PACKAGE_PRICE_ID: &str = "package-booking-price";
const DURATION_ID: &str = "package-rental-duration";
const PRICE_DISPLAY_ID: &str = "package-price-display";
const DAYS_DISPLAY_ID: &str = "package-days-display";
const TOTAL_ID: &str = "package-total-cost";

fn set_text(id: &str, text: &str) {
    if let Some(element) = get_element_by_id(id) {
        set_text_content(&element, text);
    }
}

fn recalculate(currency: &str) {
    let price_label = get_element_by_id(PACKAGE_PRICE_ID)
        .and_then(|e| e.text_content())
        .unwrap_or_default();
    let start = value_of(START_DATE_ID);
    let end = value_of(END_DATE_ID);
    let Some(booking) = quote(&start, &end, &price_label, currency) else {
        return;
    };

    if let Some(end_input) = get_element_by_id(END_DATE_ID) {
        let min = booking.min_end_date.format("%Y-%m-%d").to_string();
        if let Err(e) = set_attribute(&end_input, "min", &min) {
            log::warn!("⚠️ [PACKAGE] cannot set end date minimum: {:?}", e);
        }
    }
    if let Some(end) = booking.adjusted_end {
        log::debug!("🔍 [PACKAGE] end date moved to {}", end.date());
        set_value_of(END_DATE_ID, &end.format("%Y-%m-%d").to_string());
    }

    set_text(DURATION_ID, &booking.duration_label);
    set_text(DAYS_DISPLAY_ID, &booking.duration_label);
    set_text(PRICE_DISPLAY_ID, &booking.price_label);
    set_text(TOTAL_ID, &booking.total_label);
}

pub fn mount(ctx: &PageContext) -> Result<(), JsValue> {
    let (Some(start), Some(end)) = (
        get_element_by_id(START_DATE_ID),
        get_element_by_id(END_DATE_ID),
    ) else {
        return Ok(());
    };
    log::info!("📋 [PACKAGE] booking calculator attached");

    for input in [start, end] {
        let currency = ctx.config.vehicle_price_prefix.clone();
        on_change(&input, move |_| recalculate(&currency))?;
    }
    Ok(())
}
