// ============================================================================
// VEHICLES VIEW - Customer dashboard grid and search box
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{
    append_child, get_element_by_id, on_input, set_inner_html, show_by_id, value_of, ElementBuilder,
};
use crate::viewmodels::context::PageContext;
use crate::viewmodels::vehicles::{PriceView, VehicleCard, VehicleGrid, VehiclesViewModel};

pub const GRID_ID: &str = "vehicles-grid";
const LOADING_ID: &str = "loading-vehicles";
const CONTAINER_ID: &str = "vehicles-container";
const SEARCH_ID: &str = "vehicle-search";

fn price_element(price: &PriceView) -> Result<Element, JsValue> {
    let block = ElementBuilder::new("div")?.class("vehicle-price");
    let block = match price {
        PriceView::Regular(rate) => block.child(ElementBuilder::new("span")?.text(rate).build())?,
        PriceView::Discounted { original, discounted } => block
            .child(
                ElementBuilder::new("span")?
                    .class("original-price")
                    .attr("style", "text-decoration: line-through;")?
                    .text(original)
                    .build(),
            )?
            .child(
                ElementBuilder::new("span")?
                    .class("discounted-price")
                    .text(discounted)
                    .build(),
            )?,
    };
    Ok(block.build())
}

fn card_element(card: &VehicleCard) -> Result<Element, JsValue> {
    let status_class = if card.available {
        "vehicle-status available"
    } else {
        "vehicle-status unavailable"
    };

    let body = ElementBuilder::new("div")?
        .class("vehicle-info")
        .child(ElementBuilder::new("h3")?.text(&card.title).build())?
        .child(ElementBuilder::new("p")?.class("vehicle-year").text(&card.year).build())?
        .child(price_element(&card.price)?)?
        .child(ElementBuilder::new("span")?.class(status_class).text(&card.status).build())?
        .build();

    let mut builder = ElementBuilder::new("div")?
        .class("vehicle-card")
        .child(
            ElementBuilder::new("img")?
                .attr("src", &card.image_src)?
                .attr("alt", &card.title)?
                .build(),
        )?
        .child(body)?;
    if let Some(id) = card.vehicle_id {
        builder = builder.attr("data-vehicle-id", &id.to_string())?;
    }
    Ok(builder.build())
}

fn render(grid: &VehicleGrid) -> Result<(), JsValue> {
    let Some(container) = get_element_by_id(GRID_ID) else {
        return Ok(());
    };
    set_inner_html(&container, "");
    match grid {
        VehicleGrid::Cards(cards) => {
            for card in cards {
                append_child(&container, &card_element(card)?)?;
            }
        }
        VehicleGrid::Empty(message) => {
            let note = ElementBuilder::new("p")?.class("no-vehicles").text(message);
            append_child(&container, &note.build())?;
        }
        VehicleGrid::Failed(message) => {
            let note = ElementBuilder::new("p")?.class("error-message").text(message);
            append_child(&container, &note.build())?;
        }
    }
    Ok(())
}

pub fn mount(ctx: &PageContext) -> Result<(), JsValue> {
    if get_element_by_id(GRID_ID).is_none() {
        return Ok(());
    }
    log::info!("📋 [VEHICLES] grid attached");

    let vm = Rc::new(VehiclesViewModel::new(ctx));
    show_by_id(LOADING_ID, true);
    show_by_id(CONTAINER_ID, false);
    {
        let vm = vm.clone();
        spawn_local(async move {
            let grid = vm.load().await;
            show_by_id(LOADING_ID, false);
            show_by_id(CONTAINER_ID, true);
            if let Err(e) = render(&grid) {
                log::error!("❌ [VEHICLES] render failed: {:?}", e);
            }
        });
    }

    if let Some(search) = get_element_by_id(SEARCH_ID) {
        on_input(&search, move |_| {
            if let Err(e) = render(&vm.filter(&value_of(SEARCH_ID))) {
                log::error!("❌ [VEHICLES] render failed: {:?}", e);
            }
        })?;
    }
    Ok(())
}
