// ============================================================================
// VEHICLES VIEWMODEL - Customer dashboard vehicle grid
// ============================================================================

use std::cell::RefCell;

use crate::models::vehicle::Vehicle;
use crate::services::vehicle_service::VehicleService;
use crate::utils::constants::VEHICLE_PLACEHOLDER_IMAGE;
use crate::viewmodels::context::PageContext;

pub const NO_VEHICLES_MESSAGE: &str = "No vehicles available at the moment.";
pub const VEHICLES_FAILED_MESSAGE: &str = "Failed to load vehicles. Please try again later.";

#[derive(Debug, Clone, PartialEq)]
pub enum PriceView {
    Regular(String),
    /// Struck-through base rate followed by the discounted rate.
    Discounted { original: String, discounted: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct VehicleCard {
    pub vehicle_id: Option<i64>,
    pub title: String,
    pub year: String,
    pub image_src: String,
    pub price: PriceView,
    pub status: String,
    /// Accent colour for `AVAILABLE`, muted otherwise.
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum VehicleGrid {
    Cards(Vec<VehicleCard>),
    Empty(&'static str),
    Failed(&'static str),
}

/// Per-day price label, e.g. `Rs. 5000/day`.
fn rate_label(prefix: &str, rate: Option<f64>) -> String {
    match rate {
        Some(rate) => format!("{} {}/day", prefix, rate),
        None => format!("{} -/day", prefix),
    }
}

pub fn vehicle_card(vehicle: &Vehicle, price_prefix: &str) -> VehicleCard {
    let base = rate_label(price_prefix, vehicle.rental_rate_per_day);
    let price = match vehicle.discounted_rate() {
        Some(discounted) => PriceView::Discounted {
            original: base,
            discounted: rate_label(price_prefix, Some(discounted)),
        },
        None => PriceView::Regular(base),
    };

    VehicleCard {
        vehicle_id: vehicle.vehicle_id,
        title: vehicle.title(),
        year: vehicle.year.map(|y| y.to_string()).unwrap_or_default(),
        image_src: vehicle
            .image_url
            .clone()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| VEHICLE_PLACEHOLDER_IMAGE.to_string()),
        price,
        status: vehicle.status.clone().unwrap_or_default(),
        available: vehicle.is_available(),
    }
}

pub struct VehiclesViewModel {
    vehicles: VehicleService,
    price_prefix: String,
    loaded: RefCell<Vec<Vehicle>>,
}

impl VehiclesViewModel {
    pub fn new(ctx: &PageContext) -> Self {
        Self {
            vehicles: VehicleService::new(ctx.gateway.clone()),
            price_prefix: ctx.config.vehicle_price_prefix.clone(),
            loaded: RefCell::new(Vec::new()),
        }
    }

    pub async fn load(&self) -> VehicleGrid {
        match self.vehicles.available().await {
            Ok(vehicles) => {
                *self.loaded.borrow_mut() = vehicles;
                self.render(&self.loaded.borrow())
            }
            Err(e) => {
                log::error!("❌ [VEHICLES] load failed: {}", e);
                VehicleGrid::Failed(VEHICLES_FAILED_MESSAGE)
            }
        }
    }

    /// Re-renders the loaded list narrowed to `term`, taken as typed.
    pub fn filter(&self, term: &str) -> VehicleGrid {
        let loaded = self.loaded.borrow();
        let matching: Vec<Vehicle> = loaded.iter().filter(|v| v.matches(term)).cloned().collect();
        self.render(&matching)
    }

    fn render(&self, vehicles: &[Vehicle]) -> VehicleGrid {
        if vehicles.is_empty() {
            return VehicleGrid::Empty(NO_VEHICLES_MESSAGE);
        }
        VehicleGrid::Cards(
            vehicles
                .iter()
                .map(|v| vehicle_card(v, &self.price_prefix))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::Harness;
    use crate::utils::constants::VEHICLES_AVAILABLE_ENDPOINT;
    use serde_json::json;

    fn fleet() -> serde_json::Value {
        json!([
            { "vehicleId": 1, "make": "Toyota", "model": "Corolla", "year": 2019,
              "registrationNumber": "CAB-1234", "rentalRatePerDay": 5000,
              "discountedRatePerDay": 4500.5, "has_discount": true, "status": "AVAILABLE",
              "imageUrl": "/img/corolla.jpg" },
            { "vehicleId": 2, "make": "Honda", "model": "Civic", "year": 2021,
              "registrationNumber": "KX-9988", "rentalRatePerDay": 6000,
              "has_discount": false, "status": "MAINTENANCE" }
        ])
    }

    fn cards(grid: VehicleGrid) -> Vec<VehicleCard> {
        match grid {
            VehicleGrid::Cards(cards) => cards,
            other => panic!("expected cards, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn renders_cards_with_prices_and_status() {
        let h = Harness::new();
        h.transport.respond(VEHICLES_AVAILABLE_ENDPOINT, 200, fleet());
        let vm = VehiclesViewModel::new(&h.context());

        let cards = cards(vm.load().await);

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].title, "Toyota Corolla");
        assert_eq!(cards[0].year, "2019");
        assert_eq!(
            cards[0].price,
            PriceView::Discounted {
                original: "Rs. 5000/day".into(),
                discounted: "Rs. 4500.5/day".into(),
            }
        );
        assert!(cards[0].available);
        assert_eq!(cards[0].image_src, "/img/corolla.jpg");

        assert_eq!(cards[1].price, PriceView::Regular("Rs. 6000/day".into()));
        assert!(!cards[1].available);
        assert_eq!(cards[1].status, "MAINTENANCE");
        assert_eq!(cards[1].image_src, VEHICLE_PLACEHOLDER_IMAGE);
    }

    #[tokio::test]
    async fn filter_is_case_insensitive_across_fields() {
        let h = Harness::new();
        h.transport.respond(VEHICLES_AVAILABLE_ENDPOINT, 200, fleet());
        let vm = VehiclesViewModel::new(&h.context());
        vm.load().await;

        assert_eq!(cards(vm.filter("HONDA"))[0].title, "Honda Civic");
        assert_eq!(cards(vm.filter("corol"))[0].title, "Toyota Corolla");
        assert_eq!(cards(vm.filter("2021"))[0].title, "Honda Civic");
        assert_eq!(cards(vm.filter("kx-99"))[0].title, "Honda Civic");
        assert_eq!(cards(vm.filter("")).len(), 2);
        assert_eq!(vm.filter("tesla"), VehicleGrid::Empty(NO_VEHICLES_MESSAGE));
    }

    #[tokio::test]
    async fn filter_keeps_surrounding_spaces() {
        let h = Harness::new();
        h.transport.respond(VEHICLES_AVAILABLE_ENDPOINT, 200, fleet());
        let vm = VehiclesViewModel::new(&h.context());
        vm.load().await;

        assert_eq!(vm.filter("honda "), VehicleGrid::Empty(NO_VEHICLES_MESSAGE));
        assert_eq!(cards(vm.filter("honda")).len(), 1);
    }

    #[tokio::test]
    async fn empty_and_failed_states() {
        let h = Harness::new();
        h.transport.respond(VEHICLES_AVAILABLE_ENDPOINT, 200, json!([]));
        let vm = VehiclesViewModel::new(&h.context());
        assert_eq!(vm.load().await, VehicleGrid::Empty(NO_VEHICLES_MESSAGE));

        let h = Harness::new();
        h.transport.respond(VEHICLES_AVAILABLE_ENDPOINT, 503, json!({ "message": "down" }));
        let vm = VehiclesViewModel::new(&h.context());
        assert_eq!(vm.load().await, VehicleGrid::Failed(VEHICLES_FAILED_MESSAGE));
    }

    #[test]
    fn configured_price_prefix() {
        let vehicle = Vehicle {
            make: "Nissan".into(),
            model: "Leaf".into(),
            rental_rate_per_day: Some(80.0),
            ..Default::default()
        };
        assert_eq!(vehicle_card(&vehicle, "$").price, PriceView::Regular("$ 80/day".into()));
    }
}
