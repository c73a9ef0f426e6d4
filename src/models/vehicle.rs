use serde::{Deserialize, Serialize};

use crate::utils::serde_helpers::lenient_f64;

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    #[serde(default)]
    pub vehicle_id: Option<i64>,
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub registration_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub rental_rate_per_day: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub discounted_rate_per_day: Option<f64>,
    #[serde(default, rename = "has_discount")]
    pub has_discount: bool,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Vehicle {
    pub fn title(&self) -> String {
        format!("{} {}", self.make, self.model)
    }

    pub fn is_available(&self) -> bool {
        self.status.as_deref() == Some("AVAILABLE")
    }

    /// Discount is shown only when flagged and a discounted rate exists.
    pub fn discounted_rate(&self) -> Option<f64> {
        if self.has_discount {
            self.discounted_rate_per_day.filter(|r| *r != 0.0)
        } else {
            None
        }
    }

    /// Case-insensitive match on make, model, year or registration.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.make.to_lowercase().contains(&term)
            || self.model.to_lowercase().contains(&term)
            || self.year.is_some_and(|y| y.to_string().contains(&term))
            || self
                .registration_number
                .as_deref()
                .is_some_and(|r| r.to_lowercase().contains(&term))
    }
}
