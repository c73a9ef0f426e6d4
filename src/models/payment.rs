use serde::{Deserialize, Serialize};

use crate::utils::serde_helpers::{lenient_f64, string_or_number};

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRow {
    #[serde(default, deserialize_with = "string_or_number")]
    pub payment_id: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub booking_id: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub amount: Option<f64>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub payment_date: Option<String>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct MethodTotal {
    #[serde(default)]
    pub method: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub amount: Option<f64>,
    #[serde(default)]
    pub count: u64,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct StatusCount {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub count: u64,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSummary {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_revenue: Option<f64>,
    #[serde(default)]
    pub total_payments: u64,
    #[serde(default)]
    pub last_payment_date: Option<String>,
    #[serde(default)]
    pub by_status: Vec<StatusCount>,
    #[serde(default)]
    pub by_method: Vec<MethodTotal>,
}
