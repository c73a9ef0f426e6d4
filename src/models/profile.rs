use serde::{Deserialize, Serialize};

/// Full account form (`/profile/api/update` or the legacy `/profile/update`).
/// Optional groups are only present when the page rendered those fields.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdateRequest {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerFields>,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub staff: Option<StaffFields>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct CustomerFields {
    pub contact_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_postal_code: Option<String>,
    pub is_customer: bool,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct StaffFields {
    pub staff_id_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    pub is_staff: bool,
}

/// Echo of the saved account.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct AccountSnapshot {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl AccountSnapshot {
    pub fn display_name(&self) -> Option<String> {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) => Some(format!("{} {}", first, last)),
            (Some(first), None) => Some(first.to_string()),
            (None, Some(last)) => Some(last.to_string()),
            (None, None) => None,
        }
    }
}

/// Customer self-service form (`/api/profile/update`).
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub contact_number: Option<String>,
    pub address_street: Option<String>,
    pub address_city: Option<String>,
    pub address_postal_code: Option<String>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_update_flattens_present_groups_only() {
        let req = AccountUpdateRequest {
            user_id: "3".into(),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            email: "jane@example.com".into(),
            customer: Some(CustomerFields {
                contact_number: "0771234567".into(),
                address_city: Some("Colombo".into()),
                is_customer: true,
                ..Default::default()
            }),
            ..Default::default()
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["userId"], "3");
        assert_eq!(json["contactNumber"], "0771234567");
        assert_eq!(json["isCustomer"], true);
        assert_eq!(json["addressCity"], "Colombo");
        assert!(json.get("addressStreet").is_none());
        assert!(json.get("isStaff").is_none());
        assert!(json.get("password").is_none());
    }

    #[test]
    fn profile_update_keeps_null_optionals() {
        let req = ProfileUpdateRequest {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            email: "jane@example.com".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json["contactNumber"].is_null());
    }

    #[test]
    fn snapshot_display_name() {
        let snap: AccountSnapshot =
            serde_json::from_str(r#"{"firstName":"Jane","lastName":"Doe","email":"j@x.io"}"#).unwrap();
        assert_eq!(snap.display_name().as_deref(), Some("Jane Doe"));
        assert_eq!(AccountSnapshot::default().display_name(), None);
    }
}
