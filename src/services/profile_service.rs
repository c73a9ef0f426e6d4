// ============================================================================
// PROFILE SERVICE - Account editor, customer profile and password change
// ============================================================================

use crate::config::AccountUpdateRoute;
use crate::models::api::ApiEnvelope;
use crate::models::profile::{AccountUpdateRequest, ChangePasswordRequest, ProfileUpdateRequest};
use crate::services::gateway::RequestGateway;
use crate::services::transport::HttpMethod;
use crate::utils::constants::{
    ACCOUNT_UPDATE_POST_ENDPOINT, ACCOUNT_UPDATE_PUT_ENDPOINT, CHANGE_PASSWORD_ENDPOINT,
    PROFILE_UPDATE_ENDPOINT,
};
use crate::utils::query::with_email;

#[derive(Clone)]
pub struct ProfileService {
    gateway: RequestGateway,
    route: AccountUpdateRoute,
}

impl ProfileService {
    pub fn new(gateway: RequestGateway, route: AccountUpdateRoute) -> Self {
        Self { gateway, route }
    }

    pub async fn update_account(&self, request: &AccountUpdateRequest) -> ApiEnvelope {
        let (endpoint, method) = match self.route {
            AccountUpdateRoute::Put => (ACCOUNT_UPDATE_PUT_ENDPOINT, HttpMethod::Put),
            AccountUpdateRoute::Post => (ACCOUNT_UPDATE_POST_ENDPOINT, HttpMethod::Post),
        };
        log::info!("📤 [PROFILE] saving account {} via {}", request.user_id, endpoint);
        self.gateway.call(endpoint, method, Some(request)).await
    }

    /// `email` selects the profile when the page was opened for a specific user.
    pub async fn update_profile(&self, email: Option<&str>, request: &ProfileUpdateRequest) -> ApiEnvelope {
        let endpoint = with_email(PROFILE_UPDATE_ENDPOINT, email);
        self.gateway.call(&endpoint, HttpMethod::Post, Some(request)).await
    }

    pub async fn change_password(&self, email: Option<&str>, request: &ChangePasswordRequest) -> ApiEnvelope {
        let endpoint = with_email(CHANGE_PASSWORD_ENDPOINT, email);
        self.gateway.call(&endpoint, HttpMethod::Post, Some(request)).await
    }
}
