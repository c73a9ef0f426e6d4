// ============================================================================
// AUTH SERVICE - Login, registration, password reset and 2FA endpoints
// ============================================================================
// Only HTTP: callers decide what the envelope means for the page.
// ============================================================================

use crate::models::api::ApiEnvelope;
use crate::models::auth::{
    AuthResponse, ForgotPasswordRequest, LoginRequest, RegisterRequest, ResetPasswordRequest,
    TwoFactorCodeRequest, TwoFactorSetupRequest, TwoFactorSetupResponse,
};
use crate::services::gateway::RequestGateway;
use crate::services::transport::HttpMethod;
use crate::utils::constants::{
    FORGOT_PASSWORD_ENDPOINT, LOGIN_ENDPOINT, REGISTER_ENDPOINT, RESET_PASSWORD_ENDPOINT,
    TWO_FACTOR_ENABLE_ENDPOINT, TWO_FACTOR_SETUP_ENDPOINT, TWO_FACTOR_VERIFY_ENDPOINT,
};

#[derive(Clone)]
pub struct AuthService {
    gateway: RequestGateway,
}

impl AuthService {
    pub fn new(gateway: RequestGateway) -> Self {
        Self { gateway }
    }

    pub async fn login(&self, request: &LoginRequest) -> ApiEnvelope {
        log::info!("🔐 [AUTH] login for {}", request.email);
        self.gateway.call(LOGIN_ENDPOINT, HttpMethod::Post, Some(request)).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> ApiEnvelope {
        log::info!("📝 [AUTH] register {} as {}", request.email, request.role_name);
        self.gateway.call(REGISTER_ENDPOINT, HttpMethod::Post, Some(request)).await
    }

    pub async fn forgot_password(&self, request: &ForgotPasswordRequest) -> ApiEnvelope {
        self.gateway
            .call(FORGOT_PASSWORD_ENDPOINT, HttpMethod::Post, Some(request))
            .await
    }

    pub async fn reset_password(&self, request: &ResetPasswordRequest) -> ApiEnvelope {
        self.gateway
            .call(RESET_PASSWORD_ENDPOINT, HttpMethod::Post, Some(request))
            .await
    }

    pub async fn setup_two_factor(&self, request: &TwoFactorSetupRequest) -> ApiEnvelope {
        self.gateway
            .call(TWO_FACTOR_SETUP_ENDPOINT, HttpMethod::Post, Some(request))
            .await
    }

    pub async fn enable_two_factor(&self, request: &TwoFactorCodeRequest) -> ApiEnvelope {
        self.gateway
            .call(TWO_FACTOR_ENABLE_ENDPOINT, HttpMethod::Post, Some(request))
            .await
    }

    pub async fn verify_two_factor(&self, request: &TwoFactorCodeRequest) -> ApiEnvelope {
        self.gateway
            .call(TWO_FACTOR_VERIFY_ENDPOINT, HttpMethod::Post, Some(request))
            .await
    }
}

/// Typed view of a login / verify body. A body that does not fit the shape
/// reads as an unsuccessful response carrying whatever message it had.
pub fn decode_auth_response(envelope: &ApiEnvelope) -> AuthResponse {
    envelope.data.decode().unwrap_or_else(|e| {
        log::warn!("⚠️ [AUTH] unexpected auth response shape: {}", e);
        AuthResponse {
            success: false,
            message: envelope.data.message().map(str::to_string),
            ..Default::default()
        }
    })
}

pub fn decode_setup_response(envelope: &ApiEnvelope) -> TwoFactorSetupResponse {
    envelope.data.decode().unwrap_or_default()
}
