// Endpoints, page routes and UI identifiers shared by services and views.

// Auth
pub const LOGIN_ENDPOINT: &str = "/api/auth/login";
pub const REGISTER_ENDPOINT: &str = "/api/auth/register";
pub const FORGOT_PASSWORD_ENDPOINT: &str = "/api/auth/forgot-password";
pub const RESET_PASSWORD_ENDPOINT: &str = "/api/auth/reset-password";
pub const TWO_FACTOR_SETUP_ENDPOINT: &str = "/api/auth/2fa/setup";
pub const TWO_FACTOR_ENABLE_ENDPOINT: &str = "/api/auth/2fa/enable";
pub const TWO_FACTOR_VERIFY_ENDPOINT: &str = "/api/auth/2fa/verify";

// Profile
pub const ACCOUNT_UPDATE_PUT_ENDPOINT: &str = "/profile/api/update";
pub const ACCOUNT_UPDATE_POST_ENDPOINT: &str = "/profile/update";
pub const PROFILE_UPDATE_ENDPOINT: &str = "/api/profile/update";
pub const CHANGE_PASSWORD_ENDPOINT: &str = "/api/profile/change-password";

// Vehicles
pub const VEHICLES_AVAILABLE_ENDPOINT: &str = "/api/vehicles/available";

// Admin
pub const ADMIN_PAYMENTS_ENDPOINT: &str = "/api/admin/payments";
pub const ADMIN_FEEDBACK_REPLY_ENDPOINT: &str = "/api/admin/feedback/reply";
pub const ADMIN_FEEDBACK_DELETE_ENDPOINT: &str = "/api/admin/feedback/delete";
pub const FEEDBACK_LIST_ENDPOINT: &str = "/api/public/feedback";

// Pages
pub const LOGIN_PAGE: &str = "/login";
pub const DASHBOARD_PAGE: &str = "/dashboard";
pub const ADMIN_DASHBOARD_PAGE: &str = "/admin/dashboard";
pub const FLEET_MANAGER_DASHBOARD_PAGE: &str = "/fleet-manager/dashboard";
pub const VERIFY_2FA_PAGE: &str = "/verify-2fa";
pub const FORGOT_PASSWORD_PAGE: &str = "/forgot-password";
pub const RESET_PASSWORD_PAGE: &str = "/reset-password";
pub const PROFILE_PAGE: &str = "/profile";
pub const REGISTER_PAGE: &str = "/register";

// Redirect delays (ms)
pub const LOGIN_REDIRECT_DELAY_MS: u32 = 1_000;
pub const FORM_REDIRECT_DELAY_MS: u32 = 2_000;
pub const PROFILE_RELOAD_DELAY_MS: u32 = 1_500;
pub const SESSION_EXPIRED_DELAY_MS: u32 = 3_000;

// Message display
pub const DEFAULT_MESSAGE_CONTAINER: &str = "message-container";
pub const LUXURY_CONTAINER_CLASS: &str = "message-container";

// Loading button
pub const LOADING_CLASS: &str = "loading";
pub const LOADING_LABEL_ATTR: &str = "data-text";
pub const LOADING_MARKUP: &str = "<span class=\"loading-spinner\"></span> Please wait...";

pub const CUSTOMER_ROLE: &str = "ROLE_CUSTOMER";
pub const VEHICLE_PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/200x120?text=No+Image";
