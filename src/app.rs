// ============================================================================
// APP - Page bootstrap: context, session checks and view dispatch
// ============================================================================
// The server renders each page; the app only looks at which elements are
// present and attaches the matching view.
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::config::CONFIG;
use crate::dom::{
    add_class, document, get_element_by_id, location_pathname, location_search, meta_content,
    navigate, on_click, remove_class,
};
use crate::services::fetch::{BrowserTimer, FetchTransport};
use crate::services::gateway::RequestGateway;
use crate::state::session::{is_auth_page, SessionState, Theme};
use crate::state::storage::ClientStorage;
use crate::utils::constants::DASHBOARD_PAGE;
use crate::utils::query::QueryParams;
use crate::viewmodels::context::PageContext;
use crate::views::{self, show_message};

const LIGHT_THEME_CLASS: &str = "light-theme";
const THEME_TOGGLE_ID: &str = "theme-toggle";

pub struct App {
    ctx: PageContext,
    query: QueryParams,
}

impl App {
    pub fn new() -> Self {
        let storage = ClientStorage::browser();
        let mut gateway = RequestGateway::new(
            Rc::new(FetchTransport::new()),
            Rc::new(BrowserTimer),
            storage,
            &CONFIG,
        );
        // Spring Security pages expose their CSRF token in meta tags.
        if let (Some(token), Some(header)) = (meta_content("_csrf"), meta_content("_csrf_header")) {
            gateway = gateway.with_header(&header, &token);
        }

        Self {
            ctx: PageContext::new(gateway, CONFIG.clone()),
            query: QueryParams::parse(&location_search()),
        }
    }

    /// `false` when the user was sent elsewhere and nothing should be attached.
    fn check_auth(&self) -> bool {
        let path = location_pathname();
        if self.ctx.session.is_authenticated() && is_auth_page(&path) {
            log::info!("👋 [APP] already logged in, leaving {}", path);
            navigate(DASHBOARD_PAGE);
            return false;
        }
        true
    }

    fn show_pending_messages(&self) {
        if let Some(flash) = self.ctx.session.take_flash() {
            show_message(&flash.message, flash.kind(), None);
        }
        if let Some((message, kind)) = self.query.flash() {
            show_message(&message, kind, None);
        }
    }

    pub fn start(&self) -> Result<(), JsValue> {
        apply_theme(self.ctx.session.theme());
        bind_theme_toggle(self.ctx.session.clone())?;

        if !self.check_auth() {
            return Ok(());
        }
        self.show_pending_messages();

        let ctx = &self.ctx;
        views::login::mount(ctx, self.query.clone())?;
        views::register::mount(ctx)?;
        views::password_reset::mount_forgot(ctx)?;
        views::password_reset::mount_reset(ctx)?;
        views::two_factor::mount(ctx)?;
        views::profile::mount(ctx, self.query.get("email"))?;
        views::vehicles::mount(ctx)?;
        views::admin_payments::mount(ctx)?;
        views::admin_feedback::mount(ctx)?;
        views::feedback_form::mount()?;
        views::package_booking::mount(ctx)?;
        log::info!("✅ [APP] page ready");
        Ok(())
    }
}

fn apply_theme(theme: Theme) {
    let Some(body) = document().and_then(|d| d.body()) else {
        return;
    };
    let result = match theme {
        Theme::Light => add_class(&body, LIGHT_THEME_CLASS),
        Theme::Dark => remove_class(&body, LIGHT_THEME_CLASS),
    };
    if let Err(e) = result {
        log::warn!("⚠️ [APP] cannot apply theme: {:?}", e);
    }
}

fn bind_theme_toggle(session: SessionState) -> Result<(), JsValue> {
    let Some(toggle) = get_element_by_id(THEME_TOGGLE_ID) else {
        return Ok(());
    };
    on_click(&toggle, move |_| {
        let theme = session.theme().toggled();
        session.set_theme(theme);
        apply_theme(theme);
    })
}
