use std::rc::Rc;

use crate::config::AppConfig;
use crate::services::gateway::RequestGateway;
use crate::state::session::SessionState;

/// Everything a page viewmodel needs: the gateway, the session and the config.
#[derive(Clone)]
pub struct PageContext {
    pub gateway: RequestGateway,
    pub session: SessionState,
    pub config: Rc<AppConfig>,
}

impl PageContext {
    pub fn new(gateway: RequestGateway, config: AppConfig) -> Self {
        let session = SessionState::new(gateway.storage().clone());
        Self {
            gateway,
            session,
            config: Rc::new(config),
        }
    }
}

#[cfg(test)]
impl crate::services::testing::Harness {
    pub fn context(&self) -> PageContext {
        PageContext::new(self.gateway.clone(), self.config.clone())
    }
}
