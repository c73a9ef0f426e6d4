// Scripted transport and timers shared by the service and viewmodel tests.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use futures::future::{self, LocalBoxFuture};
use serde_json::Value;

use crate::config::AppConfig;
use crate::services::gateway::RequestGateway;
use crate::services::transport::{HttpRequest, HttpResponse, HttpTransport, Timer, TransportError};
use crate::state::storage::ClientStorage;

type Scripted = Result<HttpResponse, TransportError>;

fn path_of(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

/// Answers from a per-endpoint script and records every request.
/// The last scripted answer for an endpoint is reused.
#[derive(Default)]
pub struct MockTransport {
    routes: RefCell<HashMap<String, VecDeque<Scripted>>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl MockTransport {
    fn push(&self, path: &str, answer: Scripted) {
        self.routes
            .borrow_mut()
            .entry(path.to_string())
            .or_default()
            .push_back(answer);
    }

    pub fn respond(&self, path: &str, status: u16, body: Value) {
        let status_text = if (200..300).contains(&status) { "OK" } else { "Error" };
        self.respond_raw(path, status, status_text, &body.to_string());
    }

    pub fn respond_raw(&self, path: &str, status: u16, status_text: &str, body: &str) {
        self.push(
            path,
            Ok(HttpResponse {
                status,
                status_text: status_text.to_string(),
                body: body.to_string(),
            }),
        );
    }

    pub fn fail(&self, path: &str, error: TransportError) {
        self.push(path, Err(error));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }

    pub fn request_to(&self, path: &str) -> Option<HttpRequest> {
        self.requests
            .borrow()
            .iter()
            .rev()
            .find(|r| path_of(&r.url) == path)
            .cloned()
    }

    pub fn calls_to(&self, path: &str) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|r| path_of(&r.url) == path)
            .count()
    }

    pub fn body_json(&self, path: &str) -> Option<Value> {
        let request = self.request_to(path)?;
        serde_json::from_str(request.body.as_deref()?).ok()
    }

    fn answer(&self, url: &str) -> Scripted {
        let mut routes = self.routes.borrow_mut();
        let key = if routes.get(url).is_some_and(|q| !q.is_empty()) {
            url
        } else {
            path_of(url)
        };
        let Some(queue) = routes.get_mut(key).filter(|q| !q.is_empty()) else {
            return Err(TransportError::Network(format!("no route for {}", url)));
        };
        if queue.len() > 1 {
            queue.pop_front().unwrap_or_else(|| Err(TransportError::Aborted))
        } else {
            queue.front().cloned().unwrap_or(Err(TransportError::Aborted))
        }
    }
}

impl HttpTransport for MockTransport {
    fn send(&self, request: HttpRequest) -> LocalBoxFuture<'_, Result<HttpResponse, TransportError>> {
        let answer = self.answer(&request.url);
        self.requests.borrow_mut().push(request);
        Box::pin(future::ready(answer))
    }
}

/// Never answers.
pub struct HangingTransport;

impl HttpTransport for HangingTransport {
    fn send(&self, _request: HttpRequest) -> LocalBoxFuture<'_, Result<HttpResponse, TransportError>> {
        Box::pin(future::pending())
    }
}

/// Fires immediately and remembers the requested durations.
#[derive(Default)]
pub struct InstantTimer {
    requested: RefCell<Vec<u32>>,
}

impl InstantTimer {
    pub fn requested(&self) -> Vec<u32> {
        self.requested.borrow().clone()
    }
}

impl Timer for InstantTimer {
    fn sleep(&self, ms: u32) -> LocalBoxFuture<'static, ()> {
        self.requested.borrow_mut().push(ms);
        Box::pin(future::ready(()))
    }
}

/// Never fires, so requests always win the timeout race.
pub struct NeverTimer;

impl Timer for NeverTimer {
    fn sleep(&self, _ms: u32) -> LocalBoxFuture<'static, ()> {
        Box::pin(future::pending())
    }
}

/// Gateway wired to a mock transport and in-memory storage.
pub struct Harness {
    pub transport: Rc<MockTransport>,
    pub storage: ClientStorage,
    pub gateway: RequestGateway,
    pub config: AppConfig,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        let transport = Rc::new(MockTransport::default());
        let storage = ClientStorage::in_memory();
        let gateway = RequestGateway::new(transport.clone(), Rc::new(NeverTimer), storage.clone(), &config);
        Self {
            transport,
            storage,
            gateway,
            config,
        }
    }
}
