// ============================================================================
// FETCH TRANSPORT - Browser implementation of HttpTransport / Timer
// ============================================================================

use futures::future::LocalBoxFuture;
use gloo_net::http::{Request, RequestBuilder};
use gloo_timers::future::TimeoutFuture;
use web_sys::{AbortController, RequestCredentials};

use crate::services::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, Timer, TransportError};

/// Aborts the in-flight fetch when the request future is dropped
/// (the gateway drops it when the timeout wins).
struct AbortOnDrop(Option<AbortController>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        if let Some(controller) = self.0.take() {
            controller.abort();
        }
    }
}

#[derive(Default)]
pub struct FetchTransport;

impl FetchTransport {
    pub fn new() -> Self {
        Self
    }
}

fn builder(method: HttpMethod, url: &str) -> RequestBuilder {
    match method {
        HttpMethod::Get => Request::get(url),
        HttpMethod::Post => Request::post(url),
        HttpMethod::Put => Request::put(url),
        HttpMethod::Delete => Request::delete(url),
    }
}

fn map_error(error: gloo_net::Error) -> TransportError {
    match error {
        gloo_net::Error::JsError(e) if e.name == "AbortError" => TransportError::Aborted,
        other => TransportError::Network(other.to_string()),
    }
}

async fn exchange(request: HttpRequest) -> Result<HttpResponse, TransportError> {
    let controller = AbortController::new().ok();
    let guard = AbortOnDrop(controller);
    let signal = guard.0.as_ref().map(|c| c.signal());

    let credentials = match request.credentials {
        true => RequestCredentials::Include,
        false => RequestCredentials::SameOrigin,
    };
    let mut builder = builder(request.method, &request.url)
        .credentials(credentials)
        .abort_signal(signal.as_ref());
    for (name, value) in &request.headers {
        builder = builder.header(name, value);
    }

    let prepared = match request.body {
        Some(body) => builder.body(body),
        None => builder.build(),
    }
    .map_err(map_error)?;

    let response = prepared.send().await.map_err(map_error)?;
    let status = response.status();
    let status_text = response.status_text();
    // An empty or unreadable body is left for the gateway's fallback.
    let body = response.text().await.unwrap_or_default();

    drop(guard);
    Ok(HttpResponse {
        status,
        status_text,
        body,
    })
}

impl HttpTransport for FetchTransport {
    fn send(&self, request: HttpRequest) -> LocalBoxFuture<'_, Result<HttpResponse, TransportError>> {
        Box::pin(exchange(request))
    }
}

#[derive(Default)]
pub struct BrowserTimer;

impl Timer for BrowserTimer {
    fn sleep(&self, ms: u32) -> LocalBoxFuture<'static, ()> {
        Box::pin(TimeoutFuture::new(ms))
    }
}
