//! HTTP Transport Implementation using Reqwest

use platform_async::runtime::Handle;
use platform_traits::{
    error::{PlatformError, Result},
    http::{HttpTransport, NormalizedRequest, RequestSpec, ResponseEnvelope, TransportCallback},
    logging::redact_if_sensitive,
    resources::format_resource,
};
use reqwest::{Client, Method, RequestBuilder, Url};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Reqwest-based transport for native desktop hosts.
///
/// Each `send` performs exactly one exchange (no retries) on the ambient Tokio
/// runtime and invokes the callback once the whole body has been read. The
/// underlying client is built without a user agent or custom default headers,
/// so apart from protocol framing only the caller's headers go on the wire.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with default connection settings.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| PlatformError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Use a preconfigured client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Build the reqwest request for an already-normalized request.
    fn build_request(&self, request: NormalizedRequest) -> Result<RequestBuilder> {
        let method = Method::from_bytes(request.method.as_bytes()).map_err(|_| {
            PlatformError::Validation(format!("Invalid HTTP method: {}", request.method))
        })?;
        let url = Url::parse(&request.url).map_err(|e| {
            PlatformError::Validation(format!("Invalid request URL '{}': {}", request.url, e))
        })?;

        let mut req = self.client.request(method, url);

        for (key, value) in request.headers {
            req = req.header(key, value);
        }

        if let Some(body) = request.body {
            req = req.body(body);
        }

        if let Some(timeout) = request.timeout {
            req = req.timeout(timeout);
        }

        Ok(req)
    }

    /// Run the exchange through to its terminal state.
    async fn exchange(req: RequestBuilder) -> Result<ResponseEnvelope> {
        let response = req.send().await.map_err(transport_error)?;

        let status = response.status().as_u16();
        let url = response.url().to_string();
        let mut headers: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in response.headers() {
            headers
                .entry(name.to_string())
                .or_default()
                .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
        }

        let body = response.bytes().await.map_err(transport_error)?;

        Ok(ResponseEnvelope {
            status,
            headers,
            body,
            url,
        })
    }
}

fn transport_error(e: reqwest::Error) -> PlatformError {
    if e.is_builder() {
        PlatformError::Validation(format!("Invalid request: {}", e))
    } else if e.is_timeout() {
        PlatformError::Transport("Request timed out".to_string())
    } else if e.is_connect() {
        PlatformError::Transport(format!("Connection failed: {}", e))
    } else {
        PlatformError::Transport(e.to_string())
    }
}

/// Holds a transport callback until the exchange reaches a terminal state.
///
/// If the exchange task is dropped first (for example because its runtime
/// shut down) the callback still fires, with [`PlatformError::Abandoned`].
struct CallbackGuard {
    callback: Option<TransportCallback>,
}

impl CallbackGuard {
    fn new(callback: TransportCallback) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    fn fire(mut self, result: Result<ResponseEnvelope>) {
        if let Some(callback) = self.callback.take() {
            callback(result);
        }
    }
}

impl Drop for CallbackGuard {
    fn drop(&mut self) {
        if let Some(callback) = self.callback.take() {
            warn!("HTTP exchange dropped before completing");
            callback(Err(PlatformError::Abandoned));
        }
    }
}

impl HttpTransport for ReqwestTransport {
    fn send(&self, request: RequestSpec, callback: TransportCallback) {
        let request = request.normalize();
        let method = request.method.clone();
        let url = request.url.clone();

        debug!(
            method = %method,
            url = %url,
            headers = ?request
                .headers
                .iter()
                .map(|(k, v)| (k.as_str(), redact_if_sensitive(k, v)))
                .collect::<Vec<_>>(),
            "Sending HTTP request"
        );

        let req = match self.build_request(request) {
            Ok(req) => req,
            Err(e) => {
                warn!(error = %e, "Rejected HTTP request before sending");
                callback(Err(e));
                return;
            }
        };

        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                let message = format_resource("Platform_RuntimeUnavailable", &["an HTTP request"]);
                warn!(url = %url, "{}", message);
                callback(Err(PlatformError::Unsupported(message)));
                return;
            }
        };

        let guard = CallbackGuard::new(callback);
        handle.spawn(async move {
            let result = Self::exchange(req).await;
            match &result {
                Ok(response) => debug!(
                    method = %method,
                    url = %url,
                    status = response.status,
                    bytes = response.body.len(),
                    "HTTP exchange completed"
                ),
                Err(e) => warn!(method = %method, url = %url, error = %e, "HTTP exchange failed"),
            }
            guard.fire(result);
        });
    }
}
