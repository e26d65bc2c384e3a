//! HTTP Transport Abstraction
//!
//! Hosts perform network exchanges described by a [`RequestSpec`] and report
//! the outcome through a callback invoked exactly once. Normalization of the
//! request (method casing, fragment stripping, header defaults) happens here,
//! before any host code runs, so every host sends the same thing.

use bytes::Bytes;
use platform_async::{wrap, AsyncOperation, Completion};
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::error::{PlatformError, Result};

/// Method used when a request does not name one.
pub const DEFAULT_METHOD: &str = "GET";

/// Declarative description of a single network exchange.
#[derive(Debug, Clone, Default)]
pub struct RequestSpec {
    /// Absolute URL. Anything from the first `#` onwards is never sent.
    pub url: String,
    /// HTTP method in any casing; `None` means `GET`.
    pub method: Option<String>,
    /// Request headers; `None` is treated as an empty map.
    pub headers: Option<HashMap<String, String>>,
    pub body: Option<Bytes>,
    /// Per-request timeout, honoured by hosts that support one.
    pub timeout: Option<Duration>,
}

impl RequestSpec {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        let json = serde_json::to_vec(body)?;
        self.body = Some(Bytes::from(json));
        Ok(self.header("Content-Type", "application/json"))
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Produce the host-neutral form every transport sends.
    pub fn normalize(self) -> NormalizedRequest {
        let method = normalize_method(self.method.as_deref());
        let url = strip_fragment(&self.url).to_string();

        let mut headers: Vec<(String, String)> =
            self.headers.unwrap_or_default().into_iter().collect();
        headers.sort();

        NormalizedRequest {
            method,
            url,
            headers,
            body: self.body,
            timeout: self.timeout,
        }
    }
}

/// A request after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRequest {
    /// Upper-cased method.
    pub method: String,
    /// URL without its fragment.
    pub url: String,
    /// Exactly the headers the caller supplied, sorted by name.
    pub headers: Vec<(String, String)>,
    pub body: Option<Bytes>,
    pub timeout: Option<Duration>,
}

/// Upper-case `method`, falling back to [`DEFAULT_METHOD`] when absent or empty.
pub fn normalize_method(method: Option<&str>) -> String {
    match method {
        Some(m) if !m.is_empty() => m.to_uppercase(),
        _ => DEFAULT_METHOD.to_string(),
    }
}

/// Truncate `url` at its first `#`.
pub fn strip_fragment(url: &str) -> &str {
    match url.find('#') {
        Some(index) => &url[..index],
        None => url,
    }
}

/// Response handed back once the exchange reached its terminal state.
///
/// The transport does not interpret the status: 4xx and 5xx responses are
/// delivered as successfully completed exchanges.
#[derive(Debug, Clone)]
pub struct ResponseEnvelope {
    pub status: u16,
    /// Response headers by name, every value in the order received.
    pub headers: HashMap<String, Vec<String>>,
    pub body: Bytes,
    /// Final URL after any redirects the host followed.
    pub url: String,
}

impl ResponseEnvelope {
    /// Parse response body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Get response body as UTF-8 string
    pub fn text(&self) -> Result<String> {
        String::from_utf8(self.body.to_vec())
            .map_err(|e| PlatformError::Validation(format!("Invalid UTF-8: {}", e)))
    }

    /// Case-insensitive header lookup; the first value when repeated.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.header_values(name).into_iter().next()
    }

    /// Every value of a header, case-insensitive on the name.
    pub fn header_values(&self, name: &str) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|(key, _)| key.eq_ignore_ascii_case(name))
            .flat_map(|(_, values)| values.iter().map(String::as_str))
            .collect()
    }

    /// Check if response status is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Check if response status indicates a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// Check if response status indicates a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }
}

/// Completion handler for [`HttpTransport::send`].
///
/// Transport faults arrive as `Err`; any response, whatever its status,
/// arrives as `Ok`.
pub type TransportCallback = Box<dyn FnOnce(Result<ResponseEnvelope>) + Send + 'static>;

/// Host networking primitive.
///
/// Implementations must:
/// - send exactly [`RequestSpec::normalize`]'s output, adding no headers of
///   their own
/// - invoke `callback` exactly once, after the full response body arrived
/// - report DNS, connection, timeout and body-read failures as
///   [`PlatformError::Transport`]
/// - report requests they cannot even open (bad URL or method) through the
///   callback as [`PlatformError::Validation`], never by panicking
///
/// # Example
///
/// ```ignore
/// use platform_traits::http::{HttpTransport, RequestSpec};
///
/// async fn fetch_movies(transport: &dyn HttpTransport) -> Result<String> {
///     let request = RequestSpec::new("https://example.azure-mobile.net/tables/movies")
///         .header("X-ZUMO-APPLICATION", "key");
///
///     let response = transport.send_async(request).await?;
///     response.text()
/// }
/// ```
pub trait HttpTransport: Send + Sync {
    /// Start the exchange. Returns immediately; `callback` fires later.
    fn send(&self, request: RequestSpec, callback: TransportCallback);

    /// [`send`](HttpTransport::send) composed through the async adapter.
    fn send_async(&self, request: RequestSpec) -> AsyncOperation<ResponseEnvelope, PlatformError> {
        let send = wrap(
            |request: RequestSpec, done: Completion<ResponseEnvelope, PlatformError>| {
                self.send(request, Box::new(done.into_callback()));
                Ok(())
            },
        );
        send(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_is_stripped() {
        let normalized = RequestSpec::new("http://x/y#frag").normalize();
        assert_eq!(normalized.url, "http://x/y");

        assert_eq!(strip_fragment("http://x/y#a#b"), "http://x/y");
        assert_eq!(strip_fragment("http://x/y?q=1"), "http://x/y?q=1");
        assert_eq!(strip_fragment("#only"), "");
    }

    #[test]
    fn test_method_defaults_and_upper_cases() {
        assert_eq!(RequestSpec::new("http://x").normalize().method, "GET");
        assert_eq!(
            RequestSpec::new("http://x").method("post").normalize().method,
            "POST"
        );
        assert_eq!(
            RequestSpec::new("http://x").method("").normalize().method,
            "GET"
        );
        assert_eq!(normalize_method(Some("Patch")), "PATCH");
    }

    #[test]
    fn test_headers_default_to_empty() {
        let normalized = RequestSpec::new("http://x").normalize();
        assert!(normalized.headers.is_empty());
        assert!(normalized.body.is_none());
    }

    #[test]
    fn test_headers_are_exactly_those_supplied() {
        let normalized = RequestSpec::new("http://x")
            .header("X-ZUMO-APPLICATION", "key")
            .header("Accept", "application/json")
            .normalize();

        assert_eq!(
            normalized.headers,
            vec![
                ("Accept".to_string(), "application/json".to_string()),
                ("X-ZUMO-APPLICATION".to_string(), "key".to_string()),
            ]
        );
    }

    #[test]
    fn test_json_body_sets_content_type() {
        let request = RequestSpec::new("http://x")
            .method("post")
            .json(&serde_json::json!({ "title": "Casablanca" }))
            .unwrap();

        let normalized = request.normalize();
        assert_eq!(
            normalized.body,
            Some(Bytes::from_static(br#"{"title":"Casablanca"}"#))
        );
        assert!(normalized
            .headers
            .contains(&("Content-Type".to_string(), "application/json".to_string())));
    }

    #[test]
    fn test_response_status_checks() {
        let response = ResponseEnvelope {
            status: 404,
            headers: HashMap::from([
                ("Content-Type".to_string(), vec!["text/plain".to_string()]),
                (
                    "Set-Cookie".to_string(),
                    vec!["a=1".to_string(), "b=2".to_string()],
                ),
            ]),
            body: Bytes::from("missing"),
            url: "http://x".to_string(),
        };

        assert!(!response.is_success());
        assert!(response.is_client_error());
        assert!(!response.is_server_error());
        assert_eq!(response.header("content-type"), Some("text/plain"));
        assert_eq!(response.header("set-cookie"), Some("a=1"));
        assert_eq!(response.header_values("SET-COOKIE"), vec!["a=1", "b=2"]);
        assert!(response.header_values("etag").is_empty());
        assert_eq!(response.text().unwrap(), "missing");
    }

    struct ImmediateTransport;

    impl HttpTransport for ImmediateTransport {
        fn send(&self, request: RequestSpec, callback: TransportCallback) {
            let normalized = request.normalize();
            callback(Ok(ResponseEnvelope {
                status: 503,
                headers: HashMap::new(),
                body: Bytes::from(normalized.method),
                url: normalized.url,
            }));
        }
    }

    struct SilentTransport;

    impl HttpTransport for SilentTransport {
        fn send(&self, _request: RequestSpec, callback: TransportCallback) {
            drop(callback);
        }
    }

    #[tokio::test]
    async fn test_send_async_resolves_with_envelope() {
        let response = ImmediateTransport
            .send_async(RequestSpec::new("http://x/y#z").method("delete"))
            .await
            .unwrap();

        assert_eq!(response.status, 503);
        assert_eq!(response.url, "http://x/y");
        assert_eq!(response.text().unwrap(), "DELETE");
    }

    #[tokio::test]
    async fn test_send_async_never_hangs_on_dropped_callback() {
        let result = SilentTransport.send_async(RequestSpec::new("http://x")).await;
        assert!(matches!(result, Err(PlatformError::Abandoned)));
    }
}
