//! Per-request options for [`fetch`](crate::urlrequest::fetch).

use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, Method};

/// Default maximum number of redirects to follow.
pub const DEFAULT_FOLLOW: usize = 20;

/// What to do with a 3xx response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RedirectMode {
    /// Follow `Location` up to the configured limit.
    #[default]
    Follow,
    /// Return the redirect response as-is.
    Manual,
    /// Fail on any redirect response.
    Error,
}

/// Options for a request. `fetch` only reads them; per-hop headers are built on a
/// copy.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
    pub redirect: RedirectMode,
    /// Maximum number of redirects followed in [`RedirectMode::Follow`].
    pub follow: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: HeaderMap::new(),
            body: None,
            redirect: RedirectMode::default(),
            follow: DEFAULT_FOLLOW,
        }
    }
}

impl FetchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Add a header. Invalid names or values are ignored.
    pub fn header<K, V>(mut self, key: K, value: V) -> Self
    where
        K: TryInto<HeaderName>,
        V: TryInto<HeaderValue>,
    {
        if let (Ok(k), Ok(v)) = (key.try_into(), value.try_into()) {
            self.headers.insert(k, v);
        }
        self
    }

    pub fn body<B: Into<Bytes>>(mut self, body: B) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set JSON body.
    #[cfg(feature = "json")]
    pub fn json<T: serde::Serialize>(mut self, json: &T) -> Self {
        if let Ok(bytes) = serde_json::to_vec(json) {
            self.body = Some(bytes.into());
            self.headers.insert(
                http::header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
        }
        self
    }

    pub fn redirect(mut self, mode: RedirectMode) -> Self {
        self.redirect = mode;
        self
    }

    pub fn follow(mut self, max_redirects: usize) -> Self {
        self.follow = max_redirects;
        self
    }
}
