//! HTTP Response with body access.

use crate::base::neterror::NetError;
use crate::http::transport::TransportResponse;
use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use url::Url;

/// The final response of a fetch, after any redirects were followed.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
    url: Url,
    redirected: bool,
}

impl HttpResponse {
    pub(crate) fn new(response: TransportResponse, url: Url, redirected: bool) -> Self {
        Self {
            status: response.status,
            headers: response.headers,
            body: response.body,
            url,
            redirected,
        }
    }

    /// Get the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// True for 2xx statuses.
    pub fn ok(&self) -> bool {
        self.status.is_success()
    }

    /// Get a reference to the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The URL that produced this response.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Whether at least one redirect was followed.
    pub fn redirected(&self) -> bool {
        self.redirected
    }

    /// Every `Set-Cookie` value of this response, unmerged.
    pub fn set_cookies(&self) -> impl Iterator<Item = &str> {
        self.headers
            .get_all(http::header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
    }

    pub fn bytes(&self) -> &Bytes {
        &self.body
    }

    /// Body decoded as UTF-8.
    pub fn text(&self) -> Result<String, NetError> {
        String::from_utf8(self.body.to_vec())
            .map_err(|e| NetError::transport(format!("response body is not UTF-8: {}", e)))
    }

    /// Body decoded as JSON.
    #[cfg(feature = "json")]
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, NetError> {
        serde_json::from_slice(&self.body)
            .map_err(|e| NetError::transport(format!("response body is not JSON: {}", e)))
    }
}
