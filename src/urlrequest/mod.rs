//! Request entry point: cookie-aware fetch with redirect handling.

pub mod job;
pub mod options;

pub use job::URLRequestJob;
pub use options::{FetchOptions, RedirectMode, DEFAULT_FOLLOW};

use crate::base::neterror::NetError;
use crate::cookies::jar::CookieJar;
use crate::http::response::HttpResponse;
use crate::http::transport::Transport;
use url::Url;

/// Fetch `url` through `transport`, sending cookies from every readable jar and
/// storing `Set-Cookie` values into every writable jar on each hop.
///
/// `options` is only read. Redirects are followed by this function, never by the
/// transport.
pub async fn fetch(
    jars: &mut [CookieJar],
    url: &str,
    options: &FetchOptions,
    transport: &dyn Transport,
) -> Result<HttpResponse, NetError> {
    let url = Url::parse(url).map_err(|_| NetError::invalid_url(url))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(NetError::DisallowedUrlScheme {
            url: url.to_string(),
        });
    }

    let mut job = URLRequestJob::new(url, options);
    job.start(transport, jars).await
}
