use crate::base::neterror::NetError;
use crate::cookies::jar::CookieJar;
use crate::http::response::HttpResponse;
use crate::http::transaction;
use crate::http::transport::{Transport, TransportRequest, TransportResponse};
use crate::urlrequest::options::{FetchOptions, RedirectMode};
use bytes::Bytes;
use http::header::{AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, LOCATION};
use http::{HeaderMap, Method, StatusCode};
use url::Url;

/// Drives a request across redirects, attaching and harvesting cookies per hop.
pub struct URLRequestJob {
    url: Url,
    method: Method,
    headers: HeaderMap,
    body: Option<Bytes>,
    redirect: RedirectMode,
    redirect_limit: usize,
    redirects_followed: usize,
}

impl URLRequestJob {
    /// Copies everything it needs out of `options`.
    pub fn new(url: Url, options: &FetchOptions) -> Self {
        Self {
            url,
            method: options.method.clone(),
            headers: options.headers.clone(),
            body: options.body.clone(),
            redirect: options.redirect,
            redirect_limit: options.follow,
            redirects_followed: 0,
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub async fn start(
        &mut self,
        transport: &dyn Transport,
        jars: &mut [CookieJar],
    ) -> Result<HttpResponse, NetError> {
        loop {
            let request = TransportRequest {
                method: self.method.clone(),
                url: self.url.clone(),
                headers: self.headers.clone(),
                body: self.body.clone(),
            };
            let response = transaction::perform(transport, jars, request).await?;

            if !is_redirect(response.status) {
                return Ok(self.finish(response));
            }

            match self.redirect {
                RedirectMode::Manual => return Ok(self.finish(response)),
                RedirectMode::Error => {
                    return Err(NetError::UnexpectedRedirect {
                        url: self.url.to_string(),
                    })
                }
                RedirectMode::Follow => {}
            }

            let Some(location) = response.headers.get(LOCATION) else {
                return Ok(self.finish(response));
            };
            let location = location.to_str().map_err(|_| NetError::InvalidRedirect {
                location: String::from_utf8_lossy(location.as_bytes()).into_owned(),
            })?;
            let next = self.url.join(location).map_err(|_| NetError::InvalidRedirect {
                location: location.to_string(),
            })?;

            if self.redirects_followed >= self.redirect_limit {
                tracing::warn!(url = %self.url, limit = self.redirect_limit, "redirect limit reached");
                return Err(NetError::TooManyRedirects {
                    url: self.url.to_string(),
                });
            }
            if next.scheme() != "http" && next.scheme() != "https" {
                return Err(NetError::DisallowedUrlScheme {
                    url: next.to_string(),
                });
            }

            self.follow_redirect(response.status, next);
        }
    }

    fn follow_redirect(&mut self, status: StatusCode, next: Url) {
        // 303 turns anything but GET/HEAD into GET; 301/302 only rewrite POST.
        let to_get = match status {
            StatusCode::SEE_OTHER => self.method != Method::GET && self.method != Method::HEAD,
            StatusCode::MOVED_PERMANENTLY | StatusCode::FOUND => self.method == Method::POST,
            _ => false,
        };
        if to_get {
            self.method = Method::GET;
            self.body = None;
            self.headers.remove(CONTENT_LENGTH);
            self.headers.remove(CONTENT_TYPE);
        }

        if next.origin() != self.url.origin() {
            self.headers.remove(AUTHORIZATION);
        }

        tracing::debug!(from = %self.url, to = %next, status = %status, "following redirect");
        self.redirects_followed += 1;
        self.url = next;
    }

    fn finish(&self, response: TransportResponse) -> HttpResponse {
        HttpResponse::new(response, self.url.clone(), self.redirects_followed > 0)
    }
}

fn is_redirect(status: StatusCode) -> bool {
    matches!(status.as_u16(), 301 | 302 | 303 | 307 | 308)
}
