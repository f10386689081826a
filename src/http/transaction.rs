//! A single request/response exchange with cookie handling on both sides.

use crate::base::neterror::NetError;
use crate::cookies::error::CookieParseError;
use crate::cookies::jar::{CookieInput, CookieJar};
use crate::http::transport::{Transport, TransportRequest, TransportResponse};
use http::header::{COOKIE, SET_COOKIE};
use http::{HeaderMap, HeaderValue};
use std::collections::HashSet;
use url::Url;

/// Build the `Cookie:` header value for `url` from every readable jar.
///
/// A name already contributed by an earlier jar is skipped. Returns `None` when no
/// cookie applies.
pub fn cookie_header_value(jars: &[CookieJar], url: &Url) -> Option<String> {
    let mut seen = HashSet::new();
    let pairs: Vec<String> = jars
        .iter()
        .filter(|jar| jar.flags().readable())
        .flat_map(|jar| jar.cookies_valid_for_request(url))
        .filter(|c| seen.insert(c.name()))
        .map(|c| c.serialize())
        .collect();

    if pairs.is_empty() {
        None
    } else {
        Some(pairs.join("; "))
    }
}

/// Feed every `Set-Cookie` field of a response from `url` into the writable jars.
///
/// Returns how many cookies were stored across all jars. A parse error stops the
/// exchange unless the receiving jar has a parse error callback.
pub fn store_response_cookies(
    jars: &mut [CookieJar],
    headers: &HeaderMap,
    url: &Url,
) -> Result<usize, NetError> {
    let mut stored = 0;
    for value in headers.get_all(SET_COOKIE) {
        let line = match std::str::from_utf8(value.as_bytes()) {
            Ok(line) => line,
            Err(_) => {
                let line = String::from_utf8_lossy(value.as_bytes());
                for jar in jars.iter().filter(|jar| jar.flags().writable()) {
                    jar.reject(&line, CookieParseError::invalid_encoding(&line))?;
                }
                continue;
            }
        };

        for jar in jars.iter_mut().filter(|jar| jar.flags().writable()) {
            if jar.add_cookie(CookieInput::raw(line, url))? {
                stored += 1;
            }
        }
    }
    Ok(stored)
}

/// Perform one exchange: attach cookies, send, harvest `Set-Cookie`.
///
/// The request is consumed, so a cookie header set here never leaks into the
/// next hop.
pub async fn perform(
    transport: &dyn Transport,
    jars: &mut [CookieJar],
    mut request: TransportRequest,
) -> Result<TransportResponse, NetError> {
    if let Some(cookies) = cookie_header_value(jars, &request.url) {
        let value = HeaderValue::from_bytes(cookies.as_bytes())
            .map_err(|_| NetError::invalid_argument(format!("Invalid cookie header \"{}\"", cookies)))?;
        request.headers.insert(COOKIE, value);
    }

    let url = request.url.clone();
    tracing::debug!(method = %request.method, url = %url, "sending request");
    let response = transport.perform(request).await?;

    let stored = store_response_cookies(jars, &response.headers, &url)?;
    tracing::debug!(status = %response.status, url = %url, stored, "received response");
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookies::canonical_cookie::CanonicalCookie;
    use crate::http::transport::transport_fn;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn jar(flags: &str, lines: &[&str], url: &str) -> CookieJar {
        CookieJar::builder()
            .flags(flags)
            .cookies(
                lines
                    .iter()
                    .map(|l| CanonicalCookie::parse(l, url).unwrap()),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_header_value_dedupes_across_jars() {
        let url = Url::parse("https://example.com/").unwrap();
        let jars = vec![
            jar("r", &["a=1", "b=2"], "https://example.com"),
            jar("rw", &["a=9", "c=3"], "https://example.com"),
            jar("w", &["d=4"], "https://example.com"),
        ];

        let header = cookie_header_value(&jars, &url).unwrap();
        let mut pairs: Vec<&str> = header.split("; ").collect();
        pairs.sort();
        assert_eq!(pairs, vec!["a=1", "b=2", "c=3"]);
    }

    #[test]
    fn test_header_value_none_when_nothing_matches() {
        let url = Url::parse("https://other.org/").unwrap();
        let jars = vec![jar("rw", &["a=1"], "https://example.com")];
        assert_eq!(cookie_header_value(&jars, &url), None);
    }

    #[test]
    fn test_store_only_into_writable_jars() {
        let url = Url::parse("https://example.com/").unwrap();
        let mut jars = vec![
            jar("r", &[], "https://example.com"),
            jar("w", &[], "https://example.com"),
        ];
        let mut headers = HeaderMap::new();
        headers.append(SET_COOKIE, HeaderValue::from_static("a=1; Path=/"));
        headers.append(SET_COOKIE, HeaderValue::from_static("b=2"));

        let stored = store_response_cookies(&mut jars, &headers, &url).unwrap();
        assert_eq!(stored, 2);
        assert!(jars[0].is_empty());
        assert_eq!(jars[1].len(), 2);
    }

    #[test]
    fn test_store_accepts_utf8_values() {
        let url = Url::parse("https://example.com/").unwrap();
        let mut jars = vec![CookieJar::new()];
        let mut headers = HeaderMap::new();
        headers.append(
            SET_COOKIE,
            HeaderValue::from_bytes("name=café".as_bytes()).unwrap(),
        );

        let stored = store_response_cookies(&mut jars, &headers, &url).unwrap();
        assert_eq!(stored, 1);
        assert_eq!(jars[0].get("example.com", "name").unwrap().value(), "café");
    }

    #[test]
    fn test_store_invalid_utf8_is_parse_error() {
        let url = Url::parse("https://example.com/").unwrap();
        let mut headers = HeaderMap::new();
        headers.append(SET_COOKIE, HeaderValue::from_bytes(b"a=\xff\xfe").unwrap());

        let mut jars = vec![CookieJar::new()];
        let err = store_response_cookies(&mut jars, &headers, &url).unwrap_err();
        assert!(err.is_cookie_parse());

        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let mut jars = vec![CookieJar::builder()
            .on_parse_error(move |_, _| {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .build()
            .unwrap()];
        assert_eq!(store_response_cookies(&mut jars, &headers, &url).unwrap(), 0);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(jars[0].is_empty());
    }

    #[tokio::test]
    async fn test_perform_sends_utf8_cookie_header() {
        let url = Url::parse("https://example.com/").unwrap();
        let mut jars = vec![jar("rw", &["name=café"], "https://example.com")];
        let seen = Arc::new(std::sync::Mutex::new(None));
        let sink = seen.clone();
        let transport = transport_fn(move |req: TransportRequest| {
            *sink.lock().unwrap() = req.headers.get(COOKIE).cloned();
            async {
                Ok::<_, NetError>(TransportResponse {
                    status: http::StatusCode::OK,
                    headers: HeaderMap::new(),
                    body: bytes::Bytes::new(),
                })
            }
        });
        let request = TransportRequest {
            method: http::Method::GET,
            url,
            headers: HeaderMap::new(),
            body: None,
        };

        perform(&transport, &mut jars, request).await.unwrap();

        let header = seen.lock().unwrap().clone().unwrap();
        assert_eq!(header.as_bytes(), "name=café".as_bytes());
    }

    #[test]
    fn test_store_propagates_parse_error_without_callback() {
        let url = Url::parse("https://example.com/").unwrap();
        let mut jars = vec![CookieJar::new()];
        let mut headers = HeaderMap::new();
        headers.append(SET_COOKIE, HeaderValue::from_static("a=1; Bogus"));

        let err = store_response_cookies(&mut jars, &headers, &url).unwrap_err();
        assert!(err.is_cookie_parse());
    }
}
