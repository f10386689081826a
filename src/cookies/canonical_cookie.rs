use crate::base::neterror::NetError;
use crate::cookies::error::CookieParseError;
use crate::cookies::matching::{domain_matches, has_case_insensitive_prefix, path_matches};
use crate::cookies::parser::{parse_expires, parse_max_age, split_cookie_line};
use crate::cookies::persistence::CookieRecord;
use time::{Duration, OffsetDateTime};
use url::Url;

/// A single cookie as received from a server.
///
/// Fields are fixed at construction; a jar replaces a cookie rather than editing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalCookie {
    name: String,
    value: String,
    domain: String,
    subdomains: bool,
    path: String,
    secure: bool,
    expiry: Option<OffsetDateTime>,
}

impl CanonicalCookie {
    /// Parse a `Set-Cookie` value received from `request_url`.
    ///
    /// Fails with an argument error if `request_url` is not an absolute URL with a
    /// host, and with [`NetError::CookieParse`] if the text is malformed.
    pub fn parse(line: &str, request_url: &str) -> Result<Self, NetError> {
        let url = Url::parse(request_url).map_err(|_| NetError::invalid_url(request_url))?;
        Self::parse_for_url(line, &url)
    }

    /// Like [`parse`](Self::parse) with an already parsed URL.
    pub fn parse_for_url(line: &str, request_url: &Url) -> Result<Self, NetError> {
        let host = request_url
            .host_str()
            .ok_or_else(|| NetError::invalid_url(request_url.as_str()))?
            .to_ascii_lowercase();
        let set_via_https = request_url.scheme() == "https";

        Ok(Self::parse_attributes(line, &host, set_via_https)?)
    }

    fn parse_attributes(
        line: &str,
        host: &str,
        set_via_https: bool,
    ) -> Result<Self, CookieParseError> {
        let ((name, value), attributes) = split_cookie_line(line)?;
        if name.is_empty() {
            return Err(CookieParseError::invalid_name(name));
        }

        let mut expires = None;
        let mut max_age = None;
        let mut domain = None;
        let mut path = None;
        let mut secure = false;

        for attr in attributes {
            match (attr.key.as_str(), attr.value) {
                // Max-Age wins over Expires in either order, so a later Expires is
                // skipped without validation.
                ("expires", Some(v)) => {
                    if max_age.is_none() {
                        expires = Some(parse_expires(v)?);
                    }
                }
                ("max-age", Some(v)) => {
                    let seconds = parse_max_age(v)?;
                    max_age = Some(OffsetDateTime::now_utc() + Duration::seconds(seconds.into()));
                }
                ("domain", Some(v)) => {
                    let v = v.strip_prefix('.').unwrap_or(v);
                    if v.is_empty() || !domain_matches(v, host, true) {
                        return Err(CookieParseError::invalid_domain(v, host));
                    }
                    domain = Some(v.to_ascii_lowercase());
                }
                ("path", Some(v)) => path = Some(v.to_string()),
                // No cross-site semantics outside a browser.
                ("samesite", Some(_)) => {}
                ("secure", None) => secure = true,
                ("httponly", None) => {}
                (key, value) => return Err(CookieParseError::invalid_key(key, value)),
            }
        }

        if has_case_insensitive_prefix(name, "__Secure-") && (!secure || !set_via_https) {
            return Err(CookieParseError::secure_prefix());
        }
        if has_case_insensitive_prefix(name, "__Host-")
            && (!secure || !set_via_https || domain.is_some() || path.as_deref() != Some("/"))
        {
            return Err(CookieParseError::host_prefix());
        }

        let subdomains = domain.is_some();
        Ok(Self {
            name: name.to_string(),
            value: value.to_string(),
            domain: domain.unwrap_or_else(|| host.to_string()),
            subdomains,
            path: path.unwrap_or_else(|| "/".to_string()),
            secure,
            expiry: max_age.or(expires),
        })
    }

    /// Rebuild a cookie from a stored record without re-validating it.
    pub fn from_record(record: CookieRecord) -> Self {
        Self {
            name: record.name,
            value: record.value,
            domain: record.domain,
            subdomains: record.subdomains,
            path: record.path,
            secure: record.secure,
            expiry: record.expiry,
        }
    }

    /// The stored form of this cookie.
    pub fn to_record(&self) -> CookieRecord {
        CookieRecord {
            name: self.name.clone(),
            value: self.value.clone(),
            domain: self.domain.clone(),
            subdomains: self.subdomains,
            path: self.path.clone(),
            secure: self.secure,
            expiry: self.expiry,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Whether the cookie also applies to hosts below [`domain`](Self::domain).
    pub fn subdomains(&self) -> bool {
        self.subdomains
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn secure(&self) -> bool {
        self.secure
    }

    /// `None` for session cookies.
    pub fn expiry(&self) -> Option<OffsetDateTime> {
        self.expiry
    }

    /// The `name=value` form used in a request `Cookie:` header.
    pub fn serialize(&self) -> String {
        format!("{}={}", self.name, self.value)
    }

    pub fn has_expired(&self, treat_session_as_expired: bool) -> bool {
        match self.expiry {
            Some(expiry) => expiry < OffsetDateTime::now_utc(),
            None => treat_session_as_expired,
        }
    }

    /// Whether this cookie should be sent with a request to `url`.
    pub fn is_valid_for_request(&self, url: &Url) -> bool {
        if self.has_expired(false) {
            return false;
        }

        let scheme = url.scheme();
        if scheme != "http" && scheme != "https" {
            return false;
        }
        if self.secure && scheme != "https" {
            return false;
        }

        let Some(host) = url.host_str() else {
            return false;
        };

        domain_matches(&self.domain, host, self.subdomains) && path_matches(&self.path, url.path())
    }
}
