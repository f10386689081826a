//! Cookie parse error type.
//!
//! Raised when `Set-Cookie` text violates the attribute grammar or one of the
//! security-prefix rules. It is kept apart from argument errors so a jar can route
//! it to its ignore-callback instead of failing the caller.

use thiserror::Error;

/// A malformed cookie string. The message names the offending part verbatim.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct CookieParseError {
    message: String,
}

impl CookieParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn invalid_name(name: &str) -> Self {
        Self::new(format!("Invalid cookie name \"{}\"!", name))
    }

    pub(crate) fn invalid_pair(pair: &str) -> Self {
        Self::new(format!("Invalid cookie pair \"{}\"!", pair))
    }

    pub(crate) fn invalid_encoding(line: &str) -> Self {
        Self::new(format!("Invalid cookie encoding \"{}\"!", line))
    }

    pub(crate) fn invalid_expires(value: &str) -> Self {
        Self::new(format!("Invalid value for Expires \"{}\"!", value))
    }

    pub(crate) fn invalid_max_age(value: &str) -> Self {
        Self::new(format!("Invalid value for Max-Age \"{}\"!", value))
    }

    pub(crate) fn invalid_domain(domain: &str, host: &str) -> Self {
        Self::new(format!(
            "Invalid value for Domain \"{}\": cookie was received from \"{}\"!",
            domain, host
        ))
    }

    pub(crate) fn invalid_key(key: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => Self::new(format!(
                "Invalid key \"{}\" with value \"{}\" specified!",
                key, v
            )),
            None => Self::new(format!("Invalid key \"{}\" specified!", key)),
        }
    }

    pub(crate) fn secure_prefix() -> Self {
        Self::new(
            "Cookie has \"__Secure-\" prefix but \"Secure\" isn't set or the cookie is not set via https!",
        )
    }

    pub(crate) fn host_prefix() -> Self {
        Self::new(
            "Cookie has \"__Host-\" prefix but \"Secure\" isn't set, the cookie is not set via https, \"Domain\" is set or \"Path\" is not equal to \"/\"!",
        )
    }
}
