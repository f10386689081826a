use crate::cookies::error::CookieParseError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum NetError {
    // Argument Errors
    #[error("{message}")]
    InvalidArgument { message: String },
    #[error("Invalid URL \"{url}\"")]
    InvalidUrl { url: String },
    #[error("Disallowed URL scheme in \"{url}\"")]
    DisallowedUrlScheme { url: String },

    // Cookie Errors
    #[error(transparent)]
    CookieParse(#[from] CookieParseError),
    #[error("No file has been specified for this cookie jar!")]
    NoCookieFile,
    #[error("Cookie store I/O failed for \"{path}\": {message}")]
    CookieStoreIo { path: String, message: String },
    #[error("Cookie store contains invalid data: {message}")]
    CookieInvalidData { message: String },

    // HTTP Errors
    #[error("Invalid redirect location \"{location}\"")]
    InvalidRedirect { location: String },
    #[error("redirect mode is set to error: {url}")]
    UnexpectedRedirect { url: String },
    #[error("maximum redirect reached at: {url}")]
    TooManyRedirects { url: String },
    #[error("Transport failed: {message}")]
    Transport { message: String },
}

impl NetError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        NetError::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn invalid_url(url: impl Into<String>) -> Self {
        NetError::InvalidUrl { url: url.into() }
    }

    pub fn cookie_store_io(path: impl Into<String>, err: std::io::Error) -> Self {
        NetError::CookieStoreIo {
            path: path.into(),
            message: err.to_string(),
        }
    }

    pub fn cookie_invalid_data(message: impl Into<String>) -> Self {
        NetError::CookieInvalidData {
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        NetError::Transport {
            message: message.into(),
        }
    }

    /// Argument errors are caller mistakes and are never swallowed by a jar.
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            NetError::InvalidArgument { .. }
                | NetError::InvalidUrl { .. }
                | NetError::DisallowedUrlScheme { .. }
        )
    }

    pub fn is_cookie_parse(&self) -> bool {
        matches!(self, NetError::CookieParse(_))
    }

    pub fn as_cookie_parse(&self) -> Option<&CookieParseError> {
        match self {
            NetError::CookieParse(e) => Some(e),
            _ => None,
        }
    }

    /// Storage failures raised by `load`/`save`.
    pub fn is_storage_error(&self) -> bool {
        matches!(
            self,
            NetError::NoCookieFile
                | NetError::CookieStoreIo { .. }
                | NetError::CookieInvalidData { .. }
        )
    }
}
