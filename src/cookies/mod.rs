//! Client-side cookie handling.
//!
//! This module provides:
//!
//! - **Parsing**: `Set-Cookie` values into [`CanonicalCookie`](canonical_cookie::CanonicalCookie)
//! - **Matching**: domain, path and secure checks against a request URL
//! - **Storage**: an in-memory jar keyed by domain and name ([`CookieJar`](jar::CookieJar))
//! - **Persistence**: load/save of a jar to a JSON file
//!
//! # Layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`parser`] | Splitting a cookie line, `Expires` and `Max-Age` values |
//! | [`canonical_cookie`] | Single cookie representation and validation |
//! | [`matching`] | Domain and path matching rules |
//! | [`jar`] | Cookie storage, selection and expiry |
//! | [`flags`] | Jar read/write permissions |
//! | [`persistence`] | On-disk record format |
//!
//! # Example
//!
//! ```rust
//! use fetchjar::cookies::jar::CookieJar;
//! use url::Url;
//!
//! let url = Url::parse("https://example.com/account").unwrap();
//! let mut jar = CookieJar::new();
//! jar.add_cookie(fetchjar::cookies::jar::CookieInput::raw("sid=abc; Path=/; Secure", &url))
//!     .unwrap();
//!
//! let names: Vec<&str> = jar.cookies_valid_for_request(&url).map(|c| c.name()).collect();
//! assert_eq!(names, vec!["sid"]);
//! ```

pub mod canonical_cookie;
pub mod error;
pub mod flags;
pub mod jar;
pub mod matching;
pub mod parser;
pub mod persistence;

pub use canonical_cookie::CanonicalCookie;
pub use error::CookieParseError;
pub use flags::JarFlags;
pub use jar::{CookieInput, CookieJar, CookieJarBuilder};
pub use persistence::CookieRecord;
