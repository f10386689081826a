//! # fetchjar
//!
//! Client-side HTTP cookie handling for Rust.
//!
//! `fetchjar` parses `Set-Cookie` values, keeps them in domain-indexed jars,
//! selects the cookies a request URL should carry, and persists jars to disk.
//! A thin request layer drives any [`Transport`](http::Transport) across
//! redirects, attaching and harvesting cookies on every hop.
//!
//! ## Features
//!
//! - **Cookie Parsing**: `Expires`, `Max-Age`, `Domain`, `Path`, `Secure`, `HttpOnly`,
//!   `SameSite` and the `__Secure-`/`__Host-` prefixes
//! - **Cookie Jars**: replace-by-name storage, request selection, expiry sweeps
//! - **Persistence**: JSON files with an explicit `load`/`save`
//! - **Redirects**: follow, manual and error modes with a hop limit
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fetchjar::cookies::CookieJar;
//! use fetchjar::urlrequest::{fetch, FetchOptions};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut jars = vec![CookieJar::new()];
//!     let response = fetch(&mut jars, "https://example.com", &FetchOptions::new(), &my_transport)
//!         .await
//!         .unwrap();
//!     println!("Status: {}", response.status());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error definitions
//! - [`cookies`] - Cookie parsing, matching, storage and persistence
//! - [`http`] - Transport seam and single-exchange cookie handling
//! - [`urlrequest`] - `fetch` entry point and redirect handling

pub mod base;
pub mod cookies;
pub mod http;
pub mod urlrequest;

pub use base::neterror::NetError;
pub use cookies::{CanonicalCookie, CookieJar};
pub use urlrequest::{fetch, FetchOptions, RedirectMode};
