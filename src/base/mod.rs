//! Base types and error handling.
//!
//! - [`NetError`](neterror::NetError): the single error type returned by every fallible
//!   operation in the crate.

pub mod neterror;
