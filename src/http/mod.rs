pub mod response;
pub mod transaction;
pub mod transport;

// Re-exports for convenience
pub use response::HttpResponse;
pub use transaction::{cookie_header_value, store_response_cookies};
pub use transport::{transport_fn, Performing, Transport, TransportFn, TransportRequest, TransportResponse};
