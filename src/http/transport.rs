//! The outbound transport consumed by the request layer.
//!
//! This crate never opens sockets. A [`Transport`] performs exactly one HTTP
//! exchange and must not follow redirects itself, so that cookies are attached and
//! harvested on every hop.

use crate::base::neterror::NetError;
use bytes::Bytes;
use futures::FutureExt;
use http::{HeaderMap, Method, StatusCode};
use std::{future::Future, pin::Pin, sync::Arc};
use url::Url;

/// A single request handed to the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
}

/// The raw response of a single exchange.
///
/// `headers` must keep repeated `Set-Cookie` fields as separate entries.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Alias for the `Future` type returned by a transport.
pub type Performing<'a> =
    Pin<Box<dyn Future<Output = Result<TransportResponse, NetError>> + Send + 'a>>;

/// Trait for performing one HTTP exchange.
///
/// # Design Notes
///
/// - Uses `&self` so one transport can serve many requests.
/// - Returns boxed futures for trait object compatibility.
pub trait Transport: Send + Sync {
    fn perform(&self, request: TransportRequest) -> Performing<'_>;
}

/// Blanket implementation for Arc-wrapped transports.
impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn perform(&self, request: TransportRequest) -> Performing<'_> {
        (**self).perform(request)
    }
}

/// A [`Transport`] backed by an async closure. See [`transport_fn`].
#[derive(Clone)]
pub struct TransportFn<F> {
    f: F,
}

/// Wrap an async closure as a [`Transport`].
pub fn transport_fn<F, Fut>(f: F) -> TransportFn<F>
where
    F: Fn(TransportRequest) -> Fut + Send + Sync,
    Fut: Future<Output = Result<TransportResponse, NetError>> + Send + 'static,
{
    TransportFn { f }
}

impl<F, Fut> Transport for TransportFn<F>
where
    F: Fn(TransportRequest) -> Fut + Send + Sync,
    Fut: Future<Output = Result<TransportResponse, NetError>> + Send + 'static,
{
    fn perform(&self, request: TransportRequest) -> Performing<'_> {
        (self.f)(request).boxed()
    }
}
