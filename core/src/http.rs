//! HTTP transport types and the transport seam.
//!
//! # Design
//! `HttpRequest` is plain data built by the client; a `Transport` turns it
//! into an `HttpResponse` whose body is still an unread stream. Reading the
//! body is left to the executor so that read failures are classified the same
//! way whichever transport produced the response. Tests swap in an in-memory
//! transport; production code uses [`UreqTransport`](crate::transport::UreqTransport).

use std::fmt;
use std::io::{Cursor, Read};
use std::time::Duration;

use crate::error::TransportError;

/// A GET request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// Overall deadline for the exchange, if one is configured.
    pub timeout: Option<Duration>,
}

/// A response whose body has not been read yet.
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Box<dyn Read>,
}

impl HttpResponse {
    pub fn new(status: u16, body: Box<dyn Read>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body,
        }
    }

    /// Response with an in-memory body.
    pub fn from_text(status: u16, body: impl Into<String>) -> Self {
        Self::new(status, Box::new(Cursor::new(body.into().into_bytes())))
    }

    /// Read the whole body as text. Invalid UTF-8 sequences become U+FFFD;
    /// only I/O failures are errors.
    pub fn read_body(&mut self) -> std::io::Result<String> {
        let mut bytes = Vec::new();
        self.body.read_to_end(&mut bytes)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// Executes one HTTP GET.
///
/// `Ok(None)` means the exchange finished without a response object; the
/// executor reports it as a distinct failure.
pub trait Transport {
    fn send(&self, request: &HttpRequest) -> Result<Option<HttpResponse>, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &HttpRequest) -> Result<Option<HttpResponse>, TransportError> {
        (**self).send(request)
    }
}
