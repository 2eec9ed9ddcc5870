//! Blocking transport backed by `ureq`.

use ureq::Agent;

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse, Transport};

/// Sends requests through a `ureq` agent.
///
/// Status codes are never turned into errors here: 4xx/5xx answers come back
/// as ordinary responses so the executor can apply its own acceptance window.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<Option<HttpResponse>, TransportError> {
        let mut builder = self.agent.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(timeout) = request.timeout {
            builder = builder.config().timeout_global(Some(timeout)).build();
        }

        let response = builder
            .call()
            .map_err(|e| TransportError::from_error(&e))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        let body = response.into_body().into_reader();

        Ok(Some(HttpResponse {
            status,
            headers,
            body: Box::new(body),
        }))
    }
}
