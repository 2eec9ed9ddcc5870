//! In-memory transport for unit tests.

use std::io::{Cursor, Read};
use std::sync::Mutex;

use crate::client::DnsClient;
use crate::config::ClientConfig;
use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse, Transport};

pub(crate) const TEST_HOST: &str = "api.example.com";
pub(crate) const TEST_TOKEN: &str = "tok";

/// What the mock answers every request with.
pub(crate) enum Reply {
    Json { status: u16, body: String },
    Response {
        status: u16,
        body: Box<dyn Fn() -> Box<dyn Read>>,
    },
    Fail(TransportError),
    Nothing,
}

impl Reply {
    pub(crate) fn json(status: u16, body: &str) -> Self {
        Self::Json {
            status,
            body: body.to_string(),
        }
    }
}

impl Default for Reply {
    fn default() -> Self {
        Self::json(200, r#"{"meta":{"success":1}}"#)
    }
}

#[derive(Default)]
pub(crate) struct MockTransport {
    reply: Reply,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub(crate) fn new(reply: Reply) -> Self {
        Self {
            reply,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl Transport for MockTransport {
    fn send(&self, request: &HttpRequest) -> Result<Option<HttpResponse>, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Reply::Json { status, body } => Ok(Some(HttpResponse::new(
                *status,
                Box::new(Cursor::new(body.clone().into_bytes())),
            ))),
            Reply::Response { status, body } => Ok(Some(HttpResponse::new(*status, body()))),
            Reply::Fail(e) => Err(e.clone()),
            Reply::Nothing => Ok(None),
        }
    }
}

pub(crate) fn client_with(reply: Reply) -> DnsClient<MockTransport> {
    DnsClient::with_transport(
        ClientConfig::new(TEST_HOST, true, TEST_TOKEN),
        MockTransport::new(reply),
    )
}

pub(crate) fn client() -> DnsClient<MockTransport> {
    client_with(Reply::default())
}

/// Path + query of the last request, without scheme and host.
pub(crate) fn last_path(client: &DnsClient<MockTransport>) -> String {
    let request = client.transport().last_request().unwrap();
    let prefix = format!("https://{TEST_HOST}");
    request.url.strip_prefix(&prefix).unwrap().to_string()
}
