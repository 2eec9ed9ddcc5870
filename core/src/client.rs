//! Request executor for the DNS management API.
//!
//! # Design
//! `DnsClient` owns a `ClientConfig` and a `Transport`, and nothing else: no
//! state is carried between calls. `execute` turns a path + query into one
//! GET and folds every way that can go wrong into an `ApiError`, so callers
//! always get an `ApiResult` back and never a panic. Endpoint modules under
//! `api` only assemble queries and hand them to `execute`.

use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::log_sanitizer::{redact_token, truncate_for_log};
use crate::query::Query;
use crate::transport::UreqTransport;

/// Value sent in the `User-Agent` header of every request.
pub const CLIENT_IDENTIFIER: &str = "DNS-Android";

/// Parsed response document, or the reason there is none.
pub type ApiResult = Result<Value, ApiError>;

/// Statuses whose body is parsed as the call's result.
///
/// The API reports application errors inside 2xx-adjacent codes and sends a
/// parseable JSON body with 403, so both are accepted.
pub fn is_accepted_status(status: u16) -> bool {
    matches!(status, 200..=220 | 403)
}

#[derive(Debug, Clone)]
pub struct DnsClient<T = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl DnsClient<UreqTransport> {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }
}

impl<T: Transport> DnsClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ClientConfig {
        &mut self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Start a query for `/api/<endpoint>/` carrying this client's token.
    pub fn query(&self, endpoint: &str) -> Query {
        Query::new(endpoint, self.config.token())
    }

    /// Build the GET request for a path + query without sending it.
    pub fn build_request<'a>(
        &self,
        path_and_query: impl Into<Option<&'a str>>,
    ) -> Result<HttpRequest, ApiError> {
        let path = match path_and_query.into() {
            Some(path) if !path.is_empty() => path,
            _ => return Err(ApiError::EmptyRequest),
        };
        Ok(HttpRequest {
            url: format!("{}://{}{path}", self.config.scheme(), self.config.host()),
            headers: vec![("User-Agent".to_string(), CLIENT_IDENTIFIER.to_string())],
            timeout: self.config.timeout(),
        })
    }

    /// Send one GET for `path_and_query` and parse the answer.
    pub fn execute<'a>(&self, path_and_query: impl Into<Option<&'a str>>) -> ApiResult {
        let request = self.build_request(path_and_query).inspect_err(|e| {
            log::error!("Refusing to send request: {e}");
        })?;
        self.send(&request)
    }

    /// Like [`execute`](Self::execute), but failures come back as the
    /// `{error, breadcrumb, stackTrace?}` document instead of an `Err`.
    pub fn execute_document<'a>(&self, path_and_query: impl Into<Option<&'a str>>) -> Value {
        match self.build_request(path_and_query) {
            Ok(request) => {
                let breadcrumb = redact_token(&request.url);
                into_document(self.send(&request), &breadcrumb)
            }
            Err(e) => into_document(Err(e), ""),
        }
    }

    pub(crate) fn run(&self, query: &Query) -> ApiResult {
        self.execute(query.as_str())
    }

    fn send(&self, request: &HttpRequest) -> ApiResult {
        let logged_url = redact_token(&request.url);
        log::debug!("GET {logged_url}");

        let response = self.transport.send(request).map_err(|e| {
            log::error!("Transport failure for {logged_url}: {e}");
            ApiError::from(e)
        })?;
        log::debug!("Request to {logged_url} completed");

        classify_response(response)
    }
}

/// Apply the status policy to a transport result and parse the body.
pub fn classify_response(response: Option<HttpResponse>) -> ApiResult {
    let Some(mut response) = response else {
        log::error!("Transport returned no response");
        return Err(ApiError::NullResponse);
    };
    let status = response.status;
    log::debug!("Response Status: {status}");

    if !is_accepted_status(status) {
        // Drained for diagnostics only; the result does not depend on it.
        match response.read_body() {
            Ok(body) => log::warn!(
                "Status '{status}' was not valid, body: {}",
                truncate_for_log(&body)
            ),
            Err(e) => log::warn!("Status '{status}' was not valid, body unreadable: {e}"),
        }
        return Err(ApiError::Status(status));
    }

    let body = response.read_body().map_err(|e| {
        log::error!("Failed to read response body: {e}");
        ApiError::body_read(&e)
    })?;
    log::debug!("Response Body: {}", truncate_for_log(&body));

    let document: Value = serde_json::from_str(&body).map_err(|e| {
        log::error!("JSON parse failed: {e}");
        log::error!("Raw response: {}", truncate_for_log(&body));
        ApiError::body_parse(&e)
    })?;
    if !document.is_object() {
        log::error!("Response is not a JSON object: {}", truncate_for_log(&body));
        return Err(ApiError::not_an_object());
    }
    Ok(document)
}

/// Flatten a result into one JSON document: the success document unchanged,
/// or the error envelope.
pub fn into_document(result: ApiResult, breadcrumb: &str) -> Value {
    match result {
        Ok(document) => document,
        Err(e) => serde_json::to_value(e.to_envelope(breadcrumb)).unwrap_or_else(|_| {
            serde_json::json!({ "error": e.to_string(), "breadcrumb": breadcrumb })
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Read};

    use serde_json::json;

    use super::*;
    use crate::error::TransportError;
    use crate::test_support::{client_with, MockTransport, Reply};

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset by peer"))
        }
    }

    #[test]
    fn builds_https_url_from_host_and_path() {
        let client = DnsClient::with_transport(
            ClientConfig::new("api.example.com", true, "abc"),
            MockTransport::default(),
        );
        let req = client
            .build_request("/api/getDomains/?AUTH_TOKEN=abc&search_term=")
            .unwrap();
        assert_eq!(
            req.url,
            "https://api.example.com/api/getDomains/?AUTH_TOKEN=abc&search_term="
        );
        assert_eq!(
            req.headers,
            vec![("User-Agent".to_string(), "DNS-Android".to_string())]
        );
    }

    #[test]
    fn builds_http_url_without_tls() {
        let client = DnsClient::with_transport(
            ClientConfig::new("sandbox.dns.com", false, "abc"),
            MockTransport::default(),
        );
        let req = client.build_request("/api/getDomains/?AUTH_TOKEN=abc").unwrap();
        assert_eq!(req.url, "http://sandbox.dns.com/api/getDomains/?AUTH_TOKEN=abc");
    }

    #[test]
    fn timeout_is_forwarded() {
        let mut client = client_with(Reply::json(200, "{}"));
        client
            .config_mut()
            .set_timeout(Some(std::time::Duration::from_secs(3)));
        client.execute("/api/getDomains/?AUTH_TOKEN=t").unwrap();
        let sent = client.transport().last_request().unwrap();
        assert_eq!(sent.timeout, Some(std::time::Duration::from_secs(3)));
    }

    #[test]
    fn empty_or_missing_request_never_reaches_transport() {
        let client = client_with(Reply::json(200, "{}"));
        assert_eq!(client.execute(None).unwrap_err(), ApiError::EmptyRequest);
        assert_eq!(client.execute("").unwrap_err(), ApiError::EmptyRequest);
        assert!(client.transport().requests().is_empty());
    }

    #[test]
    fn accepted_statuses_return_document() {
        for status in [200, 201, 204, 210, 220, 403] {
            let client = client_with(Reply::json(status, r#"{"meta":{"success":1},"data":[]}"#));
            let doc = client.execute("/api/getDomains/?AUTH_TOKEN=t").unwrap();
            assert_eq!(doc, json!({"meta":{"success":1},"data":[]}), "status {status}");
        }
    }

    #[test]
    fn forbidden_body_is_parsed() {
        let client = client_with(Reply::json(
            403,
            r#"{"meta":{"success":0,"error":"Invalid AUTH_TOKEN"}}"#,
        ));
        let doc = client.execute("/api/getDomains/?AUTH_TOKEN=t").unwrap();
        assert_eq!(doc["meta"]["error"], "Invalid AUTH_TOKEN");
    }

    #[test]
    fn statuses_outside_window_are_errors_regardless_of_body() {
        for status in [100, 199, 221, 301, 400, 401, 404, 500, 503] {
            let client = client_with(Reply::json(status, r#"{"meta":{"success":1}}"#));
            let err = client.execute("/api/getDomains/?AUTH_TOKEN=t").unwrap_err();
            assert_eq!(err.to_string(), format!("response has code '{status}'."));
        }
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let client = client_with(Reply::json(200, "<html>maintenance</html>"));
        let err = client.execute("/api/getDomains/?AUTH_TOKEN=t").unwrap_err();
        assert!(matches!(err, ApiError::BodyParse { .. }));
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn non_object_documents_are_parse_errors() {
        for body in ["null", "[1,2]", "42", r#""text""#, "true"] {
            let client = client_with(Reply::json(200, body));
            let err = client.execute("/api/getDomains/?AUTH_TOKEN=t").unwrap_err();
            assert_eq!(err.kind(), "body_parse", "body {body}");

            let doc = client.execute_document("/api/getDomains/?AUTH_TOKEN=t");
            assert_eq!(doc["error"], "response body is not a JSON object", "body {body}");
        }
    }

    #[test]
    fn stray_invalid_byte_still_parses() {
        let client = client_with(Reply::Response {
            status: 200,
            body: Box::new(|| -> Box<dyn Read> {
                let mut body = br#"{"meta":{"success":1},"data":"M"#.to_vec();
                body.push(0xff);
                body.extend_from_slice(br#"nchen"}"#);
                Box::new(io::Cursor::new(body))
            }),
        });
        let doc = client.execute("/api/getCityList/?AUTH_TOKEN=t").unwrap();
        assert_eq!(doc["data"], "M\u{fffd}nchen");
    }

    #[test]
    fn unreadable_body_is_a_read_error() {
        let client = client_with(Reply::Response {
            status: 200,
            body: Box::new(|| Box::new(FailingReader)),
        });
        let err = client.execute("/api/getDomains/?AUTH_TOKEN=t").unwrap_err();
        assert!(matches!(err, ApiError::BodyRead { .. }));
        assert_eq!(err.to_string(), "connection reset by peer");
    }

    #[test]
    fn unreadable_body_on_rejected_status_still_reports_status() {
        let client = client_with(Reply::Response {
            status: 500,
            body: Box::new(|| Box::new(FailingReader)),
        });
        let err = client.execute("/api/getDomains/?AUTH_TOKEN=t").unwrap_err();
        assert_eq!(err, ApiError::Status(500));
    }

    #[test]
    fn transport_failure_keeps_message() {
        let client = client_with(Reply::Fail(TransportError::new("Connection refused")));
        let err = client.execute("/api/getDomains/?AUTH_TOKEN=t").unwrap_err();
        assert_eq!(err.kind(), "transport");
        assert_eq!(err.to_string(), "Connection refused");
    }

    #[test]
    fn missing_response_is_null_response() {
        let client = client_with(Reply::Nothing);
        let err = client.execute("/api/getDomains/?AUTH_TOKEN=t").unwrap_err();
        assert_eq!(err, ApiError::NullResponse);
    }

    #[test]
    fn execute_document_wraps_errors_with_redacted_breadcrumb() {
        let client = client_with(Reply::json(404, ""));
        let doc = client.execute_document("/api/nope/?AUTH_TOKEN=secret");
        assert_eq!(doc["error"], "response has code '404'.");
        assert_eq!(doc["breadcrumb"], "https://api.example.com/api/nope/?AUTH_TOKEN=***");
        assert!(doc.get("stackTrace").is_none());
    }

    #[test]
    fn execute_document_for_empty_request() {
        let client = client_with(Reply::json(200, "{}"));
        let doc = client.execute_document(None);
        assert_eq!(doc, json!({"error": "the request string is null", "breadcrumb": ""}));
    }

    #[test]
    fn execute_document_passes_success_through() {
        let client = client_with(Reply::json(200, r#"{"meta":{"success":1}}"#));
        let doc = client.execute_document("/api/getDomains/?AUTH_TOKEN=t");
        assert_eq!(doc, json!({"meta":{"success":1}}));
    }

    #[test]
    fn repeated_reads_return_identical_documents() {
        let client = client_with(Reply::json(200, r#"{"data":[{"name":"example.com"}]}"#));
        let first = client.execute("/api/getDomains/?AUTH_TOKEN=t").unwrap();
        let second = client.execute("/api/getDomains/?AUTH_TOKEN=t").unwrap();
        assert_eq!(first, second);
        assert_eq!(client.transport().requests().len(), 2);
    }
}
