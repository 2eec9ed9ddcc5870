//! Verify request building and response classification against the JSON
//! vectors stored in `test-vectors/`.
//!
//! Documents are compared as parsed JSON, never as raw strings.

use std::sync::Mutex;

use dnsapi_core::api::records;
use dnsapi_core::{
    classify_response, into_document, ClientConfig, DnsClient, HttpRequest, HttpResponse,
    RecordOptions, RecordSpec, RecordTarget, Transport, TransportError,
};

const HOST: &str = "api.test";

/// Records every request and answers with an empty success envelope.
#[derive(Default)]
struct Recorder {
    urls: Mutex<Vec<String>>,
}

impl Transport for Recorder {
    fn send(&self, request: &HttpRequest) -> Result<Option<HttpResponse>, TransportError> {
        self.urls.lock().unwrap().push(request.url.clone());
        Ok(Some(HttpResponse::from_text(200, r#"{"meta":{"success":1}}"#)))
    }
}

fn client() -> DnsClient<Recorder> {
    DnsClient::with_transport(ClientConfig::new(HOST, false, "tok"), Recorder::default())
}

// ---------------------------------------------------------------------------
// Status classification
// ---------------------------------------------------------------------------

#[test]
fn status_test_vectors() {
    let raw = include_str!("../../test-vectors/status.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let status = case["status"].as_u64().unwrap() as u16;
        let body = case["body"].as_str().unwrap();

        let result = classify_response(Some(HttpResponse::from_text(status, body)));
        match case.get("expected_kind") {
            None => {
                let doc = result.unwrap_or_else(|e| panic!("{name}: unexpected error {e}"));
                assert_eq!(doc, case["expected_document"], "{name}: document");
            }
            Some(kind) => {
                let err = result.expect_err(name);
                assert_eq!(err.kind(), kind.as_str().unwrap(), "{name}: kind");
                if let Some(message) = case.get("expected_error") {
                    assert_eq!(err.to_string(), message.as_str().unwrap(), "{name}: message");
                }
                let doc = into_document(Err(err), "crumb");
                assert_eq!(doc["breadcrumb"], "crumb", "{name}: breadcrumb");
                assert!(doc["error"].is_string(), "{name}: error field");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Record creation
// ---------------------------------------------------------------------------

#[test]
fn record_test_vectors() {
    let raw = include_str!("../../test-vectors/records.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let target: RecordTarget = serde_json::from_value(case["target"].clone()).unwrap();
        let spec: RecordSpec = serde_json::from_value(case["spec"].clone()).unwrap();
        let options: RecordOptions = serde_json::from_value(case["options"].clone()).unwrap();
        let host = case["host"].as_str().unwrap();

        let c = client();
        records::create_record(&c, &target, host, &spec, &options).unwrap();

        let urls = c.transport().urls.lock().unwrap();
        assert_eq!(urls.len(), 1, "{name}: request count");
        assert_eq!(
            urls[0],
            format!("http://{HOST}{}", case["expected_path"].as_str().unwrap()),
            "{name}: path"
        );
    }
}
