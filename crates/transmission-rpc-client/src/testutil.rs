//! Shared test utilities and fixtures.

use serde_json::{Value, json};

use crate::config::ClientConfig;
use crate::transport::{HttpMethod, HttpRequest, HttpResponse, MockHttpTransport};

pub(crate) const TEST_URL: &str = "http://localhost:9091/transmission/rpc";

pub(crate) fn test_config() -> ClientConfig {
    ClientConfig {
        rpc_url: TEST_URL.to_string(),
        ..Default::default()
    }
}

pub(crate) fn http_response(status: u16, session_id: Option<&str>, body: &str) -> HttpResponse {
    HttpResponse {
        status,
        session_id: session_id.map(str::to_string),
        body: body.as_bytes().to_vec(),
    }
}

/// A `200 OK` carrying a success envelope around `arguments`.
pub(crate) fn success_response(arguments: Value) -> HttpResponse {
    let body = json!({"result": "success", "arguments": arguments}).to_string();
    http_response(200, None, &body)
}

/// The JSON body of a POST request.
pub(crate) fn request_json(request: &HttpRequest) -> Value {
    assert_eq!(request.method, HttpMethod::Post);
    let body = request.body.as_deref().expect("POST without a body");
    serde_json::from_slice(body).expect("request body is not JSON")
}

/// A transport expecting exactly one POST for `method`, answered with `response`.
pub(crate) fn mock_single_call(method: &'static str, response: HttpResponse) -> MockHttpTransport {
    let mut mock = MockHttpTransport::new();
    mock.expect_send()
        .withf(move |request| request_json(request)["method"] == method)
        .times(1)
        .return_once(move |_| Ok(response));
    mock
}

pub(crate) fn make_test_torrent(id: i64, name: &str, hash: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "hashString": hash,
        "status": 4,
        "percentDone": 0.5,
        "downloadDir": "/downloads",
        "totalSize": 1000,
        "sizeWhenDone": 1000,
        "uploadRatio": 0.0,
        "peers": [],
        "files": [{"bytesCompleted": 500, "length": 1000, "name": name}],
    })
}

pub(crate) fn make_test_stats() -> Value {
    json!({
        "activeTorrentCount": 1,
        "cumulative-stats": {
            "downloadedBytes": 1000,
            "filesAdded": 5,
            "secondsActive": 3600,
            "sessionCount": 10,
            "uploadedBytes": 500,
        },
        "current-stats": {
            "downloadedBytes": 100,
            "filesAdded": 1,
            "secondsActive": 600,
            "sessionCount": 1,
            "uploadedBytes": 50,
        },
        "downloadSpeed": 1000,
        "pausedTorrentCount": 0,
        "torrentCount": 1,
        "uploadSpeed": 500,
    })
}
