//! Tests for the TransmissionClient.

use serde_json::{Value, json};
use transmission_rpc_types::{RpcError, TorrentId, TorrentRpc, TorrentStatus};

use super::TransmissionClient;
use crate::config::ClientConfig;
use crate::rpc::{AddOptions, RequestArguments, TorrentSource};
use crate::testutil::{
    http_response, make_test_stats, make_test_torrent, mock_single_call, request_json,
    success_response, test_config,
};
use crate::transport::MockHttpTransport;

/// A transport that checks the `arguments` of one POST and answers with `response`.
fn expect_arguments(
    method: &'static str,
    arguments: Value,
    response: crate::transport::HttpResponse,
) -> MockHttpTransport {
    let mut mock = MockHttpTransport::new();
    mock.expect_send()
        .withf(move |request| {
            let body = request_json(request);
            body["method"] == method && body["arguments"] == arguments
        })
        .times(1)
        .return_once(move |_| Ok(response));
    mock
}

#[tokio::test]
async fn test_list_torrents_success() {
    let mock = mock_single_call(
        "torrent-get",
        success_response(json!({"torrents": [
            make_test_torrent(1, "torrent1", "hash1"),
            make_test_torrent(2, "torrent2", "hash2"),
        ]})),
    );

    let client = TransmissionClient::with_transport(mock, test_config());
    let result = client.list().await;

    assert!(result.is_ok());
    let torrents = result.unwrap();
    assert_eq!(torrents.len(), 2);
    assert_eq!(torrents[0].id, 1);
    assert_eq!(torrents[0].name, "torrent1");
    assert_eq!(torrents[1].id, 2);
    assert_eq!(torrents[1].hash_string, "hash2");
    assert_eq!(torrents[1].status(), TorrentStatus::Downloading);
}

#[tokio::test]
async fn test_list_torrents_empty() {
    let mock = mock_single_call("torrent-get", success_response(json!({"torrents": []})));

    let client = TransmissionClient::with_transport(mock, test_config());
    let result = client.list().await;

    assert!(result.is_ok());
    assert!(result.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_requests_summary_fields() {
    let mut mock = MockHttpTransport::new();
    mock.expect_send()
        .withf(|request| {
            let fields = request_json(request)["arguments"]["fields"].clone();
            fields.as_array().is_some_and(|f| {
                f.contains(&json!("id")) && f.contains(&json!("hashString")) && f.len() == 15
            })
        })
        .times(1)
        .return_once(|_| Ok(success_response(json!({"torrents": []}))));

    let client = TransmissionClient::with_transport(mock, test_config());
    client.list().await.unwrap();
}

#[tokio::test]
async fn test_get_torrent_success() {
    let mut mock = MockHttpTransport::new();
    mock.expect_send()
        .withf(|request| request_json(request)["arguments"]["ids"] == json!([1]))
        .times(1)
        .return_once(|_| {
            Ok(success_response(
                json!({"torrents": [make_test_torrent(1, "torrent1", "hash1")]}),
            ))
        });

    let client = TransmissionClient::with_transport(mock, test_config());
    let torrent = client.get(TorrentId::Id(1)).await.unwrap();

    assert_eq!(torrent.id, 1);
    assert_eq!(torrent.download_dir, "/downloads");
    assert_eq!(torrent.files.len(), 1);
    assert_eq!(torrent.files[0].bytes_completed, 500);
}

#[tokio::test]
async fn test_get_torrent_not_found() {
    let mock = mock_single_call("torrent-get", success_response(json!({"torrents": []})));

    let client = TransmissionClient::with_transport(mock, test_config());
    let result = client.get(TorrentId::Id(999)).await;

    match result.unwrap_err() {
        RpcError::NotFound(msg) => {
            assert!(msg.contains("No torrent found for ID 999"));
        }
        other => panic!("Expected NotFound error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_start_torrent_success() {
    let mock = expect_arguments(
        "torrent-start",
        json!({"ids": [7]}),
        http_response(200, None, r#"{"result":"success"}"#),
    );

    let client = TransmissionClient::with_transport(mock, test_config());
    let result = client.start(vec![TorrentId::Id(7)]).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_stop_torrent_by_hash() {
    let mock = expect_arguments(
        "torrent-stop",
        json!({"ids": ["abc123"]}),
        http_response(200, None, r#"{"result":"success","arguments":{}}"#),
    );

    let client = TransmissionClient::with_transport(mock, test_config());
    let result = client.stop(vec!["abc123".into()]).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_verify_torrent_success() {
    let mock = expect_arguments(
        "torrent-verify",
        json!({"ids": [3, "hash3"]}),
        http_response(200, None, r#"{"result":"success"}"#),
    );

    let client = TransmissionClient::with_transport(mock, test_config());
    let result = client
        .verify(vec![TorrentId::Id(3), TorrentId::Hash("hash3".into())])
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_actions_without_ids_send_nothing() {
    let mut mock = MockHttpTransport::new();
    mock.expect_send().never();

    let client = TransmissionClient::with_transport(mock, test_config());

    assert!(client.start(vec![]).await.is_ok());
    assert!(client.stop(vec![]).await.is_ok());
    assert!(client.verify(vec![]).await.is_ok());
    assert!(client.remove(vec![], true).await.is_ok());
}

#[tokio::test]
async fn test_stop_torrent_method_error() {
    let mock = mock_single_call(
        "torrent-stop",
        http_response(200, None, r#"{"result":"Failed to stop"}"#),
    );

    let client = TransmissionClient::with_transport(mock, test_config());
    let result = client.stop(vec!["abc123".into()]).await;

    match result.unwrap_err() {
        RpcError::Method { method, result } => {
            assert_eq!(method, "torrent-stop");
            assert_eq!(result, "Failed to stop");
        }
        other => panic!("Expected Method error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_remove_torrent_with_local_data() {
    let mock = expect_arguments(
        "torrent-remove",
        json!({"ids": ["hash1"], "delete-local-data": true}),
        http_response(200, None, r#"{"result":"success"}"#),
    );

    let client = TransmissionClient::with_transport(mock, test_config());
    let result = client.remove(vec!["hash1".into()], true).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_remove_torrent_without_delete() {
    let mock = expect_arguments(
        "torrent-remove",
        json!({"ids": ["hash1"]}),
        http_response(200, None, r#"{"result":"success"}"#),
    );

    let client = TransmissionClient::with_transport(mock, test_config());
    let result = client.remove(vec!["hash1".into()], false).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_add_magnet_success() {
    let config = ClientConfig {
        download_dir: Some("/tmp".into()),
        paused: true,
        ..test_config()
    };
    let mock = expect_arguments(
        "torrent-add",
        json!({"filename": "magnet:?xt=urn:btih:abc123", "download-dir": "/tmp", "paused": true}),
        success_response(
            json!({"torrent-added": {"id": 1, "name": "test_torrent", "hashString": "abc123"}}),
        ),
    );

    let client = TransmissionClient::with_transport(mock, config);
    let torrent = client
        .add_magnet("magnet:?xt=urn:btih:abc123")
        .await
        .unwrap();

    assert_eq!(torrent.id, 1);
    assert_eq!(torrent.name, "test_torrent");
    assert_eq!(torrent.hash_string, "abc123");
}

#[tokio::test]
async fn test_add_duplicate_is_an_error() {
    let mock = mock_single_call(
        "torrent-add",
        success_response(
            json!({"torrent-duplicate": {"id": 4, "name": "existing", "hashString": "beef"}}),
        ),
    );

    let client = TransmissionClient::with_transport(mock, test_config());
    let result = client.add_magnet("magnet:?xt=urn:btih:beef").await;

    match result.unwrap_err() {
        RpcError::Duplicate {
            id,
            name,
            hash_string,
        } => {
            assert_eq!(id, 4);
            assert_eq!(name, "existing");
            assert_eq!(hash_string, "beef");
        }
        other => panic!("Expected Duplicate error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_add_unrecognized_reply() {
    let mock = mock_single_call("torrent-add", success_response(json!({})));

    let client = TransmissionClient::with_transport(mock, test_config());
    let result = client.add_magnet("magnet:?xt=urn:btih:beef").await;

    assert!(matches!(result.unwrap_err(), RpcError::Serialization(_)));
}

#[tokio::test]
async fn test_add_file_uploads_metainfo() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.torrent");
    std::fs::write(&path, b"d4:infod4:name4:testee").unwrap();

    let mock = expect_arguments(
        "torrent-add",
        json!({"metainfo": "ZDQ6aW5mb2Q0Om5hbWU0OnRlc3RlZQ=="}),
        success_response(json!({"torrent-added": {"id": 2, "name": "test", "hashString": "cafe"}})),
    );

    let client = TransmissionClient::with_transport(mock, test_config());
    let torrent = client.add_file(path.to_str().unwrap()).await.unwrap();

    assert_eq!(torrent.id, 2);
}

#[tokio::test]
async fn test_add_file_missing() {
    let mut mock = MockHttpTransport::new();
    mock.expect_send().never();

    let client = TransmissionClient::with_transport(mock, test_config());
    let result = client.add_file("/nonexistent/path/to/fake.torrent").await;

    match result.unwrap_err() {
        RpcError::FileSystem(msg) => assert!(msg.contains("fake.torrent")),
        other => panic!("Expected FileSystem error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_add_with_options_overrides_defaults() {
    let config = ClientConfig {
        download_dir: Some("/ignored".into()),
        ..test_config()
    };
    let mock = expect_arguments(
        "torrent-add",
        json!({
            "metainfo": "AAEC",
            "peer-limit": 10,
            "bandwidth-priority": 1,
            "files-unwanted": [2],
            "priority-high": [0],
        }),
        success_response(json!({"torrent-added": {"id": 9, "name": "raw", "hashString": "f00d"}})),
    );

    let client = TransmissionClient::with_transport(mock, config);
    let options = AddOptions {
        peer_limit: Some(10),
        bandwidth_priority: Some(1),
        files_unwanted: vec![2],
        priority_high: vec![0],
        ..Default::default()
    };
    let torrent = client
        .add_with(TorrentSource::Metainfo(vec![0, 1, 2]), options)
        .await
        .unwrap();

    assert_eq!(torrent.hash_string, "f00d");
}

#[tokio::test]
async fn test_stats_success() {
    let mock = mock_single_call("session-stats", success_response(make_test_stats()));

    let client = TransmissionClient::with_transport(mock, test_config());
    let result = client.stats().await;

    assert!(result.is_ok());
    let stats = result.unwrap();
    assert_eq!(stats.active_torrent_count, 1);
    assert_eq!(stats.download_speed, 1000);
    assert_eq!(stats.upload_speed, 500);
    assert_eq!(stats.torrent_count, 1);
    assert_eq!(stats.cumulative_stats.downloaded_bytes, 1000);
    assert_eq!(stats.current_stats.downloaded_bytes, 100);
}

#[tokio::test]
async fn test_stats_unauthorized() {
    let mock = mock_single_call("session-stats", http_response(401, None, "Unauthorized"));

    let client = TransmissionClient::with_transport(mock, test_config());
    let result = client.stats().await;

    assert!(matches!(
        result.unwrap_err(),
        RpcError::Transport { status: 401 }
    ));
}

#[tokio::test]
async fn test_stats_malformed_body() {
    let mock = mock_single_call("session-stats", http_response(200, None, "<html>"));

    let client = TransmissionClient::with_transport(mock, test_config());
    let result = client.stats().await;

    assert!(matches!(result.unwrap_err(), RpcError::Serialization(_)));
}

#[tokio::test]
async fn test_session_info_success() {
    let mock = mock_single_call(
        "session-get",
        success_response(json!({
            "version": "4.0.5",
            "rpc-version": 17,
            "download-dir": "/downloads",
        })),
    );

    let client = TransmissionClient::with_transport(mock, test_config());
    let info = client.session().await.unwrap();

    assert_eq!(info.version, "4.0.5");
    assert_eq!(info.rpc_version, 17);
    assert_eq!(info.download_dir, "/downloads");
}

#[tokio::test]
async fn test_free_space_sends_path() {
    let mock = expect_arguments(
        "free-space",
        json!({"path": "/downloads"}),
        success_response(json!({"path": "/downloads", "size-bytes": 123456789})),
    );

    let client = TransmissionClient::with_transport(mock, test_config());
    let space = client.free_space("/downloads").await.unwrap();

    assert_eq!(space.path, "/downloads");
    assert_eq!(space.size_bytes, 123456789);
}

#[tokio::test]
async fn test_call_method_for_unwrapped_methods() {
    let mock = mock_single_call(
        "port-test",
        success_response(json!({"port-is-open": true})),
    );

    let client = TransmissionClient::with_transport(mock, test_config());
    let result: Value = client
        .call_method("port-test", RequestArguments::default())
        .await
        .unwrap();

    assert_eq!(result, json!({"port-is-open": true}));
}

#[tokio::test]
async fn test_requests_carry_basic_auth() {
    let config = ClientConfig {
        credentials: Some(crate::config::Credentials::new("user", "pass")),
        ..test_config()
    };
    let mut mock = MockHttpTransport::new();
    mock.expect_send()
        .withf(|request| {
            request
                .credentials
                .as_ref()
                .is_some_and(|c| c.username == "user" && c.password == "pass")
        })
        .times(1)
        .return_once(|_| Ok(success_response(json!({"torrents": []}))));

    let client = TransmissionClient::with_transport(mock, config);
    client.list().await.unwrap();
}
