// End-to-end tests for probe, metrics and config endpoints.

use std::time::Duration;

use crate::tests::support::{
    activity_url, assert_equal, assert_ok, client, into_json, DirectoryServer, CHESS_CLUB,
};

/// Probe reports alive once the serve loop runs, and the app agrees.
#[tokio::test]
async fn test_liveness_probe_reports_alive() {
    let server = DirectoryServer::start().await;
    let url = format!("{}/k8s/probe", server.base());

    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    let mut status = 0;
    while tokio::time::Instant::now() < deadline {
        status = assert_ok(client().get(&url).send().await).status().as_u16();
        if status == 200 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    assert_equal(200, status);
    assert!(server.app().is_alive());

    let body: serde_json::Value = assert_ok(
        assert_ok(client().get(&url).send().await).json().await,
    );
    assert_eq!(body["message"], "I'm fine :D");
}

#[tokio::test]
async fn test_metrics_endpoint_responds() {
    let server = DirectoryServer::start().await;

    let resp = assert_ok(
        client()
            .get(format!("{}/metrics", server.base()))
            .send()
            .await,
    );
    assert_equal(200, resp.status().as_u16());
    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/plain"), "got {}", content_type);
}

#[tokio::test]
async fn test_config_endpoint_shows_running_config() {
    let server = DirectoryServer::start().await;

    let resp = assert_ok(
        client()
            .get(format!("{}/directory/config", server.base()))
            .send()
            .await,
    );
    assert_equal(200, resp.status().as_u16());
    let body: serde_json::Value = assert_ok(resp.json().await);
    assert_eq!(body["directory"]["env"], "test");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let server = DirectoryServer::start().await;

    let resp = assert_ok(
        client()
            .get(format!("{}/nowhere", server.base()))
            .send()
            .await,
    );
    let (status, body) = into_json(resp).await;
    assert_equal(404, status);
    assert_eq!(body["detail"], "Not Found");
}

#[tokio::test]
async fn test_wrong_method_is_not_allowed() {
    let server = DirectoryServer::start().await;

    let resp = assert_ok(
        client()
            .get(activity_url(server.base(), CHESS_CLUB, "signup"))
            .query(&[("email", "method@mergington.edu")])
            .send()
            .await,
    );
    let (status, body) = into_json(resp).await;
    assert_equal(405, status);
    assert_eq!(body["detail"], "Method Not Allowed");
}

/// Stopping cancels the serve loop within the shutdown timeout.
#[tokio::test]
async fn test_server_stops_gracefully() {
    let server = DirectoryServer::start().await;
    let base = server.base().to_string();

    server.stop().await;

    let result = client().get(format!("{}/activities", base)).send().await;
    assert!(result.is_err(), "server should no longer accept requests");
}
