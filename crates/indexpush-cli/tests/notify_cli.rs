#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Notification commands against mock discovery endpoints

mod common;

use common::{KEY, indexpush_with_config, write_catalog, write_config};
use predicates::prelude::*;
use serde_json::Value;
use tempfile::tempdir;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_engine(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("POST"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_document_hook_reports_json() {
    let dir = tempdir().expect("temp dir");
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/primary"))
        .and(body_partial_json(serde_json::json!({
            "host": "example.org",
            "urlList": ["https://example.org/mevzuat/123"],
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    mount_engine(&server, "/secondary", 503).await;

    let config = write_config(
        &dir,
        &[
            ("primary", format!("{}/primary", server.uri())),
            ("secondary", format!("{}/secondary", server.uri())),
        ],
    );

    let output = indexpush_with_config(&config)
        .args(["document", "123", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: Value = serde_json::from_slice(&output).expect("valid JSON");
    assert_eq!(json["succeeded"], true);
    assert_eq!(json["message"], "notified 1/2 engines");
    assert_eq!(json["submittedUrls"][0], "https://example.org/mevzuat/123");
    assert_eq!(json["results"][1]["status"], 503);
}

#[tokio::test]
async fn test_wrong_key_exits_with_auth_code() {
    let dir = tempdir().expect("temp dir");
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let config = write_config(&dir, &[("primary", server.uri())]);

    indexpush_with_config(&config)
        .args(["notify", "https://example.org/mevzuat/1", "--key", "wrong-key-1"])
        .args(["--format", "json"])
        .assert()
        .code(3)
        .stdout(predicate::str::contains("authentication"));
}

#[tokio::test]
async fn test_foreign_urls_exit_with_validation_code() {
    let dir = tempdir().expect("temp dir");
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let config = write_config(&dir, &[("primary", server.uri())]);

    indexpush_with_config(&config)
        .args(["notify", "https://evil.com/mevzuat/1", "https://example.org/about"])
        .args(["--format", "text"])
        .assert()
        .code(4)
        .stdout(predicate::str::contains("no valid URLs"))
        .stderr(predicate::str::contains("Error:"));
}

#[tokio::test]
async fn test_all_engines_failing_exits_with_network_code() {
    let dir = tempdir().expect("temp dir");
    let server = MockServer::start().await;
    mount_engine(&server, "/primary", 500).await;
    let config = write_config(
        &dir,
        &[
            ("primary", format!("{}/primary", server.uri())),
            ("offline", "http://127.0.0.1:9/indexnow".to_string()),
        ],
    );

    indexpush_with_config(&config)
        .args(["institution", "adalet", "--key", KEY, "--format", "json"])
        .assert()
        .code(5)
        .stdout(predicate::str::contains("\"outcome\": \"rejected\""));
}

#[tokio::test]
async fn test_bulk_reads_file_and_dedupes() {
    let dir = tempdir().expect("temp dir");
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/primary"))
        .and(body_partial_json(serde_json::json!({
            "urlList": [
                "https://example.org/mevzuat/1",
                "https://example.org/kurum/adalet",
            ],
        })))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;
    let config = write_config(&dir, &[("primary", format!("{}/primary", server.uri()))]);

    let list = dir.path().join("urls.txt");
    std::fs::write(
        &list,
        "# changed today\nhttps://example.org/mevzuat/1\n\nhttps://example.org/kurum/adalet/\nhttps://example.org/mevzuat/1\n",
    )
    .unwrap();

    indexpush_with_config(&config)
        .arg("bulk")
        .arg("--file")
        .arg(&list)
        .args(["--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("notified 1/1 engines"));
}

#[tokio::test]
async fn test_bulk_reads_stdin() {
    let dir = tempdir().expect("temp dir");
    let server = MockServer::start().await;
    mount_engine(&server, "/primary", 200).await;
    let config = write_config(&dir, &[("primary", format!("{}/primary", server.uri()))]);

    indexpush_with_config(&config)
        .args(["bulk", "--format", "json"])
        .write_stdin("https://example.org/mevzuat/9\n")
        .assert()
        .success();
}

#[tokio::test]
async fn test_resubmit_catalog() {
    let dir = tempdir().expect("temp dir");
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({
            "urlList": [
                "https://example.org",
                "https://example.org/mevzuat/123",
                "https://example.org/mevzuat/456",
                "https://example.org/kurum/adalet",
            ],
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    let config = write_config(&dir, &[("primary", server.uri())]);
    let catalog = write_catalog(&dir);

    indexpush_with_config(&config)
        .arg("resubmit")
        .arg("--catalog")
        .arg(&catalog)
        .args(["--format", "json"])
        .assert()
        .success();
}
