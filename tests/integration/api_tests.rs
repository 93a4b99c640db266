// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::create_test_app;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tempfile::TempDir;

fn post_competitor(url: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/competitors")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "url": url }).to_string()))
        .unwrap()
}

/// 测试健康检查与版本端点
#[tokio::test]
async fn test_health_and_version() {
    let dir = TempDir::new().unwrap();
    let app = create_test_app(dir.path(), "http://127.0.0.1:9/v1");

    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");

    let (status, body) = app.get("/v1/version").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, env!("CARGO_PKG_VERSION"));
}

/// 测试新增、列出和删除监控目标
///
/// 注册表持久化在 `competitors.json` 中，编号递增且不复用
#[tokio::test]
async fn test_competitor_lifecycle() {
    let dir = TempDir::new().unwrap();
    let app = create_test_app(dir.path(), "http://127.0.0.1:9/v1");

    let (status, body) = app.get("/api/competitors").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!([]));

    let (status, _) = app
        .request(post_competitor("https://books.example/catalogue"))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .request(post_competitor("https://shop.example/"))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let listed: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        listed,
        json!([
            { "id": 1, "url": "https://books.example/catalogue" },
            { "id": 2, "url": "https://shop.example/" }
        ])
    );
    assert!(dir.path().join("competitors.json").exists());

    let (status, body) = app
        .request(
            Request::builder()
                .method("DELETE")
                .uri("/api/competitors/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        serde_json::from_str::<Value>(&body).unwrap(),
        json!({ "success": true })
    );

    let (_, body) = app.request(post_competitor("https://third.example/")).await;
    let ids: Vec<i64> = serde_json::from_str::<Vec<Value>>(&body)
        .unwrap()
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![2, 3]);
    assert_eq!(app.targets.list().await.unwrap().len(), 2);
}

/// 测试非法地址被拒绝
#[tokio::test]
async fn test_add_competitor_rejects_invalid_url() {
    let dir = TempDir::new().unwrap();
    let app = create_test_app(dir.path(), "http://127.0.0.1:9/v1");

    let (status, body) = app.request(post_competitor("not a url")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("error"));

    let (status, _) = app.request(post_competitor("ftp://files.example/")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(app.targets.list().await.unwrap().is_empty());
}

/// 测试扫描不存在的目标
///
/// 返回状态事件后以 DONE 结束，而不是 HTTP 错误
#[tokio::test]
async fn test_stream_scan_unknown_target() {
    let dir = TempDir::new().unwrap();
    let app = create_test_app(dir.path(), "http://127.0.0.1:9/v1");

    let (status, body) = app.get("/api/stream-scan/99").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "data: STATUS: Competitor not found.\n\ndata: DONE\n\n");
}

/// 测试注册表损坏时扫描流仍以 DONE 结束
#[tokio::test]
async fn test_stream_scan_with_corrupt_registry() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("competitors.json"), "{oops").unwrap();
    let app = create_test_app(dir.path(), "http://127.0.0.1:9/v1");

    let (status, body) = app.get("/api/stream-scan/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        "data: STATUS: Competitor list unreadable, aborting.\n\ndata: DONE\n\n"
    );
    assert!(body.ends_with("data: DONE\n\n"));
}
