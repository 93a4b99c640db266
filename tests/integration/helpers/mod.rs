// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use rivalwatch::application::use_cases::scan_use_case::ScanUseCase;
use rivalwatch::config::settings::Settings;
use rivalwatch::domain::repositories::target_repository::TargetRepository;
use rivalwatch::domain::services::catalog_service::CatalogService;
use rivalwatch::domain::services::llm_service::LLMService;
use rivalwatch::domain::services::narrator_service::NarratorService;
use rivalwatch::engines::reqwest_engine::ReqwestEngine;
use rivalwatch::infrastructure::repositories::snapshot_repo_impl::SnapshotRepositoryImpl;
use rivalwatch::infrastructure::repositories::target_repo_impl::JsonTargetRepository;
use rivalwatch::infrastructure::storage::LocalStorage;
use rivalwatch::presentation::routes;
use rivalwatch::utils::target_lock::TargetLocks;
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::{Mutex, RwLock};
use tower::ServiceExt;

pub const LLM_REPLY: &str = "### Competitor update\n- New arrivals\n- Price moves";

/// 渲染一个商品目录页面
pub fn catalog_page(products: &[(&str, &str)]) -> String {
    let cells: String = products
        .iter()
        .map(|(title, price)| {
            format!(
                r##"<li><article class="product_pod"><h3><a href="#" title="{}">{}</a></h3><div class="product_price"><p class="price_color">{}</p></div></article></li>"##,
                title, title, price
            )
        })
        .collect();
    format!("<html><body><ol class=\"row\">{}</ol></body></html>", cells)
}

/// 可在测试过程中修改内容的店铺页面
#[derive(Clone)]
pub struct Storefront {
    pub base_url: String,
    page: Arc<RwLock<String>>,
}

impl Storefront {
    pub async fn start(initial: String) -> Self {
        let page = Arc::new(RwLock::new(initial));
        let app = Router::new()
            .route(
                "/catalogue",
                get(|State(page): State<Arc<RwLock<String>>>| async move {
                    (
                        [("content-type", "text/html; charset=utf-8")],
                        page.read().await.clone(),
                    )
                }),
            )
            .route(
                "/down",
                get(|| async { StatusCode::SERVICE_UNAVAILABLE.into_response() }),
            )
            .with_state(page.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            page,
        }
    }

    pub async fn set_page(&self, html: String) {
        *self.page.write().await = html;
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// 记录请求并返回固定回复的 chat completions 服务
#[derive(Clone, Default)]
pub struct LlmStub {
    pub requests: Arc<Mutex<Vec<Value>>>,
}

impl LlmStub {
    pub async fn start(status: StatusCode) -> (String, Self) {
        let stub = LlmStub::default();
        let recorded = stub.clone();
        let app = Router::new().route(
            "/v1/chat/completions",
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let recorded = recorded.clone();
                async move {
                    let authorized = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        == Some("Bearer test-key");
                    recorded.requests.lock().await.push(body);
                    if !authorized {
                        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "bad key"})));
                    }
                    if status != StatusCode::OK {
                        return (status, Json(json!({"error": "quota exceeded"})));
                    }
                    (
                        StatusCode::OK,
                        Json(json!({
                            "choices": [{ "message": { "role": "assistant", "content": LLM_REPLY } }],
                            "usage": { "prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15 }
                        })),
                    )
                }
            }),
        );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}/v1", addr), stub)
    }
}

pub fn llm_service(base_url: &str, api_key: Option<&str>) -> LLMService {
    LLMService::new(
        api_key.map(str::to_string),
        "test-model".to_string(),
        base_url.to_string(),
        Duration::from_secs(5),
    )
    .unwrap()
}

pub struct TestApp {
    pub router: axum::Router,
    pub targets: Arc<dyn TargetRepository>,
}

/// 组装与 main 相同的依赖图，存储目录由调用方提供
pub fn create_test_app(storage_dir: &Path, llm_base_url: &str) -> TestApp {
    let mut settings = Settings::defaults().unwrap();
    settings.scan.event_delay_ms = 0;
    settings.scan.fetch_timeout_secs = 5;
    settings.storage.local_path = storage_dir.display().to_string();

    let storage = Arc::new(LocalStorage::new(storage_dir));
    let snapshots = Arc::new(SnapshotRepositoryImpl::new(storage.clone()));
    let targets: Arc<dyn TargetRepository> = Arc::new(JsonTargetRepository::new(storage));

    let narrator = Arc::new(NarratorService::new(Arc::new(llm_service(
        llm_base_url,
        Some("test-key"),
    ))));
    let extractor = Arc::new(CatalogService::new(
        Arc::new(ReqwestEngine::new().unwrap()),
        settings.scan.user_agent.clone(),
        settings.scan.fetch_timeout(),
    ));
    let scanner = Arc::new(ScanUseCase::new(
        snapshots,
        extractor,
        narrator,
        TargetLocks::new(),
    ));

    TestApp {
        router: routes::app(targets.clone(), scanner, Arc::new(settings)),
        targets,
    }
}

impl TestApp {
    pub async fn request(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        self.request(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    /// 拉取完整的扫描事件流，返回每个 `data:` 帧的内容
    pub async fn scan_frames(&self, id: i64) -> Vec<String> {
        let (status, body) = self.get(&format!("/api/stream-scan/{}", id)).await;
        assert_eq!(status, StatusCode::OK);
        sse_data_frames(&body)
    }
}

pub fn sse_data_frames(body: &str) -> Vec<String> {
    body.split("\n\n")
        .filter_map(|frame| frame.strip_prefix("data: "))
        .map(str::to_string)
        .collect()
}
