// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::use_cases::scan_use_case::ScanUseCase;
use crate::config::settings::Settings;
use crate::domain::repositories::target_repository::TargetRepository;
use crate::presentation::handlers::{competitor_handler, scan_handler};
use axum::{
    routing::{delete, get},
    Extension, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// 创建应用路由
///
/// # 返回值
///
/// 返回配置好的路由，依赖通过 `Extension` 注入，见 [`app`]
pub fn routes() -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version));

    let api_routes = Router::new()
        .route(
            "/api/competitors",
            get(competitor_handler::list_competitors).post(competitor_handler::add_competitor),
        )
        .route(
            "/api/competitors/{id}",
            delete(competitor_handler::delete_competitor),
        )
        .route("/api/stream-scan/{id}", get(scan_handler::stream_scan));

    Router::new().merge(public_routes).merge(api_routes)
}

/// 组装带依赖的完整应用
pub fn app(
    targets: Arc<dyn TargetRepository>,
    scanner: Arc<ScanUseCase>,
    settings: Arc<Settings>,
) -> Router {
    routes()
        .layer(Extension(targets))
        .layer(Extension(scanner))
        .layer(Extension(settings))
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
