// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use rivalwatch::application::use_cases::scan_use_case::ScanUseCase;
use rivalwatch::config::settings::Settings;
use rivalwatch::domain::repositories::target_repository::TargetRepository;
use rivalwatch::domain::services::catalog_service::CatalogService;
use rivalwatch::domain::services::llm_service::LLMService;
use rivalwatch::domain::services::narrator_service::NarratorService;
use rivalwatch::engines::reqwest_engine::ReqwestEngine;
use rivalwatch::infrastructure::repositories::snapshot_repo_impl::SnapshotRepositoryImpl;
use rivalwatch::infrastructure::repositories::target_repo_impl::JsonTargetRepository;
use rivalwatch::infrastructure::storage::create_storage_repository;
use rivalwatch::presentation::routes;
use rivalwatch::utils::target_lock::TargetLocks;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use rivalwatch::utils::telemetry;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load .env (credentials) and initialize logging
    let dotenv = dotenvy::dotenv();
    telemetry::init_telemetry();
    if let Ok(path) = dotenv {
        info!("Loaded environment from {}", path.display());
    }
    info!("Starting rivalwatch...");

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    rivalwatch::infrastructure::metrics::init_metrics(&settings.metrics);

    // 3. Storage and repositories
    let storage = create_storage_repository(&settings.storage)?;
    let snapshots = Arc::new(SnapshotRepositoryImpl::new(storage.clone()));
    let targets: Arc<dyn TargetRepository> = Arc::new(JsonTargetRepository::new(storage));
    info!(
        storage_type = %settings.storage.storage_type,
        path = %settings.storage.local_path,
        "Storage initialized"
    );

    // 4. Text generation client
    if settings.llm.api_key.is_none() {
        warn!("LLM API key not configured, reports will use fallback text");
    }
    let llm = LLMService::new(
        settings.llm.api_key.clone(),
        settings.llm.model.clone(),
        settings.llm.api_base_url.clone(),
        settings.llm.timeout(),
    )?;
    info!(model = %llm.model(), "LLM client initialized");
    let narrator = Arc::new(NarratorService::new(Arc::new(llm)));

    // 5. Scan pipeline
    let extractor = Arc::new(CatalogService::new(
        Arc::new(ReqwestEngine::new()?),
        settings.scan.user_agent.clone(),
        settings.scan.fetch_timeout(),
    ));
    let scanner = Arc::new(ScanUseCase::new(
        snapshots,
        extractor,
        narrator,
        TargetLocks::new(),
    ));

    // 6. Start HTTP server
    let app = routes::app(targets, scanner, settings.clone());

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
