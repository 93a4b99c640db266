// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use crate::domain::models::target::Target;
use crate::domain::repositories::storage_repository::StorageRepository;
use crate::domain::repositories::target_repository::{RepositoryError, TargetRepository};
use crate::infrastructure::repositories::json_codec::to_pretty_json;

/// 注册表在存储后端中的键
pub const REGISTRY_KEY: &str = "competitors.json";

/// 基于 JSON 文件的目标注册表
///
/// 所有写操作都在内部互斥锁下完成读取-修改-写回。
pub struct JsonTargetRepository {
    storage: Arc<dyn StorageRepository>,
    write_lock: Mutex<()>,
}

impl JsonTargetRepository {
    pub fn new(storage: Arc<dyn StorageRepository>) -> Self {
        Self {
            storage,
            write_lock: Mutex::new(()),
        }
    }

    async fn read_all(&self) -> Result<Vec<Target>, RepositoryError> {
        match self.storage.get(REGISTRY_KEY).await? {
            Some(data) => serde_json::from_slice(&data).map_err(RepositoryError::Corrupt),
            None => Ok(Vec::new()),
        }
    }

    async fn write_all(&self, targets: &[Target]) -> Result<(), RepositoryError> {
        let data = to_pretty_json(targets).map_err(RepositoryError::Encode)?;
        self.storage.save(REGISTRY_KEY, &data).await?;
        Ok(())
    }
}

#[async_trait]
impl TargetRepository for JsonTargetRepository {
    async fn list(&self) -> Result<Vec<Target>, RepositoryError> {
        let mut targets = self.read_all().await?;
        targets.sort_by_key(|t| t.id);
        Ok(targets)
    }

    async fn find(&self, id: i64) -> Result<Option<Target>, RepositoryError> {
        Ok(self.read_all().await?.into_iter().find(|t| t.id == id))
    }

    async fn add(&self, url: &str) -> Result<Target, RepositoryError> {
        let url = validate_target_url(url)?;

        let _guard = self.write_lock.lock().await;
        let mut targets = self.read_all().await?;
        let id = targets.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let target = Target { id, url };
        targets.push(target.clone());
        self.write_all(&targets).await?;

        info!(id = target.id, url = %target.url, "Target added");
        Ok(target)
    }

    async fn remove(&self, id: i64) -> Result<(), RepositoryError> {
        let _guard = self.write_lock.lock().await;
        let mut targets = self.read_all().await?;
        let before = targets.len();
        targets.retain(|t| t.id != id);
        if targets.len() != before {
            self.write_all(&targets).await?;
            info!(id, "Target removed");
        }
        Ok(())
    }
}

/// 只接受绝对的 http/https 地址
fn validate_target_url(raw: &str) -> Result<String, RepositoryError> {
    let trimmed = raw.trim();
    let parsed = url::Url::parse(trimmed)
        .map_err(|e| RepositoryError::InvalidParameter(format!("url {:?}: {}", trimmed, e)))?;
    match parsed.scheme() {
        "http" | "https" if parsed.host_str().is_some() => Ok(trimmed.to_string()),
        scheme => Err(RepositoryError::InvalidParameter(format!(
            "url must be http or https with a host, got scheme {:?}",
            scheme
        ))),
    }
}
