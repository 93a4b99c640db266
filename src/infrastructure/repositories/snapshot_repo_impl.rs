// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::domain::models::product::ProductRecord;
use crate::domain::repositories::snapshot_repository::{SnapshotRepository, StoreError};
use crate::domain::repositories::storage_repository::StorageRepository;
use crate::infrastructure::repositories::json_codec::to_pretty_json;

/// 快照仓库实现
///
/// 快照以 JSON 数组 `[{"title", "price"}]` 的形式保存在存储后端中，
/// 每个目标一个数据块。
pub struct SnapshotRepositoryImpl {
    storage: Arc<dyn StorageRepository>,
}

impl SnapshotRepositoryImpl {
    pub fn new(storage: Arc<dyn StorageRepository>) -> Self {
        Self { storage }
    }

    /// 目标对应的存储键
    pub fn key_for(target_id: i64) -> String {
        format!("datastore_{}.json", target_id)
    }
}

#[async_trait]
impl SnapshotRepository for SnapshotRepositoryImpl {
    async fn load(&self, target_id: i64) -> Result<Vec<ProductRecord>, StoreError> {
        let key = Self::key_for(target_id);
        let Some(data) = self.storage.get(&key).await? else {
            debug!(target_id, "No snapshot stored yet");
            return Ok(Vec::new());
        };

        serde_json::from_slice(&data).map_err(|source| StoreError::Corrupt { key, source })
    }

    async fn save(&self, target_id: i64, products: &[ProductRecord]) -> Result<(), StoreError> {
        let data = to_pretty_json(products).map_err(StoreError::Encode)?;
        self.storage.save(&Self::key_for(target_id), &data).await?;
        debug!(target_id, count = products.len(), "Snapshot saved");
        Ok(())
    }
}
