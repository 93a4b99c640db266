// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::models::product::ProductRecord;
use crate::domain::repositories::storage_repository::StorageError;

/// 快照存储错误类型
#[derive(Error, Debug)]
pub enum StoreError {
    /// 底层存储不可读或不可写
    #[error("Snapshot storage error: {0}")]
    Storage(#[from] StorageError),
    /// 快照存在但内容无法解析
    #[error("Snapshot {key} is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    /// 快照序列化失败
    #[error("Failed to encode snapshot: {0}")]
    Encode(#[source] serde_json::Error),
}

/// 快照仓库特质
///
/// 每个目标保存一份最近一次成功扫描得到的完整商品列表。
#[async_trait]
pub trait SnapshotRepository: Send + Sync {
    /// 读取目标的快照
    ///
    /// 快照不存在时返回空列表；存在但损坏时返回 `StoreError::Corrupt`。
    async fn load(&self, target_id: i64) -> Result<Vec<ProductRecord>, StoreError>;

    /// 用新的商品列表整体替换目标的快照
    async fn save(&self, target_id: i64, products: &[ProductRecord]) -> Result<(), StoreError>;
}
