// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// 键为空或会逃逸出存储目录
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
    #[error("Unsupported storage type: {0}")]
    UnsupportedBackend(String),
}

/// 以键访问的数据块存储
///
/// 快照（`datastore_{id}.json`）和目标注册表（`competitors.json`）都是
/// 其中的一个数据块。写入总是整块替换，读取缺失的键返回 `None`。
#[async_trait]
pub trait StorageRepository: Send + Sync {
    async fn save(&self, key: &str, data: &[u8]) -> Result<(), StorageError>;

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;
}
