// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::models::target::Target;
use crate::domain::repositories::storage_repository::StorageError;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 存储错误
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    /// 注册表内容无法解析
    #[error("Target registry is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),
    /// 注册表序列化失败
    #[error("Failed to encode target registry: {0}")]
    Encode(#[source] serde_json::Error),
    /// 无效参数
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// 监控目标仓库特质
#[async_trait]
pub trait TargetRepository: Send + Sync {
    /// 列出全部目标，按 id 升序
    async fn list(&self) -> Result<Vec<Target>, RepositoryError>;
    /// 根据ID查找目标
    async fn find(&self, id: i64) -> Result<Option<Target>, RepositoryError>;
    /// 新增目标并分配下一个 id
    async fn add(&self, url: &str) -> Result<Target, RepositoryError>;
    /// 删除目标，不存在时什么也不做
    async fn remove(&self, id: i64) -> Result<(), RepositoryError>;
}
