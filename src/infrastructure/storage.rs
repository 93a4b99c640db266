// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

use crate::config::settings::StorageSettings;
use crate::domain::repositories::storage_repository::{StorageError, StorageRepository};

/// 本地文件系统存储实现
///
/// 每个键对应 `base_path` 下的一个文件。写入先落到同目录的临时文件，
/// 再原子地重命名覆盖目标文件。
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn get_full_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(key);
        let escapes = relative.components().any(|c| {
            !matches!(c, std::path::Component::Normal(_))
        });
        if key.is_empty() || escapes {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.base_path.join(relative))
    }
}

#[async_trait]
impl StorageRepository for LocalStorage {
    async fn save(&self, key: &str, data: &[u8]) -> Result<(), StorageError> {
        let full_path = self.get_full_path(key)?;

        // 确保目录存在
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut tmp_name = full_path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        let mut file = fs::File::create(&tmp_path).await?;
        file.write_all(data).await?;
        file.sync_all().await?;
        drop(file);

        if let Err(e) = fs::rename(&tmp_path, &full_path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(StorageError::Io(e));
        }

        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let full_path = self.get_full_path(key)?;

        match fs::read(&full_path).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e)),
        }
    }
}

/// 存储工厂函数
pub fn create_storage_repository(
    settings: &StorageSettings,
) -> Result<Arc<dyn StorageRepository>, StorageError> {
    match settings.storage_type.as_str() {
        "local" => Ok(Arc::new(LocalStorage::new(settings.local_path.clone()))),
        "memory" => Ok(Arc::new(InMemoryStorage::new())),
        other => Err(StorageError::UnsupportedBackend(other.to_string())),
    }
}

/// 内存存储实现（用于测试和临时运行）
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    data: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageRepository for InMemoryStorage {
    async fn save(&self, key: &str, data: &[u8]) -> Result<(), StorageError> {
        let mut map = self.data.write().await;
        map.insert(key.to_string(), data.to_vec());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let map = self.data.read().await;
        Ok(map.get(key).cloned())
    }
}
