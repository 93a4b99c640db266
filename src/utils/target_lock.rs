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

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

type LockMap = DashMap<i64, Arc<Mutex<()>>>;

/// 每目标互斥锁管理器
///
/// 为每个目标提供一把独立的异步互斥锁，保证同一目标同一时刻只有一次扫描
/// 在读写它的快照。没有持有者也没有等待者的锁会在释放时被移除。
#[derive(Clone, Debug, Default)]
pub struct TargetLocks {
    /// 存储每个目标的锁
    locks: Arc<LockMap>,
}

/// 目标锁守卫，丢弃时释放锁
#[derive(Debug)]
pub struct TargetGuard {
    target_id: i64,
    guard: Option<OwnedMutexGuard<()>>,
    locks: Arc<LockMap>,
}

impl Drop for TargetGuard {
    fn drop(&mut self) {
        self.guard.take();
        // waiters hold their own clone of the mutex, so count 1 means only the map is left
        self.locks
            .remove_if(&self.target_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}

impl TargetLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// 等待并获取指定目标的锁
    pub async fn acquire(&self, target_id: i64) -> TargetGuard {
        let guard = self.get_or_create(target_id).lock_owned().await;
        self.wrap(target_id, guard)
    }

    /// 尝试立即获取指定目标的锁，已被占用时返回 `None`
    pub fn try_acquire(&self, target_id: i64) -> Option<TargetGuard> {
        let guard = self.get_or_create(target_id).try_lock_owned().ok()?;
        Some(self.wrap(target_id, guard))
    }

    /// 当前登记的目标锁数量
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    fn wrap(&self, target_id: i64, guard: OwnedMutexGuard<()>) -> TargetGuard {
        TargetGuard {
            target_id,
            guard: Some(guard),
            locks: self.locks.clone(),
        }
    }

    /// 获取或创建指定目标的锁
    fn get_or_create(&self, target_id: i64) -> Arc<Mutex<()>> {
        self.locks
            .entry(target_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
