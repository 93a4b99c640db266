// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 监控目标
///
/// 一个被观察的竞争对手店铺。`id` 由目标注册表单调递增分配，
/// 同时用于派生该目标快照的存储键。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub id: i64,
    pub url: String,
}
