// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// - 指标（metrics）：Prometheus 导出器
/// - 仓库实现（repositories）：快照仓库与目标注册表的具体实现
/// - 存储（storage）：本地文件与内存存储
pub mod metrics;
pub mod repositories;
pub mod storage;
