// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 该模块定义了领域层的仓库接口，具体实现由基础设施层提供。
///
/// - 快照仓库（snapshot_repository）：每个目标最近一次成功扫描的商品列表
/// - 存储仓库（storage_repository）：按键存取的数据块
/// - 目标仓库（target_repository）：被监控的竞争对手列表
pub mod snapshot_repository;
pub mod storage_repository;
pub mod target_repository;
