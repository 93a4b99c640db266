// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：商品、目标、差异与扫描事件
/// - 仓库接口（repositories）：存储、快照与目标注册表的抽象接口
/// - 服务（services）：抓取解析、比对与报告生成
pub mod models;
pub mod repositories;
pub mod services;
