// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// - 商品（product）：商品记录与差异集合
/// - 扫描事件（scan_event）：扫描过程中推送给调用方的事件
/// - 目标（target）：被监控的竞争对手店铺
pub mod product;
pub mod scan_event;
pub mod target;
