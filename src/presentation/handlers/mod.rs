// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// HTTP请求处理器模块
///
/// 目标注册表的增删查，以及扫描进度的流式推送
pub mod competitor_handler;
pub mod scan_handler;
