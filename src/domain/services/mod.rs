// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// - 目录服务（catalog_service）：抓取店铺页面并解析商品列表
/// - 比对服务（diff_service）：比较两次快照
/// - LLM服务（llm_service）：调用外部文本生成接口
/// - 叙述服务（narrator_service）：把差异写成自然语言报告
pub mod catalog_service;
pub mod diff_service;
pub mod llm_service;
pub mod narrator_service;
