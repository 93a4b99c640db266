// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库实现模块
///
/// 基于存储后端的 JSON 仓库实现
pub mod json_codec;
pub mod snapshot_repo_impl;
pub mod target_repo_impl;
