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

use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
};
use serde_json::{json, Value};
use std::sync::Arc;
use validator::Validate;

use crate::{
    application::dto::competitor_request::AddCompetitorDto,
    domain::{models::target::Target, repositories::target_repository::TargetRepository},
    presentation::errors::AppError,
};

/// 列出全部监控目标
pub async fn list_competitors(
    Extension(targets): Extension<Arc<dyn TargetRepository>>,
) -> Result<Json<Vec<Target>>, AppError> {
    Ok(Json(targets.list().await?))
}

/// 新增监控目标，返回更新后的完整列表
pub async fn add_competitor(
    Extension(targets): Extension<Arc<dyn TargetRepository>>,
    Json(payload): Json<AddCompetitorDto>,
) -> Result<(StatusCode, Json<Vec<Target>>), AppError> {
    payload.validate()?;
    targets.add(&payload.url).await?;
    Ok((StatusCode::CREATED, Json(targets.list().await?)))
}

/// 删除监控目标
pub async fn delete_competitor(
    Extension(targets): Extension<Arc<dyn TargetRepository>>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    targets.remove(id).await?;
    Ok(Json(json!({ "success": true })))
}
