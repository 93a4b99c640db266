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

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// 引擎错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 超时
    #[error("Timeout")]
    Timeout,
}

impl EngineError {
    /// 判断错误是否由超时引起
    pub fn is_timeout(&self) -> bool {
        match self {
            EngineError::RequestFailed(e) => e.is_timeout(),
            EngineError::Timeout => true,
        }
    }
}

/// 抓取请求
#[derive(Debug, Clone)]
pub struct ScrapeRequest {
    /// 目标URL
    pub url: String,
    /// User-Agent
    pub user_agent: String,
    /// 超时时间
    pub timeout: Duration,
}

impl ScrapeRequest {
    pub fn new(url: impl Into<String>, user_agent: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            user_agent: user_agent.into(),
            timeout,
        }
    }
}

/// 抓取响应
#[derive(Debug, Clone)]
pub struct ScrapeResponse {
    /// HTTP状态码
    pub status_code: u16,
    /// 响应内容
    pub content: String,
    /// 响应时间（毫秒）
    pub response_time_ms: u64,
}

impl ScrapeResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// 抓取引擎特质
#[async_trait]
pub trait ScraperEngine: Send + Sync {
    /// 执行抓取
    ///
    /// 非 2xx 状态码不视为错误，由调用方根据 `status_code` 决定如何处理。
    async fn scrape(&self, request: &ScrapeRequest) -> Result<ScrapeResponse, EngineError>;

    /// 引擎名称
    fn name(&self) -> &'static str;
}
