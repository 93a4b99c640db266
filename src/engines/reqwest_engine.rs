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

use crate::engines::traits::{EngineError, ScrapeRequest, ScrapeResponse, ScraperEngine};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use std::time::Instant;
use tracing::debug;

/// 抓取引擎
///
/// 基于reqwest实现的基本HTTP抓取引擎，不执行JavaScript。
/// 所有请求共享一个连接池，User-Agent 和超时按请求设置。
#[derive(Clone)]
pub struct ReqwestEngine {
    client: reqwest::Client,
}

impl ReqwestEngine {
    pub fn new() -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ScraperEngine for ReqwestEngine {
    /// 执行HTTP GET抓取
    ///
    /// # 参数
    ///
    /// * `request` - 抓取请求
    ///
    /// # 返回值
    ///
    /// * `Ok(ScrapeResponse)` - 抓取响应（包括非2xx响应）
    /// * `Err(EngineError)` - 网络或超时错误
    async fn scrape(&self, request: &ScrapeRequest) -> Result<ScrapeResponse, EngineError> {
        let mut headers = HeaderMap::new();
        if let Ok(agent) = HeaderValue::from_str(&request.user_agent) {
            headers.insert(USER_AGENT, agent);
        }

        let start = Instant::now();
        let response = self
            .client
            .get(&request.url)
            .headers(headers)
            .timeout(request.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EngineError::Timeout
                } else {
                    EngineError::RequestFailed(e)
                }
            })?;

        let status_code = response.status().as_u16();
        // reqwest decodes using the declared charset, falling back to UTF-8
        let content = response.text().await?;
        let response_time_ms = start.elapsed().as_millis() as u64;

        debug!(
            url = %request.url,
            status_code,
            response_time_ms,
            "Fetched page"
        );

        Ok(ScrapeResponse {
            status_code,
            content,
            response_time_ms,
        })
    }

    /// 获取引擎名称
    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
