// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// 文本生成错误类型
#[derive(Error, Debug)]
pub enum NarrationError {
    /// 未配置 API 密钥
    #[error("LLM API key not configured")]
    MissingApiKey,
    /// 网络或客户端错误
    #[error("Failed to send request to LLM API: {0}")]
    Request(#[from] reqwest::Error),
    /// 服务返回非 2xx 状态（包括配额不足）
    #[error("LLM API returned error: {status} - {body}")]
    Api { status: u16, body: String },
    /// 响应格式不符合预期
    #[error("Invalid response format from LLM API: {0}")]
    MalformedResponse(String),
}

/// 文本生成请求
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// 系统指令（角色设定）
    pub system: String,
    /// 用户提示词
    pub prompt: String,
    /// 采样温度
    pub temperature: f32,
}

/// 文本生成服务特质
///
/// 由组合根显式构造并注入，测试中可以替换为桩实现。
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, NarrationError>;
}

/// LLM服务 - 调用 OpenAI 兼容的 chat completions 接口
///
/// 模型、端点和凭据都在构造时确定，进程内共享一个 HTTP 客户端。
pub struct LLMService {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    api_base_url: String,
}

impl LLMService {
    pub fn new(
        api_key: Option<String>,
        model: String,
        api_base_url: String,
        timeout: Duration,
    ) -> Result<Self, NarrationError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for LLMService {
    /// 发送一次对话补全请求
    ///
    /// # 错误
    /// * 当API密钥未配置时返回 `MissingApiKey`
    /// * 当请求失败或超时时返回 `Request`
    /// * 当服务返回非2xx状态时返回 `Api`
    /// * 当响应中没有文本内容时返回 `MalformedResponse`
    async fn generate(&self, request: &GenerationRequest) -> Result<String, NarrationError> {
        let api_key = self.api_key.as_ref().ok_or(NarrationError::MissingApiKey)?;

        let request_body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.prompt }
            ],
            "temperature": request.temperature
        });

        let url = format!("{}/chat/completions", self.api_base_url);
        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(NarrationError::Api { status, body });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| NarrationError::MalformedResponse(e.to_string()))?;

        if let Some(usage) = body.get("usage") {
            debug!(
                model = %self.model,
                total_tokens = usage["total_tokens"].as_u64().unwrap_or(0),
                "LLM usage"
            );
        }

        match body["choices"][0]["message"]["content"].as_str() {
            Some(content) if !content.trim().is_empty() => Ok(content.trim().to_string()),
            _ => Err(NarrationError::MalformedResponse(
                "missing choices[0].message.content".to_string(),
            )),
        }
    }
}
