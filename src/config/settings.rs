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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// 桌面浏览器 User-Agent，避免被店铺当作爬虫拦截
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// 应用程序配置设置
///
/// 包含服务器、存储、扫描、LLM 和指标等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 存储配置
    pub storage: StorageSettings,
    /// 扫描配置
    pub scan: ScanSettings,
    /// LLM 配置
    pub llm: LlmSettings,
    /// 指标配置
    pub metrics: MetricsSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 存储配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// 存储类型 (local, memory)
    pub storage_type: String,
    /// 本地存储目录，保存快照与目标注册表
    pub local_path: String,
}

/// 扫描配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ScanSettings {
    /// 抓取超时时间（秒）
    pub fetch_timeout_secs: u64,
    /// 抓取时使用的 User-Agent
    pub user_agent: String,
    /// 推送相邻两个事件之间的间隔（毫秒），0 表示不等待
    pub event_delay_ms: u64,
}

impl ScanSettings {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn event_delay(&self) -> Duration {
        Duration::from_millis(self.event_delay_ms)
    }
}

/// LLM 配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    /// API 密钥，未设置时所有报告都使用固定回退文本
    pub api_key: Option<String>,
    /// OpenAI 兼容接口的基础 URL
    pub api_base_url: String,
    /// 模型名称
    pub model: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl LlmSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// 指标配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// 是否启动 Prometheus 导出器
    pub enabled: bool,
    /// 导出器监听地址
    pub listen_addr: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次叠加内置默认值、`config/default`、`config/{APP_ENVIRONMENT}`
    /// 和 `RIVALWATCH__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("RIVALWATCH").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// 只包含内置默认值的配置
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::builder()?.build()?.try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5002)?
            .set_default("storage.storage_type", "local")?
            .set_default("storage.local_path", "./storage")?
            .set_default("scan.fetch_timeout_secs", 10)?
            .set_default("scan.user_agent", DEFAULT_USER_AGENT)?
            .set_default("scan.event_delay_ms", 1000)?
            .set_default("llm.api_base_url", "https://api.intelligence.io.solutions/api/v1")?
            .set_default("llm.model", "meta-llama/Llama-3.3-70B-Instruct")?
            .set_default("llm.timeout_secs", 60)?
            .set_default("metrics.enabled", false)?
            .set_default("metrics.listen_addr", "0.0.0.0:9000")
    }
}
