// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::models::product::ProductRecord;
use crate::engines::traits::{EngineError, ScrapeRequest, ScraperEngine};

/// 商品卡片容器
const PRODUCT_CELL_SELECTOR: &str = "article.product_pod";
/// 带 `title` 属性的标题链接
const TITLE_SELECTOR: &str = "h3 a";
/// 价格文本节点
const PRICE_SELECTOR: &str = "p.price_color";

/// 抓取错误类型
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// 请求超时
    #[error("Request timed out")]
    Timeout,
    /// 网络或客户端错误
    #[error("Fetch failed: {0}")]
    Fetch(#[source] EngineError),
    /// 非 2xx 响应
    #[error("Unexpected HTTP status {0}")]
    HttpStatus(u16),
    /// 页面解析失败
    #[error("Parse failed: {0}")]
    Parse(String),
}

impl From<EngineError> for ScrapeError {
    fn from(err: EngineError) -> Self {
        if err.is_timeout() {
            ScrapeError::Timeout
        } else {
            ScrapeError::Fetch(err)
        }
    }
}

/// 商品目录提取器特质
#[async_trait]
pub trait CatalogExtractor: Send + Sync {
    /// 抓取并解析目标页面上的商品列表
    ///
    /// 页面可以解析但没有任何商品时返回空列表，而不是错误。
    async fn extract(&self, url: &str) -> Result<Vec<ProductRecord>, ScrapeError>;
}

/// 商品目录服务
///
/// 通过一个抓取引擎获取页面，再按固定的商品卡片结构解析。
/// 不处理分页，不执行 JavaScript，也不做重试。
pub struct CatalogService {
    engine: Arc<dyn ScraperEngine>,
    user_agent: String,
    timeout: Duration,
}

impl CatalogService {
    pub fn new(engine: Arc<dyn ScraperEngine>, user_agent: String, timeout: Duration) -> Self {
        Self {
            engine,
            user_agent,
            timeout,
        }
    }

    /// 从 HTML 文本中解析商品列表
    ///
    /// 缺少标题或价格的卡片会被跳过；同名商品只保留第一次出现的条目。
    pub fn parse_catalog(html: &str) -> Result<Vec<ProductRecord>, ScrapeError> {
        let cell = parse_selector(PRODUCT_CELL_SELECTOR)?;
        let title = parse_selector(TITLE_SELECTOR)?;
        let price = parse_selector(PRICE_SELECTOR)?;

        let document = Html::parse_document(html);
        let mut seen = HashSet::new();
        let mut products = Vec::new();

        for (index, element) in document.select(&cell).enumerate() {
            let Some(product_title) = element.select(&title).next().and_then(title_of) else {
                debug!(index, "Skipping product cell without a title");
                continue;
            };
            let Some(product_price) = element.select(&price).next().map(text_of) else {
                debug!(index, title = %product_title, "Skipping product cell without a price");
                continue;
            };
            if product_price.is_empty() {
                debug!(index, title = %product_title, "Skipping product cell with empty price");
                continue;
            }

            if seen.insert(product_title.clone()) {
                products.push(ProductRecord::new(product_title, product_price));
            }
        }

        Ok(products)
    }
}

#[async_trait]
impl CatalogExtractor for CatalogService {
    async fn extract(&self, url: &str) -> Result<Vec<ProductRecord>, ScrapeError> {
        let request = ScrapeRequest::new(url, self.user_agent.clone(), self.timeout);
        let response = self.engine.scrape(&request).await?;

        if !response.is_success() {
            return Err(ScrapeError::HttpStatus(response.status_code));
        }

        let products = Self::parse_catalog(&response.content)?;
        info!(
            url,
            engine = self.engine.name(),
            count = products.len(),
            response_time_ms = response.response_time_ms,
            "Catalog extracted"
        );
        Ok(products)
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(selector)
        .map_err(|e| ScrapeError::Parse(format!("invalid selector {}: {}", selector, e)))
}

fn title_of(anchor: ElementRef<'_>) -> Option<String> {
    let title = anchor
        .value()
        .attr("title")
        .map(|t| t.trim().to_string())
        .unwrap_or_else(|| text_of(anchor));
    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
