// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::fmt::Write;
use std::sync::Arc;
use tracing::warn;

use crate::domain::models::product::ChangeSet;
use crate::domain::services::llm_service::{GenerationRequest, NarrationError, TextGenerator};

/// 所有报告共用的系统指令
pub const ANALYST_PERSONA: &str = "You are an e-commerce strategy analyst.";
/// 文本生成失败时使用的固定报告
pub const FALLBACK_REPORT: &str = "Could not generate an AI report due to an error.";
/// 变化报告的采样温度
pub const CHANGES_TEMPERATURE: f32 = 0.6;
/// 稳定报告的采样温度，略高以让策略建议更多样
pub const STABILITY_TEMPERATURE: f32 = 0.7;

/// 报告叙述服务
///
/// 把结构化的差异（或"无变化"）组织成提示词，交给文本生成服务写成报告。
pub struct NarratorService {
    generator: Arc<dyn TextGenerator>,
}

impl NarratorService {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// 为一组变化生成报告
    pub async fn summarize_changes(&self, changes: &ChangeSet) -> Result<String, NarrationError> {
        let request = GenerationRequest {
            system: ANALYST_PERSONA.to_string(),
            prompt: Self::changes_prompt(changes),
            temperature: CHANGES_TEMPERATURE,
        };
        self.generator.generate(&request).await
    }

    /// 在没有变化时生成一份确认稳定并给出一条策略建议的报告
    pub async fn summarize_stability(&self, target_url: &str) -> Result<String, NarrationError> {
        let request = GenerationRequest {
            system: ANALYST_PERSONA.to_string(),
            prompt: Self::stability_prompt(target_url),
            temperature: STABILITY_TEMPERATURE,
        };
        self.generator.generate(&request).await
    }

    /// 与 [`Self::summarize_changes`] 相同，但失败时返回 [`FALLBACK_REPORT`]
    pub async fn changes_report(&self, changes: &ChangeSet) -> String {
        match self.summarize_changes(changes).await {
            Ok(report) => report,
            Err(e) => Self::fallback("changes", e),
        }
    }

    /// 与 [`Self::summarize_stability`] 相同，但失败时返回 [`FALLBACK_REPORT`]
    pub async fn stability_report(&self, target_url: &str) -> String {
        match self.summarize_stability(target_url).await {
            Ok(report) => report,
            Err(e) => Self::fallback("stability", e),
        }
    }

    fn fallback(kind: &'static str, err: NarrationError) -> String {
        warn!(kind, error = %err, "Report generation failed, using fallback text");
        metrics::counter!("rivalwatch_narration_fallbacks_total", "kind" => kind).increment(1);
        FALLBACK_REPORT.to_string()
    }

    pub fn changes_prompt(changes: &ChangeSet) -> String {
        let mut data = String::from("Recent changes on a competitor's website:\n");
        if !changes.new_products.is_empty() {
            data.push_str("\nNew Products Added:\n");
            for product in &changes.new_products {
                let _ = writeln!(data, "- {} at {}", product.title, product.price);
            }
        }
        if !changes.price_changes.is_empty() {
            data.push_str("\nPrice Changes:\n");
            for change in &changes.price_changes {
                let _ = writeln!(
                    data,
                    "- {}: Price changed from {} to {}",
                    change.title, change.old_price, change.new_price
                );
            }
        }

        format!(
            "{} Write a short, easy-to-read summary of this competitor's recent activity \
             for a business owner. Keep the tone encouraging and add a brief insight into \
             what these changes might signal.\n\nData:\n{}",
            ANALYST_PERSONA, data
        )
    }

    pub fn stability_prompt(target_url: &str) -> String {
        format!(
            "{} You just scanned the competitor storefront at \"{}\" and found no new \
             products and no price changes.\n\nWrite a brief, encouraging report for a \
             business owner. Confirm that the competitor's catalog and pricing look stable, \
             then offer one short, creative strategic suggestion that takes advantage of that \
             stability (for example a limited-time flash sale, a product bundle, or leaning \
             on a unique selling proposition).",
            ANALYST_PERSONA, target_url
        )
    }
}
