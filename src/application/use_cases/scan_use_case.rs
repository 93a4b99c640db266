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

use async_stream::stream;
use futures::Stream;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::domain::{
    models::{scan_event::ScanEvent, target::Target},
    repositories::snapshot_repository::SnapshotRepository,
    services::{
        catalog_service::CatalogExtractor, diff_service::DiffService,
        narrator_service::NarratorService,
    },
};
use crate::utils::target_lock::TargetLocks;

pub const STATUS_WAITING: &str = "waiting for another scan of this target to finish";
pub const STATUS_LOADING: &str = "loading previous snapshot";
pub const STATUS_SNAPSHOT_UNREADABLE: &str = "snapshot unreadable, aborting";
pub const STATUS_SCRAPE_FAILED: &str = "scrape failed, aborting";
pub const STATUS_NO_PRODUCTS: &str = "no products found, aborting";
pub const STATUS_BASELINE: &str = "no previous snapshot, saving baseline";
pub const STATUS_COMPARING: &str = "comparing with previous snapshot";
pub const STATUS_CHANGES: &str = "changes detected, generating report";
pub const STATUS_NO_CHANGES: &str = "no changes, generating strategic summary";
pub const STATUS_SAVE_FAILED: &str = "snapshot save failed, aborting";

/// 扫描结果分类，用于日志和指标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    Baseline,
    Changed,
    Stable,
    ScrapeFailed,
    StoreFailed,
}

impl ScanOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanOutcome::Baseline => "baseline",
            ScanOutcome::Changed => "changed",
            ScanOutcome::Stable => "stable",
            ScanOutcome::ScrapeFailed => "scrape_failed",
            ScanOutcome::StoreFailed => "store_failed",
        }
    }
}

fn record(outcome: ScanOutcome) {
    metrics::counter!("rivalwatch_scans_total", "outcome" => outcome.as_str()).increment(1);
}

/// 首次扫描的固定报告，不调用文本生成服务
pub fn baseline_report(url: &str) -> String {
    format!(
        "This is the first scan for {}. The current products have been saved as a baseline for future comparisons.",
        url
    )
}

/// 扫描用例
///
/// 把一次扫描编排为线性流程：
/// 读取快照 → 抓取 → 首次扫描 / 比对（有变化 / 无变化）→ 生成报告 → 保存快照 → 结束。
///
/// 事件以惰性流的形式产出：消费者拉取一个事件后流程才继续执行，
/// 消费者丢弃流即取消剩余步骤。无论走哪条路径，流都以恰好一个
/// [`ScanEvent::Done`] 结束。
#[derive(Clone)]
pub struct ScanUseCase {
    snapshots: Arc<dyn SnapshotRepository>,
    extractor: Arc<dyn CatalogExtractor>,
    narrator: Arc<NarratorService>,
    locks: TargetLocks,
}

impl ScanUseCase {
    pub fn new(
        snapshots: Arc<dyn SnapshotRepository>,
        extractor: Arc<dyn CatalogExtractor>,
        narrator: Arc<NarratorService>,
        locks: TargetLocks,
    ) -> Self {
        Self {
            snapshots,
            extractor,
            narrator,
            locks,
        }
    }

    /// 对一个目标执行扫描，返回进度事件流
    ///
    /// 同一目标的锁从读取快照一直持有到保存快照之后。快照只会在抓取成功、
    /// 报告文本生成之后、`Report` 事件发出之前被整体替换。
    pub fn run(&self, target: Target) -> impl Stream<Item = ScanEvent> + Send + 'static {
        let snapshots = self.snapshots.clone();
        let extractor = self.extractor.clone();
        let narrator = self.narrator.clone();
        let locks = self.locks.clone();

        stream! {
            let Target { id: target_id, url } = target;

            let _guard = match locks.try_acquire(target_id) {
                Some(guard) => guard,
                None => {
                    info!(target_id, "Scan already running for target, waiting");
                    yield ScanEvent::status(STATUS_WAITING);
                    locks.acquire(target_id).await
                }
            };

            info!(target_id, url = %url, "Scan started");
            yield ScanEvent::status(STATUS_LOADING);
            let previous = match snapshots.load(target_id).await {
                Ok(previous) => previous,
                Err(e) => {
                    error!(target_id, error = %e, "Failed to load snapshot");
                    record(ScanOutcome::StoreFailed);
                    yield ScanEvent::status(STATUS_SNAPSHOT_UNREADABLE);
                    yield ScanEvent::Done;
                    return;
                }
            };

            yield ScanEvent::status(format!("scraping {}", url));
            let current = match extractor.extract(&url).await {
                Ok(current) if !current.is_empty() => current,
                Ok(_) => {
                    warn!(target_id, url = %url, "Scrape returned no products");
                    record(ScanOutcome::ScrapeFailed);
                    yield ScanEvent::status(STATUS_NO_PRODUCTS);
                    yield ScanEvent::Done;
                    return;
                }
                Err(e) => {
                    warn!(target_id, url = %url, error = %e, "Scrape failed");
                    record(ScanOutcome::ScrapeFailed);
                    yield ScanEvent::status(STATUS_SCRAPE_FAILED);
                    yield ScanEvent::Done;
                    return;
                }
            };

            let (report, outcome) = if previous.is_empty() {
                yield ScanEvent::status(STATUS_BASELINE);
                (baseline_report(&url), ScanOutcome::Baseline)
            } else {
                yield ScanEvent::status(STATUS_COMPARING);
                match DiffService::diff(&previous, &current) {
                    Some(changes) => {
                        info!(
                            target_id,
                            new_products = changes.new_products.len(),
                            price_changes = changes.price_changes.len(),
                            "Changes detected"
                        );
                        yield ScanEvent::status(STATUS_CHANGES);
                        (narrator.changes_report(&changes).await, ScanOutcome::Changed)
                    }
                    None => {
                        yield ScanEvent::status(STATUS_NO_CHANGES);
                        (narrator.stability_report(&url).await, ScanOutcome::Stable)
                    }
                }
            };

            if let Err(e) = snapshots.save(target_id, &current).await {
                error!(target_id, error = %e, "Failed to save snapshot");
                record(ScanOutcome::StoreFailed);
                yield ScanEvent::status(STATUS_SAVE_FAILED);
                yield ScanEvent::Done;
                return;
            }

            record(outcome);
            info!(
                target_id,
                outcome = outcome.as_str(),
                products = current.len(),
                "Scan completed"
            );
            yield ScanEvent::Report(report);
            yield ScanEvent::Done;
        }
    }
}

#[cfg(test)]
#[path = "scan_use_case_test.rs"]
mod tests;
