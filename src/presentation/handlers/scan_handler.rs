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
    extract::{Extension, Path},
    response::sse::{Event, KeepAlive, KeepAliveStream, Sse},
};
use futures::stream::{self, BoxStream, Stream, StreamExt};
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::{
    application::use_cases::scan_use_case::ScanUseCase,
    config::settings::Settings,
    domain::{models::scan_event::ScanEvent, repositories::target_repository::TargetRepository},
};

pub const STATUS_TARGET_NOT_FOUND: &str = "Competitor not found.";
pub const STATUS_REGISTRY_UNREADABLE: &str = "Competitor list unreadable, aborting.";

type FrameStream = BoxStream<'static, Result<Event, Infallible>>;

/// 以服务器推送事件（SSE）流式返回一次扫描的进度
///
/// 每个事件编码为一个 `data:` 帧。目标不存在或注册表读取失败时同样返回
/// 一个以 `DONE` 结束的合法事件流，而不是 HTTP 错误。
pub async fn stream_scan(
    Path(id): Path<i64>,
    Extension(targets): Extension<Arc<dyn TargetRepository>>,
    Extension(scanner): Extension<Arc<ScanUseCase>>,
    Extension(settings): Extension<Arc<Settings>>,
) -> Sse<KeepAliveStream<FrameStream>> {
    let events: BoxStream<'static, ScanEvent> = match targets.find(id).await {
        Ok(Some(target)) => {
            info!(target_id = id, url = %target.url, "Streaming scan");
            scanner.run(target).boxed()
        }
        Ok(None) => {
            warn!(target_id = id, "Scan requested for unknown target");
            terminal(STATUS_TARGET_NOT_FOUND)
        }
        Err(e) => {
            error!(target_id = id, error = %e, "Failed to read target registry");
            terminal(STATUS_REGISTRY_UNREADABLE)
        }
    };

    let frames = pace(events, settings.scan.event_delay())
        .map(|event| Ok(Event::default().data(event.to_frame())))
        .boxed();

    Sse::new(frames).keep_alive(KeepAlive::default())
}

fn terminal(message: &'static str) -> BoxStream<'static, ScanEvent> {
    stream::iter([ScanEvent::status(message), ScanEvent::Done]).boxed()
}

/// 在相邻两个事件之间插入固定间隔，方便前端逐条展示
///
/// 只影响推送节奏，不改变事件顺序；`delay` 为零时原样透传。
pub fn pace<S>(events: S, delay: Duration) -> impl Stream<Item = ScanEvent> + Send + 'static
where
    S: Stream<Item = ScanEvent> + Send + 'static,
{
    events.enumerate().then(move |(index, event)| async move {
        if index > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        event
    })
}
