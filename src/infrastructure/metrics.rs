// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

use crate::config::settings::MetricsSettings;

/// 启动 Prometheus 导出器
///
/// 未启用或地址无效时只记录日志，不影响服务启动
pub fn init_metrics(settings: &MetricsSettings) {
    if !settings.enabled {
        return;
    }

    let addr: SocketAddr = match settings.listen_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            warn!(listen_addr = %settings.listen_addr, error = %e, "Invalid metrics address");
            return;
        }
    };

    // Ignore error if address is already in use (for development/testing)
    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!("Failed to install Prometheus recorder: {}. This might happen if the port is already in use.", e);
        return;
    }

    info!("Metrics exporter listening on {}", addr);
}
