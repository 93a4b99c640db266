// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 帧内换行的替代符号，前端收到后再还原为换行
pub const NEWLINE_ESCAPE: &str = "|||";

/// 扫描进度事件
///
/// 编排器按顺序产出，调用方按顺序消费且只消费一次。
/// 每次扫描的事件序列以且仅以一个 `Done` 结束。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    /// 进度说明
    Status(String),
    /// 最终报告文本
    Report(String),
    /// 终止事件
    Done,
}

impl ScanEvent {
    pub fn status(message: impl Into<String>) -> Self {
        ScanEvent::Status(message.into())
    }

    pub fn is_done(&self) -> bool {
        matches!(self, ScanEvent::Done)
    }

    /// 编码为单行文本帧
    ///
    /// 帧格式为 `STATUS: <message>`、`REPORT:<text>` 或 `DONE`。
    /// 文本中的换行会被替换为 [`NEWLINE_ESCAPE`]，保证一个事件只占一行。
    pub fn to_frame(&self) -> String {
        match self {
            ScanEvent::Status(message) => format!("STATUS: {}", escape_newlines(message)),
            ScanEvent::Report(text) => format!("REPORT:{}", escape_newlines(text)),
            ScanEvent::Done => "DONE".to_string(),
        }
    }
}

fn escape_newlines(text: &str) -> String {
    text.replace("\r\n", NEWLINE_ESCAPE)
        .replace(['\n', '\r'], NEWLINE_ESCAPE)
}
