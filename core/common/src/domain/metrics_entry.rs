//! メトリクスログ 1 行分のレコード
//!
//! CSV の列順は固定: timestamp, prompt_tokens, completion_tokens, total_tokens, latency_ms, estimated_cost_usd

use super::query_result::TokenUsage;

/// メトリクスログの列名（ヘッダ行）
pub const METRICS_COLUMNS: [&str; 6] = [
    "timestamp",
    "prompt_tokens",
    "completion_tokens",
    "total_tokens",
    "latency_ms",
    "estimated_cost_usd",
];

/// 追記専用ログの 1 レコード。
///
/// latency_ms と estimated_cost_usd は丸める前の値（QueryResult.metrics の丸めはここでは行わない）
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsLogEntry {
    /// 書き込み時点のローカル時刻（ISO-8601）
    pub timestamp: String,
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
    pub latency_ms: f64,
    pub estimated_cost_usd: f64,
}

impl MetricsLogEntry {
    /// 計測値そのものから作る。コストは total_tokens * unit_price
    pub fn measured(
        timestamp: impl Into<String>,
        tokens: TokenUsage,
        elapsed_ms: f64,
        unit_price: f64,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            prompt_tokens: tokens.prompt,
            completion_tokens: tokens.completion,
            total_tokens: tokens.total,
            latency_ms: elapsed_ms,
            estimated_cost_usd: tokens.total as f64 * unit_price,
        }
    }

    /// ヘッダ行（改行なし）
    pub fn csv_header() -> String {
        METRICS_COLUMNS.join(",")
    }

    /// CSV の 1 行（改行なし）。値にカンマは含まれないためクォートしない
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{}",
            self.timestamp,
            self.prompt_tokens,
            self.completion_tokens,
            self.total_tokens,
            self.latency_ms,
            self.estimated_cost_usd
        )
    }
}
