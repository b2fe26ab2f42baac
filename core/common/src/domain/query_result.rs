//! クエリ結果とメトリクスのドメイン型

use serde::{Deserialize, Serialize, Serializer};

/// 安全フィルタで拒否したときの固定回答
pub const UNSAFE_ANSWER: &str = "Unsafe prompt detected.";

/// freeform モードで補う既定の確信度
pub const FREEFORM_CONFIDENCE: f64 = 0.9;

/// freeform モードで補う既定のアクション
pub const FREEFORM_ACTION: &str = "Review and respond";

/// トークン使用量（プロバイダ応答の値をそのまま保持し、total の再検証はしない）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt: u64,
    pub completion: u64,
    pub total: u64,
}

impl TokenUsage {
    pub fn new(prompt: u64, completion: u64, total: u64) -> Self {
        Self {
            prompt,
            completion,
            total,
        }
    }
}

/// 1 クエリ分のメトリクス
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    pub tokens: TokenUsage,
    /// リモート呼び出しの経過時間（小数 2 桁に丸め）
    pub latency_ms: f64,
    /// total_tokens * 単価（小数 6 桁に丸め）
    pub estimated_cost_usd: f64,
}

impl Metrics {
    /// 生の経過時間と単価から丸め済みのメトリクスを作る
    pub fn compute(tokens: TokenUsage, elapsed_ms: f64, unit_price: f64) -> Self {
        Self {
            tokens,
            latency_ms: round_to(elapsed_ms, 2),
            estimated_cost_usd: estimate_cost(tokens.total, unit_price),
        }
    }
}

/// 推定コスト（USD）。total_tokens * unit_price を小数 6 桁に丸める
pub fn estimate_cost(total_tokens: u64, unit_price: f64) -> f64 {
    round_to(total_tokens as f64 * unit_price, 6)
}

/// 小数 `decimals` 桁に丸める
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// モデルが返す構造化回答（strict-json モードで必須のキー）
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelAnswer {
    pub answer: String,
    pub confidence: f64,
    pub actions: Vec<String>,
}

impl ModelAnswer {
    /// freeform モード: テキストをそのまま answer にし、確信度とアクションは既定値
    pub fn freeform(text: impl Into<String>) -> Self {
        Self {
            answer: text.into(),
            confidence: FREEFORM_CONFIDENCE,
            actions: vec![FREEFORM_ACTION.to_string()],
        }
    }
}

/// 呼び出し元に返すクエリ結果。構築後は変更しない
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    pub answer: String,
    pub confidence: f64,
    pub actions: Vec<String>,
    /// 拒否時は None（JSON では `{}`）
    #[serde(serialize_with = "serialize_metrics")]
    pub metrics: Option<Metrics>,
}

impl QueryResult {
    /// 安全フィルタで拒否したときの固定結果
    pub fn unsafe_prompt() -> Self {
        Self {
            answer: UNSAFE_ANSWER.to_string(),
            confidence: 0.0,
            actions: Vec::new(),
            metrics: None,
        }
    }

    pub fn answered(answer: ModelAnswer, metrics: Metrics) -> Self {
        Self {
            answer: answer.answer,
            confidence: answer.confidence,
            actions: answer.actions,
            metrics: Some(metrics),
        }
    }
}

fn serialize_metrics<S>(metrics: &Option<Metrics>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    use serde::ser::SerializeMap;
    match metrics {
        Some(m) => m.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}
