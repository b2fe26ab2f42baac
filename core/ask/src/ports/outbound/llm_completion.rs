//! 単発 LLM 完了の Outbound ポート
//!
//! 1 回のプロンプトで全文応答とトークン使用量を取得する（ブロッキング）。

use common::error::Error;
use common::llm::Completion;

/// 単発の LLM 完了
///
/// 失敗はすべて Error::RemoteCall で返す。
pub trait LlmCompletion: Send + Sync {
    fn complete(&self, prompt: &str) -> Result<Completion, Error>;
}
