//! LLMドライバーの実装
//!
//! プロバイダに依存しない共通処理（ペイロード生成 → HTTP → 応答解析）を提供します。
//! ここで発生する失敗はすべて Error::RemoteCall として呼び出し元に返す。

use crate::error::Error;
use crate::llm::provider::{Completion, LlmProvider};

/// LLMドライバー
pub struct LlmDriver<P: LlmProvider> {
    provider: P,
}

impl<P: LlmProvider> LlmDriver<P> {
    /// 新しいドライバーを作成
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// プロンプトを 1 回送信して補完結果を取得（ブロッキング、リトライなし）
    pub fn complete(&self, prompt: &str) -> Result<Completion, Error> {
        let payload = self
            .provider
            .make_request_payload(prompt)
            .map_err(as_remote)?;

        let request_json = serde_json::to_string(&payload)
            .map_err(|e| Error::remote(format!("Failed to serialize request: {}", e)))?;

        let response_json = self
            .provider
            .make_http_request(&request_json)
            .map_err(as_remote)?;

        self.provider
            .parse_completion(&response_json)
            .map_err(as_remote)
    }

    /// プロバイダを取得
    pub fn provider(&self) -> &P {
        &self.provider
    }
}

fn as_remote(e: Error) -> Error {
    match e {
        Error::RemoteCall(_) => e,
        other => Error::remote(other.to_string()),
    }
}
