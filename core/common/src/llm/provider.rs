//! LLMプロバイダのトレイト定義

use crate::domain::TokenUsage;
use crate::error::Error;
use serde_json::Value;

/// 1 回の補完呼び出しの結果（モデル出力テキスト + トークン使用量）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// モデルが返したテキスト（加工しない）
    pub text: String,
    pub usage: TokenUsage,
}

/// LLMプロバイダのトレイト
///
/// 各プロバイダ（OpenAI、OpenAI 互換、Echo）はこのトレイトを実装する必要があります。
pub trait LlmProvider: Send + Sync {
    /// プロバイダ名を返す
    fn name(&self) -> &str;

    /// リクエストに載せるモデル名
    fn model(&self) -> &str;

    /// リクエストペイロードを生成（user ロールのメッセージ 1 件）
    ///
    /// # Arguments
    /// * `prompt` - テンプレートと質問を結合したプロンプト
    fn make_request_payload(&self, prompt: &str) -> Result<Value, Error>;

    /// HTTPリクエストを実行してレスポンスを取得
    ///
    /// # Returns
    /// * `Ok(String)` - レスポンスJSON文字列
    /// * `Err(Error)` - 通信エラー・非 2xx は Error::RemoteCall
    fn make_http_request(&self, request_json: &str) -> Result<String, Error>;

    /// レスポンスからテキストとトークン使用量を抽出
    fn parse_completion(&self, response_json: &str) -> Result<Completion, Error>;
}

/// メッセージ構造体
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }
}
