//! Echoプロバイダの実装
//!
//! このプロバイダは実際にLLM APIを呼び出さず、質問をそのまま回答に入れて返します。
//! 応答は Chat Completions と同じエンベロープで、strict-json として解釈できる内容を持つ。
//! デバッグやテスト用に使用します。

use crate::error::Error;
use crate::llm::openai_compat::parse_chat_completion;
use crate::llm::provider::{Completion, LlmProvider, Message};
use serde_json::{json, Value};

/// プロンプト中で質問の前に置かれる区切り
const QUESTION_MARKER: &str = "\nQuestion: ";

/// Echoプロバイダ
#[derive(Debug, Clone, Default)]
pub struct EchoProvider;

impl EchoProvider {
    /// 新しいEchoプロバイダを作成
    pub fn new() -> Self {
        Self
    }
}

impl LlmProvider for EchoProvider {
    fn name(&self) -> &str {
        "echo"
    }

    fn model(&self) -> &str {
        "echo"
    }

    fn make_request_payload(&self, prompt: &str) -> Result<Value, Error> {
        let msg = Message::user(prompt);
        Ok(json!({
            "model": "echo",
            "messages": [{ "role": msg.role, "content": msg.content }]
        }))
    }

    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        let request: Value = serde_json::from_str(request_json)
            .map_err(|e| Error::remote(format!("Failed to parse request JSON: {}", e)))?;
        let prompt = request["messages"][0]["content"].as_str().unwrap_or("");
        // テンプレート部分は返さず、質問だけを回答に入れる
        let question = prompt
            .rsplit_once(QUESTION_MARKER)
            .map(|(_, q)| q)
            .unwrap_or(prompt);
        let content = json!({
            "answer": format!("[echo] {}", question),
            "confidence": 1.0,
            "actions": []
        });
        Ok(json!({
            "choices": [{ "message": { "role": "assistant", "content": content.to_string() } }],
            "usage": { "prompt_tokens": 0, "completion_tokens": 0, "total_tokens": 0 }
        })
        .to_string())
    }

    fn parse_completion(&self, response_json: &str) -> Result<Completion, Error> {
        parse_chat_completion(response_json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::driver::LlmDriver;

    #[test]
    fn test_echo_round_trip_through_driver() {
        let driver = LlmDriver::new(EchoProvider::new());
        let c = driver.complete("You are helpful.\nQuestion: Hello, echo!").unwrap();
        let v: Value = serde_json::from_str(&c.text).unwrap();
        assert_eq!(v["answer"], "[echo] Hello, echo!");
        assert_eq!(v["confidence"], 1.0);
        assert_eq!(c.usage.total, 0);
    }

    #[test]
    fn test_echo_without_marker_uses_whole_prompt() {
        let driver = LlmDriver::new(EchoProvider::new());
        let c = driver.complete("plain").unwrap();
        assert!(c.text.contains("[echo] plain"));
    }
}
