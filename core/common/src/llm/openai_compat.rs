//! OpenAI Chat Completions 互換 (/chat/completions) プロバイダ
//!
//! base_url で任意のエンドポイントを指定可能。既定プロバイダ（OpenAI）も別エンドポイントの
//! 代替プロバイダも同じ実装を使い、設定だけが異なる。

use crate::domain::TokenUsage;
use crate::error::Error;
use crate::llm::provider::{Completion, LlmProvider, Message};
use serde_json::{json, Value};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI Chat Completions 互換プロバイダ
pub struct OpenAiCompatProvider {
    name: String,
    model: String,
    base_url: String,
    api_key: Option<String>,
    temperature: Option<f64>,
    client: reqwest::blocking::Client,
}

impl OpenAiCompatProvider {
    /// 新しいプロバイダを作成
    ///
    /// * `name` - プロファイル名（ログ・エラー表示用）
    /// * `model` - モデル名
    /// * `base_url` - ベース URL（None のとき DEFAULT_BASE_URL）
    /// * `api_key` - 認証情報（None のとき Authorization を付けない）
    /// * `temperature` - 温度（None のときリクエストに含めない）
    pub fn new(
        name: impl Into<String>,
        model: impl Into<String>,
        base_url: Option<String>,
        api_key: Option<String>,
        temperature: Option<f32>,
    ) -> Self {
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        Self {
            name: name.into(),
            model: model.into(),
            base_url,
            api_key,
            temperature: temperature.map(f64::from),
            client: reqwest::blocking::Client::new(),
        }
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl LlmProvider for OpenAiCompatProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn make_request_payload(&self, prompt: &str) -> Result<Value, Error> {
        let msg = Message::user(prompt);
        let mut payload = json!({
            "model": self.model,
            "messages": [{ "role": msg.role, "content": msg.content }],
            "stream": false
        });
        if let Some(t) = self.temperature {
            payload["temperature"] = json!(t);
        }
        Ok(payload)
    }

    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        let mut builder = self
            .client
            .post(self.url())
            .header("Content-Type", "application/json")
            .body(request_json.to_string());

        if let Some(key) = &self.api_key {
            builder = builder.header("Authorization", format!("Bearer {}", key));
        }

        let response = builder
            .send()
            .map_err(|e| Error::remote(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let response_text = response
            .text()
            .map_err(|e| Error::remote(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            let error_msg = serde_json::from_str::<Value>(&response_text)
                .ok()
                .and_then(|v| v["error"]["message"].as_str().map(|s| s.to_string()))
                .unwrap_or_else(|| format!("HTTP {}: {}", status, response_text));
            return Err(Error::remote(format!(
                "Chat completions error ({}): {}",
                status.as_u16(),
                error_msg
            )));
        }

        Ok(response_text)
    }

    fn parse_completion(&self, response_json: &str) -> Result<Completion, Error> {
        parse_chat_completion(response_json)
    }
}

/// Chat Completions のレスポンスエンベロープを解析する
///
/// `choices[0].message.content` をそのまま返し、`usage` が無ければトークン数は 0。
pub fn parse_chat_completion(response_json: &str) -> Result<Completion, Error> {
    let v: Value = serde_json::from_str(response_json)
        .map_err(|e| Error::remote(format!("Failed to parse response JSON: {}", e)))?;

    if let Some(err) = v.get("error") {
        let msg = err["message"].as_str().unwrap_or("Unknown error");
        return Err(Error::remote(format!("API error: {}", msg)));
    }

    let text = v["choices"][0]["message"]["content"]
        .as_str()
        .map(|s| s.to_string())
        .ok_or_else(|| Error::remote("No text in response"))?;

    let usage = &v["usage"];
    let count = |key: &str| usage[key].as_u64().unwrap_or(0);
    Ok(Completion {
        text,
        usage: TokenUsage::new(
            count("prompt_tokens"),
            count("completion_tokens"),
            count("total_tokens"),
        ),
    })
}
