//! プロバイダファクトリー
//!
//! プロバイダタイプに基づいて適切なプロバイダを作成します。

use crate::error::Error;
use crate::llm::echo::EchoProvider;
use crate::llm::openai_compat::OpenAiCompatProvider;
use crate::llm::provider::{Completion, LlmProvider};
use serde_json::Value;

/// プロバイダタイプ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderType {
    /// OpenAI（api.openai.com、認証必須）
    OpenAi,
    /// OpenAI Chat Completions 互換 (/chat/completions)
    OpenAiCompat,
    /// Echo（ネットワークを使わない）
    Echo,
}

impl ProviderType {
    /// 文字列からプロバイダタイプを解析
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "openai" | "gpt" => Some(Self::OpenAi),
            "openai_compat" => Some(Self::OpenAiCompat),
            "echo" => Some(Self::Echo),
            _ => None,
        }
    }

    /// プロバイダタイプを文字列に変換
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::OpenAiCompat => "openai_compat",
            Self::Echo => "echo",
        }
    }

    /// 既定で読む API キーの環境変数名
    pub fn default_api_key_env(&self) -> Option<&'static str> {
        match self {
            Self::OpenAi => Some("OPENAI_API_KEY"),
            Self::OpenAiCompat | Self::Echo => None,
        }
    }

    /// 認証情報が無いと起動できないか
    pub fn requires_credential(&self) -> bool {
        matches!(self, Self::OpenAi)
    }
}

/// プロバイダのenumラッパー
///
/// 異なるプロバイダタイプを型安全に扱うために使用します。
pub enum AnyProvider {
    OpenAiCompat(OpenAiCompatProvider),
    Echo(EchoProvider),
}

impl LlmProvider for AnyProvider {
    fn name(&self) -> &str {
        match self {
            Self::OpenAiCompat(p) => p.name(),
            Self::Echo(p) => p.name(),
        }
    }

    fn model(&self) -> &str {
        match self {
            Self::OpenAiCompat(p) => p.model(),
            Self::Echo(p) => p.model(),
        }
    }

    fn make_request_payload(&self, prompt: &str) -> Result<Value, Error> {
        match self {
            Self::OpenAiCompat(p) => p.make_request_payload(prompt),
            Self::Echo(p) => p.make_request_payload(prompt),
        }
    }

    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        match self {
            Self::OpenAiCompat(p) => p.make_http_request(request_json),
            Self::Echo(p) => p.make_http_request(request_json),
        }
    }

    fn parse_completion(&self, response_json: &str) -> Result<Completion, Error> {
        match self {
            Self::OpenAiCompat(p) => p.parse_completion(response_json),
            Self::Echo(p) => p.parse_completion(response_json),
        }
    }
}

/// プロバイダを作成する
///
/// # Arguments
/// * `profile_name` - プロファイル名（エラー表示用）
/// * `provider_type` - プロバイダタイプ
/// * `model` - モデル名（Echo 以外は必須）
/// * `base_url` - ベース URL（None のとき各プロバイダのデフォルト）
/// * `api_key` - 解決済みの認証情報
/// * `temperature` - 温度
pub fn create_provider(
    profile_name: &str,
    provider_type: ProviderType,
    model: Option<String>,
    base_url: Option<String>,
    api_key: Option<String>,
    temperature: Option<f32>,
) -> Result<AnyProvider, Error> {
    match provider_type {
        ProviderType::OpenAi | ProviderType::OpenAiCompat => {
            let model = model.ok_or_else(|| {
                Error::config(format!(
                    "No model configured for profile '{}'. Set MODEL_NAME or pass --model.",
                    profile_name
                ))
            })?;
            Ok(AnyProvider::OpenAiCompat(OpenAiCompatProvider::new(
                profile_name,
                model,
                base_url,
                api_key,
                temperature,
            )))
        }
        ProviderType::Echo => Ok(AnyProvider::Echo(EchoProvider::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_type_from_str() {
        assert_eq!(ProviderType::from_str("openai"), Some(ProviderType::OpenAi));
        assert_eq!(ProviderType::from_str("GPT"), Some(ProviderType::OpenAi));
        assert_eq!(ProviderType::from_str("openai_compat"), Some(ProviderType::OpenAiCompat));
        assert_eq!(ProviderType::from_str("ECHO"), Some(ProviderType::Echo));
        assert_eq!(ProviderType::from_str("unknown"), None);
    }

    #[test]
    fn test_provider_type_as_str() {
        assert_eq!(ProviderType::OpenAi.as_str(), "openai");
        assert_eq!(ProviderType::OpenAiCompat.as_str(), "openai_compat");
        assert_eq!(ProviderType::Echo.as_str(), "echo");
    }

    #[test]
    fn test_credential_requirements() {
        assert!(ProviderType::OpenAi.requires_credential());
        assert_eq!(ProviderType::OpenAi.default_api_key_env(), Some("OPENAI_API_KEY"));
        assert!(!ProviderType::OpenAiCompat.requires_credential());
        assert!(ProviderType::Echo.default_api_key_env().is_none());
    }

    #[test]
    fn test_create_provider_requires_model() {
        let err = create_provider("openai", ProviderType::OpenAi, None, None, None, None)
            .err()
            .unwrap();
        assert!(matches!(err, Error::Configuration(_)));
        assert!(err.to_string().contains("MODEL_NAME"));
    }

    #[test]
    fn test_create_provider_names() {
        let p = create_provider(
            "alternate",
            ProviderType::OpenAiCompat,
            Some("m".to_string()),
            Some("http://localhost:8080/v1".to_string()),
            None,
            None,
        )
        .unwrap();
        assert_eq!(p.name(), "alternate");
        assert_eq!(p.model(), "m");

        let e = create_provider("echo", ProviderType::Echo, None, None, None, None).unwrap();
        assert_eq!(e.name(), "echo");
    }
}
