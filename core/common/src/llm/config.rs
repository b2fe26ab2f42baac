//! profiles.json 用の設定型
//!
//! プロバイダ名から ProviderType とオプション（base_url / model / api_key_env / temperature /
//! response_mode / unit_price）を解決するための構造体。

use crate::domain::ResponseMode;
use serde::Deserialize;
use std::collections::HashMap;

/// profiles.json のルート
#[derive(Debug, Clone, Default)]
pub struct ProfilesConfig {
    /// 未指定時に使うプロバイダ名
    pub default_provider: Option<String>,
    /// プロバイダ名 -> プロファイル
    pub providers: HashMap<String, ProviderProfile>,
}

/// 1 プロバイダ分の設定
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderProfile {
    /// プロバイダ種別: openai | openai_compat | echo
    pub type_: ProviderTypeKind,
    /// API のベース URL（省略時は各プロバイダのデフォルト）
    pub base_url: Option<String>,
    /// 固定のモデル名（省略時は MODEL_NAME 環境変数）
    pub model: Option<String>,
    /// API キーを読む環境変数名（openai の省略時は OPENAI_API_KEY）
    pub api_key_env: Option<String>,
    /// 温度（省略時はリクエストに含めない）
    pub temperature: Option<f32>,
    /// モデル出力の解釈モード
    pub response_mode: Option<ResponseMode>,
    /// 1 トークンあたりの単価（USD）
    pub unit_price: Option<f64>,
}

impl ProviderProfile {
    /// type だけ指定したプロファイル
    pub fn of_type(type_: ProviderTypeKind) -> Self {
        Self {
            type_,
            base_url: None,
            model: None,
            api_key_env: None,
            temperature: None,
            response_mode: None,
            unit_price: None,
        }
    }
}

/// JSON の "type" で使うプロバイダ種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderTypeKind {
    Openai,
    OpenaiCompat,
    Echo,
}

impl ProviderTypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Openai => "openai",
            Self::OpenaiCompat => "openai_compat",
            Self::Echo => "echo",
        }
    }
}

/// serde 用の内部構造（type が予約語のため）
#[derive(Debug, Deserialize)]
struct ProfilesConfigRaw {
    #[serde(alias = "default")]
    default_provider: Option<String>,
    providers: Option<HashMap<String, ProviderProfileRaw>>,
}

#[derive(Debug, Deserialize)]
struct ProviderProfileRaw {
    #[serde(rename = "type", alias = "provider")]
    type_: ProviderTypeKindSerde,
    base_url: Option<String>,
    #[serde(alias = "default_model")]
    model: Option<String>,
    api_key_env: Option<String>,
    temperature: Option<f32>,
    response_mode: Option<ResponseMode>,
    unit_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ProviderTypeKindSerde {
    #[serde(alias = "gpt")]
    Openai,
    #[serde(rename = "openai_compat", alias = "ollama")]
    OpenaiCompat,
    Echo,
}

impl From<ProviderTypeKindSerde> for ProviderTypeKind {
    fn from(s: ProviderTypeKindSerde) -> Self {
        match s {
            ProviderTypeKindSerde::Openai => ProviderTypeKind::Openai,
            ProviderTypeKindSerde::OpenaiCompat => ProviderTypeKind::OpenaiCompat,
            ProviderTypeKindSerde::Echo => ProviderTypeKind::Echo,
        }
    }
}

impl ProfilesConfig {
    /// JSON 文字列からパース（ファイル読みは resolver で行う）
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        let raw: ProfilesConfigRaw = serde_json::from_str(json)?;
        let providers = raw
            .providers
            .unwrap_or_default()
            .into_iter()
            .map(|(k, v)| (k, v.into()))
            .collect();
        Ok(ProfilesConfig {
            default_provider: raw.default_provider,
            providers,
        })
    }
}

impl From<ProviderProfileRaw> for ProviderProfile {
    fn from(r: ProviderProfileRaw) -> Self {
        ProviderProfile {
            type_: r.type_.into(),
            base_url: r.base_url,
            model: r.model,
            api_key_env: r.api_key_env,
            temperature: r.temperature,
            response_mode: r.response_mode,
            unit_price: r.unit_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_object() {
        let cfg = ProfilesConfig::parse("{}").unwrap();
        assert!(cfg.default_provider.is_none());
        assert!(cfg.providers.is_empty());
    }

    #[test]
    fn test_parse_default_provider_and_providers() {
        let json = r#"
        {
            "default_provider": "alternate",
            "providers": {
                "alternate": {
                    "type": "openai_compat",
                    "base_url": "https://api.groq.com/openai/v1",
                    "model": "llama-3.1-8b-instant",
                    "api_key_env": "ALTERNATE_API_KEY",
                    "response_mode": "freeform",
                    "unit_price": 0.0000008
                },
                "work": { "type": "openai", "api_key_env": "WORK_OPENAI_KEY" },
                "offline": { "type": "echo" }
            }
        }
        "#;
        let cfg = ProfilesConfig::parse(json).unwrap();
        assert_eq!(cfg.default_provider.as_deref(), Some("alternate"));
        assert_eq!(cfg.providers.len(), 3);

        let a = cfg.providers.get("alternate").unwrap();
        assert_eq!(a.type_, ProviderTypeKind::OpenaiCompat);
        assert_eq!(a.model.as_deref(), Some("llama-3.1-8b-instant"));
        assert_eq!(a.api_key_env.as_deref(), Some("ALTERNATE_API_KEY"));
        assert_eq!(a.response_mode, Some(ResponseMode::Freeform));
        assert_eq!(a.unit_price, Some(0.0000008));

        let w = cfg.providers.get("work").unwrap();
        assert_eq!(w.type_, ProviderTypeKind::Openai);
        assert!(w.response_mode.is_none());

        let e = cfg.providers.get("offline").unwrap();
        assert_eq!(e.type_, ProviderTypeKind::Echo);
    }

    #[test]
    fn test_parse_aliases() {
        let json = r#"
        {
            "default": "local",
            "providers": {
                "local": { "type": "ollama", "default_model": "llama3.1", "temperature": 0.4 },
                "g": { "type": "gpt", "response_mode": "strict-json" }
            }
        }
        "#;
        let cfg = ProfilesConfig::parse(json).unwrap();
        assert_eq!(cfg.default_provider.as_deref(), Some("local"));
        let l = cfg.providers.get("local").unwrap();
        assert_eq!(l.type_, ProviderTypeKind::OpenaiCompat);
        assert_eq!(l.model.as_deref(), Some("llama3.1"));
        assert_eq!(l.temperature, Some(0.4));
        let g = cfg.providers.get("g").unwrap();
        assert_eq!(g.type_, ProviderTypeKind::Openai);
        assert_eq!(g.response_mode, Some(ResponseMode::StrictJson));
    }

    #[test]
    fn test_parse_rejects_unknown_mode() {
        let json = r#"{ "providers": { "x": { "type": "openai", "response_mode": "yaml" } } }"#;
        assert!(ProfilesConfig::parse(json).is_err());
    }

    #[test]
    fn test_parse_bundled_example() {
        let json = include_str!("../../../../config/profiles.example.json");
        let cfg = ProfilesConfig::parse(json).unwrap();
        assert_eq!(cfg.default_provider.as_deref(), Some("openai"));
        assert_eq!(cfg.providers.len(), 3);
        assert_eq!(
            cfg.providers.get("alternate").unwrap().api_key_env.as_deref(),
            Some("ALTERNATE_API_KEY")
        );
    }
}
