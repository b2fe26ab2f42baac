//! モデル出力の解釈モード

use serde::Deserialize;

/// モデル出力の解釈方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum ResponseMode {
    /// 出力全体を JSON として解析し、answer / confidence / actions を必須とする
    #[default]
    #[serde(rename = "strict-json", alias = "strict_json", alias = "json")]
    StrictJson,
    /// 出力テキストをそのまま answer とし、確信度とアクションは既定値で補う
    #[serde(rename = "freeform", alias = "text")]
    Freeform,
}

impl ResponseMode {
    /// 文字列からモードを解析（大文字小文字は区別しない）
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "strict-json" | "strict_json" | "json" => Some(Self::StrictJson),
            "freeform" | "text" => Some(Self::Freeform),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StrictJson => "strict-json",
            Self::Freeform => "freeform",
        }
    }
}
