//! エラーハンドリング
//!
//! 全レイヤー共通のエラー型。バリアントごとに終了コードを持つ。
//! クエリ単位の失敗（RemoteCall / ResponseFormat / Persistence）と
//! 起動時に致命的な失敗（Configuration）を区別する。

/// エラー型
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// 起動時の設定不備（プロンプトテンプレート欠如・認証情報欠如など）。クエリ実行前に中断する
    #[error("{0}")]
    Configuration(String),
    /// プロバイダ呼び出しの失敗（通信エラー・非 2xx・応答エンベロープ不正）
    #[error("{0}")]
    RemoteCall(String),
    /// strict-json モードでモデル出力が JSON として解釈できない
    #[error("{0}")]
    ResponseFormat(String),
    /// メトリクスログの追記・読み出し・表示の失敗（結果自体は有効なまま）
    #[error("{0}")]
    Persistence(String),
    /// 引数不正（usage を表示する）
    #[error("{0}")]
    InvalidArgument(String),
    #[error("{0}")]
    Io(String),
    #[error("{0}")]
    Json(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn remote(msg: impl Into<String>) -> Self {
        Self::RemoteCall(msg.into())
    }

    pub fn response_format(msg: impl Into<String>) -> Self {
        Self::ResponseFormat(msg.into())
    }

    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn io_msg(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    pub fn json(msg: impl Into<String>) -> Self {
        Self::Json(msg.into())
    }

    /// usage を表示すべきエラーか
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// プロセス終了コード（sysexits.h に準拠）
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument(_) => 64,
            Self::ResponseFormat(_) | Self::Json(_) => 65,
            Self::RemoteCall(_) | Self::Persistence(_) | Self::Io(_) => 74,
            Self::Configuration(_) => 78,
        }
    }

    /// ログ・警告表示用の種別名
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration",
            Self::RemoteCall(_) => "remote_call",
            Self::ResponseFormat(_) => "response_format",
            Self::Persistence(_) => "persistence",
            Self::InvalidArgument(_) => "invalid_argument",
            Self::Io(_) => "io",
            Self::Json(_) => "json",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_helpers() {
        let err = Error::invalid_argument("test");
        assert_eq!(err.to_string(), "test");
        assert_eq!(err.exit_code(), 64);
        assert!(err.is_usage());

        let err = Error::config("missing prompt");
        assert_eq!(err.exit_code(), 78);
        assert!(!err.is_usage());
    }

    #[test]
    fn test_query_scoped_errors_are_not_usage() {
        for err in [
            Error::remote("x"),
            Error::response_format("x"),
            Error::persistence("x"),
        ] {
            assert!(!err.is_usage());
            assert_ne!(err.exit_code(), 0);
        }
    }

    #[test]
    fn test_kind() {
        assert_eq!(Error::remote("x").kind(), "remote_call");
        assert_eq!(Error::persistence("x").kind(), "persistence");
        assert_eq!(Error::response_format("x").kind(), "response_format");
    }
}
