//! 環境変数解決 Outbound ポート
//!
//! 設定値・認証情報・ホームディレクトリを環境変数から解決する。
//! usecase / wiring はこの trait 経由でのみ環境変数にアクセスする。

use crate::domain::HomeDir;
use crate::error::Error;
use std::path::PathBuf;

/// 環境変数解決抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdEnvResolver` やテスト用の固定マップなど。
pub trait EnvResolver: Send + Sync {
    /// 環境変数を取得する。未設定・空文字列は None
    fn var(&self, name: &str) -> Option<String>;

    /// ホームディレクトリを環境変数から解決する
    ///
    /// 優先順位:
    /// 1. ASK_HOME（設定されていれば）
    /// 2. $XDG_CONFIG_HOME/ask（XDG_CONFIG_HOME が設定されていれば）
    /// 3. $HOME/.config/ask
    fn resolve_home_dir(&self) -> Result<HomeDir, Error> {
        if let Some(home) = self.var("ASK_HOME") {
            return Ok(HomeDir::new(PathBuf::from(home)));
        }
        let config_base = self
            .var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| self.var("HOME").map(|h| PathBuf::from(h).join(".config")))
            .ok_or_else(|| Error::config("HOME is not set"))?;
        Ok(HomeDir::new(config_base.join("ask")))
    }

    /// プロバイダプロファイル設定ファイルのパス（resolve_home_dir() 直下の profiles.json）
    fn resolve_profiles_config_path(&self) -> Result<PathBuf, Error> {
        Ok(self.resolve_home_dir()?.join("profiles.json"))
    }

    /// 構造化ログ（JSONL）の出力先（resolve_home_dir()/logs/ask.jsonl）
    fn resolve_log_file_path(&self) -> Result<PathBuf, Error> {
        Ok(self.resolve_home_dir()?.join("logs").join("ask.jsonl"))
    }
}
