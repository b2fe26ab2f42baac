//! ポート定義
//!
//! common はライブラリなので inbound は持たない。outbound は FS・時刻・環境変数・ログ・LLM の trait。

pub mod outbound;
