//! ask 共通ライブラリ
//!
//! ドメイン型・安全フィルタ・LLM プロバイダ・メトリクスログ・ポートと標準アダプタを提供します。

/// エラーハンドリング
pub mod error;

/// ドメイン型
pub mod domain;

/// 送信前の安全フィルタ
pub mod safety;

/// プロンプトテンプレート
pub mod prompt_template;

/// メトリクスログとテーブル表示
pub mod metrics;

/// LLMドライバーとプロバイダ
pub mod llm;

/// Ports & Adapters
pub mod ports;
pub mod adapter;
