//! Outbound ポート: アプリが外界（FS・時刻・環境変数・ログ・LLM）を使うための trait

pub mod clock;
pub mod env_resolver;
pub mod fs;
pub mod log;

pub use clock::Clock;
pub use env_resolver::EnvResolver;
pub use fs::{FileMetadata, FileSystem};
/// LLM プロバイダ（定義は llm::provider）
pub use crate::llm::provider::LlmProvider;
pub use log::{now_iso8601, Log, LogLevel, LogRecord};
