//! アダプター（外界の I/O を trait で抽象化した標準実装）
//!
//! usecase は ports::outbound の trait 経由でのみファイル・時刻・環境変数・ログに触れる。
//! ここの Std* 実装を wiring で注入し、テストではモックを注入する。

pub mod file_json_log;
pub mod std_clock;
pub mod std_env_resolver;
pub mod std_fs;

pub use crate::ports::outbound::{Clock, EnvResolver, FileMetadata, FileSystem, Log};
pub use file_json_log::{CompositeLog, FileJsonLog, NoopLog, StderrLog};
pub use std_clock::StdClock;
pub use std_env_resolver::StdEnvResolver;
pub use std_fs::StdFileSystem;
