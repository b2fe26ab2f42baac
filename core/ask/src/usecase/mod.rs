//! ユースケース層

pub mod query_executor;
pub mod settings;

pub use query_executor::{ExecutorDeps, QueryExecutor};
pub use settings::resolve_settings;
