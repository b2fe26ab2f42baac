//! ask のドメイン型

pub mod command;
pub mod executor_config;

pub use command::AskCommand;
pub use executor_config::ExecutorConfig;
