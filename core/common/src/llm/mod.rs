//! LLMドライバーとプロバイダの実装
//!
//! このモジュールは、Chat Completions 互換プロバイダへの単発呼び出しを提供します。

pub mod config;
pub mod driver;
pub mod echo;
pub mod factory;
pub mod openai_compat;
pub mod provider;
pub mod resolver;

pub use driver::LlmDriver;
pub use factory::{create_provider, AnyProvider, ProviderType};
pub use provider::{Completion, LlmProvider};
pub use resolver::{list_profiles, load_profiles_config, resolve_provider, ResolvedProvider};
