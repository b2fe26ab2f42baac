//! QueryExecutor の不変設定（起動時に 1 回だけ組み立てて参照で渡す）

use common::domain::ResponseMode;
use common::prompt_template::PromptTemplate;
use common::safety::SafetyFilter;
use std::path::PathBuf;

/// 既定の 1 トークンあたり単価（USD）
pub const DEFAULT_UNIT_PRICE: f64 = 0.000005;

#[derive(Debug, Clone, PartialEq)]
pub struct ExecutorConfig {
    /// 使用中のプロファイル名（ログ用）
    pub profile_name: String,
    pub response_mode: ResponseMode,
    pub unit_price: f64,
    pub prompt_template: PromptTemplate,
    pub metrics_path: PathBuf,
    pub safety: SafetyFilter,
}
