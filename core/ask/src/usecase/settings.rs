//! 起動時の設定解決（CLI > 環境変数 > プロファイル > 既定値）
//!
//! ここで決まった値から ExecutorConfig とプロバイダを組み立てる。以後は不変。

use crate::cli::Config;
use crate::domain::executor_config::DEFAULT_UNIT_PRICE;
use common::domain::ResponseMode;
use common::error::Error;
use common::llm::config::ProfilesConfig;
use common::llm::{resolve_provider, ProviderType, ResolvedProvider};
use common::metrics::recorder::DEFAULT_METRICS_PATH;
use common::ports::outbound::EnvResolver;
use common::prompt_template::DEFAULT_PROMPT_PATH;
use std::path::PathBuf;

pub const ENV_PROFILE: &str = "ASK_PROFILE";
pub const ENV_MODEL: &str = "MODEL_NAME";
pub const ENV_PROMPT_FILE: &str = "ASK_PROMPT_FILE";
pub const ENV_METRICS_FILE: &str = "ASK_METRICS_FILE";
pub const ENV_RESPONSE_MODE: &str = "ASK_RESPONSE_MODE";
pub const ENV_UNIT_PRICE: &str = "ASK_UNIT_PRICE";
pub const ENV_DENYLIST_EXTRA: &str = "ASK_DENYLIST_EXTRA";

/// 解決済みの起動設定
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSettings {
    pub provider: ResolvedProvider,
    /// Echo 以外では Some（無ければ解決時にエラー）
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub response_mode: ResponseMode,
    pub unit_price: f64,
    pub prompt_path: PathBuf,
    pub metrics_path: PathBuf,
    pub extra_denylist: Vec<String>,
}

pub fn resolve_settings(
    config: &Config,
    env: &dyn EnvResolver,
    profiles: Option<&ProfilesConfig>,
) -> Result<ResolvedSettings, Error> {
    let requested = config
        .profile
        .clone()
        .or_else(|| env.var(ENV_PROFILE).map(common::domain::ProviderName::new));
    let provider = resolve_provider(requested.as_ref(), profiles)?;

    // プロファイル固定のモデルがあれば MODEL_NAME より優先
    let model = config
        .model
        .as_ref()
        .map(|m| m.to_string())
        .or_else(|| provider.model.clone())
        .or_else(|| env.var(ENV_MODEL));
    if model.is_none() && provider.provider_type != ProviderType::Echo {
        return Err(Error::config(format!(
            "No model configured for profile '{}'. Set {} or pass --model.",
            provider.profile_name, ENV_MODEL
        )));
    }

    let api_key = resolve_credential(&provider, env)?;

    let response_mode = match config.response_mode {
        Some(m) => m,
        None => match env.var(ENV_RESPONSE_MODE) {
            Some(s) => ResponseMode::parse(&s).ok_or_else(|| {
                Error::config(format!(
                    "{}: unknown response mode '{}' (expected strict-json or freeform)",
                    ENV_RESPONSE_MODE, s
                ))
            })?,
            None => provider.response_mode.unwrap_or_default(),
        },
    };

    let unit_price = match config.unit_price {
        Some(p) => validate_unit_price(p, "--unit-price")?,
        None => match env.var(ENV_UNIT_PRICE) {
            Some(s) => {
                let p = s.trim().parse::<f64>().map_err(|_| {
                    Error::config(format!("{}: not a number: '{}'", ENV_UNIT_PRICE, s))
                })?;
                validate_unit_price(p, ENV_UNIT_PRICE)?
            }
            None => match provider.unit_price {
                Some(p) => validate_unit_price(p, "unit_price")?,
                None => DEFAULT_UNIT_PRICE,
            },
        },
    };

    let prompt_path = config
        .prompt_file
        .clone()
        .or_else(|| env.var(ENV_PROMPT_FILE).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PROMPT_PATH));
    let metrics_path = config
        .metrics_file
        .clone()
        .or_else(|| env.var(ENV_METRICS_FILE).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_METRICS_PATH));

    let extra_denylist = env
        .var(ENV_DENYLIST_EXTRA)
        .map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok(ResolvedSettings {
        provider,
        model,
        api_key,
        response_mode,
        unit_price,
        prompt_path,
        metrics_path,
        extra_denylist,
    })
}

/// 認証情報を解決する。openai か api_key_env を明示したプロファイルでは必須
fn resolve_credential(
    provider: &ResolvedProvider,
    env: &dyn EnvResolver,
) -> Result<Option<String>, Error> {
    let Some(var) = provider.effective_api_key_env() else {
        return Ok(None);
    };
    match env.var(&var) {
        Some(key) => Ok(Some(key)),
        None if provider.provider_type.requires_credential() || provider.api_key_env.is_some() => {
            Err(Error::config(format!(
                "{} is not set (required by profile '{}')",
                var, provider.profile_name
            )))
        }
        None => Ok(None),
    }
}

fn validate_unit_price(price: f64, source: &str) -> Result<f64, Error> {
    if price.is_finite() && price >= 0.0 {
        Ok(price)
    } else {
        Err(Error::config(format!(
            "{}: unit price must be a non-negative number, got {}",
            source, price
        )))
    }
}
