//! profiles.json の読み込みとプロバイダ解決

use crate::domain::{ProviderName, ResponseMode};
use crate::error::Error;
use crate::llm::config::{ProfilesConfig, ProviderProfile, ProviderTypeKind};
use crate::llm::factory::ProviderType;
use crate::ports::outbound::{EnvResolver, FileSystem};

/// 未指定時に使うプロファイル名
pub const DEFAULT_PROFILE: &str = "openai";

/// 解決済みプロバイダ（ProviderType + オプション）
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProvider {
    /// 解決に使ったプロファイル名（例: "openai", "alternate"）。エラー表示用
    pub profile_name: String,
    pub provider_type: ProviderType,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub api_key_env: Option<String>,
    pub temperature: Option<f32>,
    pub response_mode: Option<ResponseMode>,
    pub unit_price: Option<f64>,
}

impl ResolvedProvider {
    fn from_profile(name: &str, profile: &ProviderProfile) -> Self {
        Self {
            profile_name: name.to_string(),
            provider_type: provider_type_kind_to_provider_type(profile.type_),
            base_url: profile.base_url.clone(),
            model: profile.model.clone(),
            api_key_env: profile.api_key_env.clone(),
            temperature: profile.temperature,
            response_mode: profile.response_mode,
            unit_price: profile.unit_price,
        }
    }

    /// 実際に読む API キーの環境変数名（明示が無ければプロバイダ既定）
    pub fn effective_api_key_env(&self) -> Option<String> {
        self.api_key_env
            .clone()
            .or_else(|| self.provider_type.default_api_key_env().map(str::to_string))
    }
}

/// profiles.json を読み込む。ファイルが無ければ Ok(None)、読めない・JSON が壊れていれば
/// Error::Configuration（メッセージにパス含める）
pub fn load_profiles_config(
    fs: &dyn FileSystem,
    env: &dyn EnvResolver,
) -> Result<Option<ProfilesConfig>, Error> {
    let path = match env.resolve_profiles_config_path() {
        Ok(p) => p,
        // ホームが解決できない環境ではビルトインのみで動く
        Err(_) => return Ok(None),
    };
    if !fs.exists(path.as_path()) {
        return Ok(None);
    }
    let contents = fs
        .read_to_string(path.as_path())
        .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))?;
    ProfilesConfig::parse(&contents)
        .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))
        .map(Some)
}

fn provider_type_kind_to_provider_type(k: ProviderTypeKind) -> ProviderType {
    match k {
        ProviderTypeKind::Openai => ProviderType::OpenAi,
        ProviderTypeKind::OpenaiCompat => ProviderType::OpenAiCompat,
        ProviderTypeKind::Echo => ProviderType::Echo,
    }
}

/// 利用可能なビルトインプロバイダ名
fn builtin_provider_names() -> &'static [&'static str] {
    &["echo", "openai"]
}

/// 要求されたプロバイダ名（None の場合は default）と ProfilesConfig から ResolvedProvider を解決する。
/// 不明なプロバイダの場合は Error::invalid_argument（is_usage == true）で利用可能一覧を返す。
pub fn resolve_provider(
    requested: Option<&ProviderName>,
    cfg: Option<&ProfilesConfig>,
) -> Result<ResolvedProvider, Error> {
    let effective_name: &str = requested.map(|r| r.as_ref()).unwrap_or_else(|| {
        cfg.and_then(|c| c.default_provider.as_deref())
            .unwrap_or(DEFAULT_PROFILE)
    });

    // 1) cfg.providers に名前があればそれを優先
    if let Some(profile) = cfg.and_then(|c| c.providers.get(effective_name)) {
        return Ok(ResolvedProvider::from_profile(effective_name, profile));
    }

    // 2) ビルトイン (openai / echo) を試す
    if builtin_provider_names().contains(&effective_name) {
        if let Some(provider_type) = ProviderType::from_str(effective_name) {
            let profile = ProviderProfile::of_type(match provider_type {
                ProviderType::Echo => ProviderTypeKind::Echo,
                _ => ProviderTypeKind::Openai,
            });
            return Ok(ResolvedProvider::from_profile(effective_name, &profile));
        }
    }

    // 3) どれも無ければ usage エラー
    let (available, _) = list_profiles(cfg);
    Err(Error::invalid_argument(format!(
        "Unknown provider: '{}'. Available: {}",
        effective_name,
        available.join(", ")
    )))
}

/// 利用可能なプロファイル名（ソート済み）と既定のプロファイル名を返す
pub fn list_profiles(cfg: Option<&ProfilesConfig>) -> (Vec<String>, String) {
    let mut names: Vec<String> = builtin_provider_names()
        .iter()
        .map(|s| (*s).to_string())
        .collect();
    if let Some(cfg) = cfg {
        for k in cfg.providers.keys() {
            if !names.contains(k) {
                names.push(k.clone());
            }
        }
    }
    names.sort();
    let default = cfg
        .and_then(|c| c.default_provider.clone())
        .unwrap_or_else(|| DEFAULT_PROFILE.to_string());
    (names, default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::StdFileSystem;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn alternate_cfg() -> ProfilesConfig {
        let mut providers = HashMap::new();
        providers.insert(
            "alternate".to_string(),
            ProviderProfile {
                type_: ProviderTypeKind::OpenaiCompat,
                base_url: Some("https://alt.example/v1".to_string()),
                model: Some("alt-model".to_string()),
                api_key_env: Some("ALTERNATE_API_KEY".to_string()),
                temperature: None,
                response_mode: Some(ResponseMode::Freeform),
                unit_price: Some(0.000001),
            },
        );
        ProfilesConfig {
            default_provider: None,
            providers,
        }
    }

    #[test]
    fn test_resolve_provider_no_cfg_defaults_to_openai() {
        let r = resolve_provider(None, None).unwrap();
        assert_eq!(r.profile_name, "openai");
        assert_eq!(r.provider_type, ProviderType::OpenAi);
        assert!(r.model.is_none());
        assert_eq!(r.effective_api_key_env().as_deref(), Some("OPENAI_API_KEY"));
    }

    #[test]
    fn test_resolve_provider_echo_builtin() {
        let name = ProviderName::new("echo");
        let r = resolve_provider(Some(&name), None).unwrap();
        assert_eq!(r.provider_type, ProviderType::Echo);
        assert!(r.effective_api_key_env().is_none());
    }

    #[test]
    fn test_resolve_provider_from_cfg() {
        let cfg = alternate_cfg();
        let name = ProviderName::new("alternate");
        let r = resolve_provider(Some(&name), Some(&cfg)).unwrap();
        assert_eq!(r.provider_type, ProviderType::OpenAiCompat);
        assert_eq!(r.base_url.as_deref(), Some("https://alt.example/v1"));
        assert_eq!(r.model.as_deref(), Some("alt-model"));
        assert_eq!(r.effective_api_key_env().as_deref(), Some("ALTERNATE_API_KEY"));
        assert_eq!(r.response_mode, Some(ResponseMode::Freeform));
        assert_eq!(r.unit_price, Some(0.000001));
    }

    #[test]
    fn test_resolve_provider_cfg_default_provider() {
        let mut cfg = alternate_cfg();
        cfg.default_provider = Some("alternate".to_string());
        let r = resolve_provider(None, Some(&cfg)).unwrap();
        assert_eq!(r.profile_name, "alternate");
    }

    #[test]
    fn test_resolve_provider_unknown_lists_available() {
        let cfg = alternate_cfg();
        let name = ProviderName::new("nonexistent");
        let e = resolve_provider(Some(&name), Some(&cfg)).unwrap_err();
        assert!(e.is_usage());
        let msg = e.to_string();
        assert!(msg.contains("Unknown provider"));
        assert!(msg.contains("nonexistent"));
        assert!(msg.contains("alternate, echo, openai"));
    }

    #[test]
    fn test_builtin_type_names_are_not_profiles() {
        // openai_compat は base_url が必要なので profiles.json 経由でのみ使う
        let name = ProviderName::new("openai_compat");
        assert!(resolve_provider(Some(&name), None).is_err());
    }

    #[test]
    fn test_list_profiles() {
        let (names, default) = list_profiles(None);
        assert_eq!(names, vec!["echo".to_string(), "openai".to_string()]);
        assert_eq!(default, "openai");

        let mut cfg = alternate_cfg();
        cfg.default_provider = Some("alternate".to_string());
        let (names, default) = list_profiles(Some(&cfg));
        assert_eq!(names.len(), 3);
        assert_eq!(default, "alternate");
    }

    struct HomeEnv(PathBuf);

    impl EnvResolver for HomeEnv {
        fn var(&self, name: &str) -> Option<String> {
            (name == "ASK_HOME").then(|| self.0.display().to_string())
        }
    }

    #[test]
    fn test_load_profiles_config_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let env = HomeEnv(dir.path().to_path_buf());
        let cfg = load_profiles_config(&StdFileSystem, &env).unwrap();
        assert!(cfg.is_none());
    }

    #[test]
    fn test_load_profiles_config_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("profiles.json"),
            r#"{"default_provider":"echo","providers":{"local":{"type":"echo"}}}"#,
        )
        .unwrap();
        let env = HomeEnv(dir.path().to_path_buf());
        let cfg = load_profiles_config(&StdFileSystem, &env).unwrap().unwrap();
        assert_eq!(cfg.default_provider.as_deref(), Some("echo"));
        assert!(cfg.providers.contains_key("local"));
    }

    #[test]
    fn test_load_profiles_config_broken_json_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("profiles.json"), "{ not json").unwrap();
        let env = HomeEnv(dir.path().to_path_buf());
        let err = load_profiles_config(&StdFileSystem, &env).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert!(err.to_string().contains("profiles.json"));
    }
}
