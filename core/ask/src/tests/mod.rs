
use common::ports::outbound::EnvResolver;
use std::collections::HashMap;

/// 固定マップから環境変数を返す EnvResolver（プロセス環境には触れない）
#[derive(Default)]
pub(crate) struct MapEnv(HashMap<String, String>);

impl MapEnv {
    pub(crate) fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.0.insert(name.to_string(), value.into());
        self
    }
}

impl EnvResolver for MapEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.0.get(name).filter(|v| !v.is_empty()).cloned()
    }
}
