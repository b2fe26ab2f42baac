//! 標準環境変数解決実装（std::env を委譲）
//!
//! ホーム・プロファイル・ログの各パスはトレイトの既定実装が var() から組み立てる。

use crate::ports::outbound::EnvResolver;
use std::env;

/// プロセスの環境変数を読む EnvResolver
#[derive(Debug, Clone, Default)]
pub struct StdEnvResolver;

impl EnvResolver for StdEnvResolver {
    fn var(&self, name: &str) -> Option<String> {
        // 空文字列は未設定と同じ扱い
        env::var(name).ok().filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_var_is_none() {
        assert!(StdEnvResolver
            .var("ASK_TEST_SURELY_UNSET_7f3a9c")
            .is_none());
    }

    #[test]
    fn test_reads_process_env() {
        let expected = env::var("PATH").ok().filter(|s| !s.is_empty());
        assert_eq!(StdEnvResolver.var("PATH"), expected);
    }
}
