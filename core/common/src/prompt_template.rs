//! プロンプトテンプレート
//!
//! 起動時に 1 回だけ読み込み、以後は不変。読み込めなければ起動を中断する。

use crate::error::Error;
use crate::ports::outbound::FileSystem;
use std::path::Path;

/// 既定のテンプレートファイル
pub const DEFAULT_PROMPT_PATH: &str = "prompts/main_prompt.txt";

/// 読み込み済みのプロンプトテンプレート
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate(String);

impl PromptTemplate {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// ファイルから読み込む。失敗は Error::Configuration（代替プロンプトは無い）
    pub fn load(fs: &dyn FileSystem, path: &Path) -> Result<Self, Error> {
        fs.read_to_string(path)
            .map(Self)
            .map_err(|e| Error::config(format!("Cannot load prompt template: {}", e)))
    }

    /// モデルに送るプロンプト: テンプレート + "\nQuestion: " + 質問
    pub fn compose(&self, question: &str) -> String {
        format!("{}\nQuestion: {}", self.0, question)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::StdFileSystem;

    #[test]
    fn test_compose() {
        let t = PromptTemplate::new("Answer in JSON.");
        assert_eq!(
            t.compose("How can I change my password?"),
            "Answer in JSON.\nQuestion: How can I change my password?"
        );
    }

    #[test]
    fn test_compose_keeps_template_verbatim() {
        let t = PromptTemplate::new("line1\nline2\n");
        assert_eq!(t.compose("q"), "line1\nline2\n\nQuestion: q");
    }

    #[test]
    fn test_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("main_prompt.txt");
        std::fs::write(&path, "You are a support bot.").unwrap();
        let t = PromptTemplate::load(&StdFileSystem, &path).unwrap();
        assert_eq!(t.as_str(), "You are a support bot.");
    }

    #[test]
    fn test_load_missing_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = PromptTemplate::load(&StdFileSystem, &dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert_eq!(err.exit_code(), 78);
        assert!(err.to_string().contains("nope.txt"));
    }
}
