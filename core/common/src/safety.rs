//! 送信前の安全フィルタ（禁止語の部分一致）
//!
//! ネットワークに出る前の事前チェックであり、モデレーションではない。
//! 言い換えや難読化で容易に回避できる（既知の制限）。

/// 既定の禁止語
pub const DEFAULT_DENYLIST: [&str; 5] = ["kill", "hack", "terror", "illegal", "bomb"];

/// 禁止語リストによる安全フィルタ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafetyFilter {
    /// 小文字化済みの禁止語
    terms: Vec<String>,
}

impl SafetyFilter {
    /// 任意の禁止語で作成（小文字化して保持、空文字列は無視）
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = terms
            .into_iter()
            .map(|t| t.as_ref().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self { terms }
    }

    /// 既定の禁止語に追加語を加えて作成
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = Self::default();
        for t in extra {
            let t = t.as_ref().to_lowercase();
            if !t.is_empty() && !filter.terms.contains(&t) {
                filter.terms.push(t);
            }
        }
        filter
    }

    /// 禁止語が 1 つも含まれなければ true（大文字小文字を区別しない）
    pub fn is_safe(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        !self.terms.iter().any(|t| lower.contains(t.as_str()))
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

impl Default for SafetyFilter {
    fn default() -> Self {
        Self::new(DEFAULT_DENYLIST)
    }
}

/// 既定の禁止語で判定する
pub fn is_safe_prompt(text: &str) -> bool {
    SafetyFilter::default().is_safe(text)
}
