//! CLI から解釈したコマンド（main でディスパッチする）

use common::domain::Question;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AskCommand {
    Help,
    ListProfiles,
    /// 質問が None のときは標準入力から読む
    Query { question: Option<Question> },
}
