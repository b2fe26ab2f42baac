//! 質問の対話入力 Outbound ポート（引数で質問が無いときに使う）

use common::domain::Question;
use common::error::Error;

pub trait QuestionReader: Send + Sync {
    fn read_question(&self) -> Result<Question, Error>;
}
