//! Outbound ポート: アプリが外界（LLM・表示・標準入力）を使うための trait

pub mod llm_completion;
pub mod presenter;
pub mod question_reader;

pub use llm_completion::LlmCompletion;
pub use presenter::ResultPresenter;
pub use question_reader::QuestionReader;
