//! 標準アダプタ（ports::outbound の実装）

pub mod console_presenter;
pub mod llm_completion;
pub mod stdin_question;

pub use console_presenter::ConsolePresenter;
pub use llm_completion::DriverLlmCompletion;
pub use stdin_question::StdinQuestionReader;
