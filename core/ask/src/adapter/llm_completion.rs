//! 単発 LLM 完了の標準実装（LlmDriver に委譲）

use common::error::Error;
use common::llm::{Completion, LlmDriver, LlmProvider};

use crate::ports::outbound::LlmCompletion;

/// LlmDriver を包んだ単発完了アダプタ
pub struct DriverLlmCompletion<P: LlmProvider> {
    driver: LlmDriver<P>,
}

impl<P: LlmProvider> DriverLlmCompletion<P> {
    pub fn new(provider: P) -> Self {
        Self {
            driver: LlmDriver::new(provider),
        }
    }
}

impl<P: LlmProvider> LlmCompletion for DriverLlmCompletion<P> {
    fn complete(&self, prompt: &str) -> Result<Completion, Error> {
        self.driver.complete(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::llm::echo::EchoProvider;

    #[test]
    fn test_complete_with_echo_provider() {
        let c = DriverLlmCompletion::new(EchoProvider::new());
        let out = c.complete("T\nQuestion: ping").unwrap();
        assert!(out.text.contains("[echo] ping"));
        assert_eq!(out.usage.total, 0);
    }
}
