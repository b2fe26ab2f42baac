//! 標準入力から質問を 1 行読む

use common::domain::Question;
use common::error::Error;
use std::io::{self, BufRead, Write};

use crate::ports::outbound::QuestionReader;

const PROMPT: &str = "Enter your question: ";

#[derive(Debug, Clone, Default)]
pub struct StdinQuestionReader;

impl QuestionReader for StdinQuestionReader {
    fn read_question(&self) -> Result<Question, Error> {
        print!("{}", PROMPT);
        io::stdout()
            .flush()
            .map_err(|e| Error::io_msg(format!("Failed to flush stdout: {}", e)))?;
        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| Error::io_msg(format!("Failed to read question from stdin: {}", e)))?;
        Ok(Question::new(line.trim_end_matches(['\r', '\n'])))
    }
}
