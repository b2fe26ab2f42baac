//! コンソール表示（結果と表は stdout、警告は stderr）

use common::domain::QueryResult;
use common::error::Error;
use common::metrics::TableView;

use crate::ports::outbound::ResultPresenter;

#[derive(Debug, Clone, Default)]
pub struct ConsolePresenter;

impl ResultPresenter for ConsolePresenter {
    fn show_result(&self, result: &QueryResult) {
        match serde_json::to_string_pretty(result) {
            Ok(s) => println!("{}", s),
            Err(_) => println!("{:?}", result),
        }
    }

    fn show_table(&self, table: &TableView) {
        println!("{}", table);
    }

    fn warn(&self, error: &Error) {
        eprintln!("warning: {}", error);
    }
}
