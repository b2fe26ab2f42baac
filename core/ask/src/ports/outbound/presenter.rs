//! 結果表示の Outbound ポート
//!
//! 表示は副作用のみで、失敗しても結果を置き換えない（戻り値なし）。

use common::domain::QueryResult;
use common::error::Error;
use common::metrics::TableView;

pub trait ResultPresenter: Send + Sync {
    fn show_result(&self, result: &QueryResult);
    fn show_table(&self, table: &TableView);
    /// 結果を無効にしない失敗（メトリクスの追記・表示失敗）の通知
    fn warn(&self, error: &Error);
}
