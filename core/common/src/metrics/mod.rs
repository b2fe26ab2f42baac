//! メトリクスログ（追記専用 CSV）と表形式での表示

pub mod recorder;
pub mod table;

pub use recorder::MetricsRecorder;
pub use table::TableView;
