//! メトリクスログの追記と読み出し
//!
//! 1 レコード = 1 回の write。空ファイル（または未作成）への最初の追記ではヘッダ行を同じ write に含める。
//! 既存ファイルが改行で終わっていない場合は、補う改行も同じ write に含める。
//! 読み出し側はヘッダ行の有無どちらにも対応する。

use crate::domain::metrics_entry::METRICS_COLUMNS;
use crate::domain::MetricsLogEntry;
use crate::error::Error;
use crate::metrics::table::TableView;
use crate::ports::outbound::FileSystem;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// 既定のメトリクスログ
pub const DEFAULT_METRICS_PATH: &str = "metrics/metrics.csv";

/// 表示時のタイトル
pub const METRICS_TABLE_TITLE: &str = "Metrics Data from CSV";

/// 追記専用のメトリクスログ（CSV）
pub struct MetricsRecorder {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl MetricsRecorder {
    pub fn new(fs: Arc<dyn FileSystem>, path: impl AsRef<Path>) -> Self {
        Self {
            fs,
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 1 行追記する。失敗は Error::Persistence
    pub fn append(&self, entry: &MetricsLogEntry) -> Result<(), Error> {
        self.append_impl(entry).map_err(|e| {
            Error::persistence(format!(
                "Failed to append metrics to '{}': {}",
                self.path.display(),
                e
            ))
        })
    }

    fn append_impl(&self, entry: &MetricsLogEntry) -> Result<(), Error> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.fs.create_dir_all(parent)?;
        }
        let needs_header = self
            .fs
            .metadata(&self.path)
            .map(|m| m.is_empty())
            .unwrap_or(true);

        let mut buf = String::new();
        if needs_header {
            buf.push_str(&MetricsLogEntry::csv_header());
            buf.push('\n');
        } else if !self.fs.read_to_string(&self.path)?.ends_with('\n') {
            // 最終行が改行で終わっていなければ、既存行に連結しないよう先に改行を入れる
            buf.push('\n');
        }
        buf.push_str(&entry.to_csv_row());
        buf.push('\n');

        let mut w = self.fs.open_append(&self.path)?;
        w.write_all(buf.as_bytes())
            .map_err(|e| Error::io_msg(e.to_string()))?;
        w.flush().map_err(|e| Error::io_msg(e.to_string()))?;
        Ok(())
    }

    /// ログ全体をテーブルとして読み出す（フィルタ・ページングなし）。
    /// ファイルが無ければ行なしのテーブル。読めなければ Error::Persistence
    pub fn render_table(&self) -> Result<TableView, Error> {
        let canonical: Vec<String> = METRICS_COLUMNS.iter().map(|s| s.to_string()).collect();
        if !self.fs.exists(&self.path) {
            return Ok(TableView::new(METRICS_TABLE_TITLE, canonical));
        }
        let contents = self.fs.read_to_string(&self.path).map_err(|e| {
            Error::persistence(format!(
                "Failed to read metrics from '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        let mut lines = contents.lines().filter(|l| !l.trim().is_empty()).peekable();
        let has_header = lines
            .peek()
            .map(|first| first.split(',').next().map(str::trim) == Some(METRICS_COLUMNS[0]))
            .unwrap_or(false);
        let columns = if has_header {
            lines
                .next()
                .map(split_row)
                .unwrap_or(canonical)
        } else {
            canonical
        };

        let mut table = TableView::new(METRICS_TABLE_TITLE, columns);
        for l in lines {
            table.push_row(split_row(l));
        }
        Ok(table)
    }

    /// データ行の数（ヘッダ行を除く）
    pub fn row_count(&self) -> Result<usize, Error> {
        Ok(self.render_table()?.rows.len())
    }
}

fn split_row(line: &str) -> Vec<String> {
    line.split(',').map(|c| c.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::StdFileSystem;
    use crate::domain::TokenUsage;

    fn entry(ts: &str, total: u64) -> MetricsLogEntry {
        let tokens = TokenUsage::new(total / 2, total - total / 2, total);
        MetricsLogEntry::measured(ts, tokens, 10.0, 0.000005)
    }

    fn recorder(dir: &Path) -> MetricsRecorder {
        MetricsRecorder::new(Arc::new(StdFileSystem), dir.join("metrics").join("metrics.csv"))
    }

    #[test]
    fn test_first_append_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let r = recorder(dir.path());
        r.append(&entry("2026-10-16T09:00:00.000000", 60)).unwrap();
        r.append(&entry("2026-10-16T09:00:01.000000", 10)).unwrap();
        let contents = std::fs::read_to_string(r.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], MetricsLogEntry::csv_header());
        assert!(lines[1].starts_with("2026-10-16T09:00:00.000000,30,30,60,10,"));
        assert_eq!(r.row_count().unwrap(), 2);
    }

    #[test]
    fn test_render_headerless_file_uses_canonical_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("legacy.csv");
        std::fs::write(
            &path,
            "2026-01-01T00:00:00.1,1,2,3,4.5,0.000015\n2026-01-01T00:00:01.1,1,1,2,3.25,0.00001\n",
        )
        .unwrap();
        let r = MetricsRecorder::new(Arc::new(StdFileSystem), &path);
        let t = r.render_table().unwrap();
        assert_eq!(t.title, "Metrics Data from CSV");
        assert_eq!(t.columns[0], "timestamp");
        assert_eq!(t.columns.len(), 6);
        assert_eq!(t.rows.len(), 2);
        assert_eq!(t.rows[0][3], "3");
        assert_eq!(t.rows[1][4], "3.25");
    }

    #[test]
    fn test_render_missing_file_is_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let t = recorder(dir.path()).render_table().unwrap();
        assert!(t.rows.is_empty());
        assert_eq!(t.columns.len(), 6);
    }

    #[test]
    fn test_append_to_existing_headerless_file_does_not_add_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.csv");
        std::fs::write(&path, "2026-01-01T00:00:00.1,1,2,3,4.5,0.000015\n").unwrap();
        let r = MetricsRecorder::new(Arc::new(StdFileSystem), &path);
        r.append(&entry("2026-01-01T00:00:02.0", 4)).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("timestamp"));
        assert_eq!(r.row_count().unwrap(), 2);
    }

    #[test]
    fn test_append_after_unterminated_last_row_starts_new_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.csv");
        std::fs::write(
            &path,
            format!("{}\n2026-01-01T00:00:00.1,1,2,3,4.5,0.000015", MetricsLogEntry::csv_header()),
        )
        .unwrap();
        let r = MetricsRecorder::new(Arc::new(StdFileSystem), &path);
        r.append(&entry("2026-01-01T00:00:01.0", 2)).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "2026-01-01T00:00:00.1,1,2,3,4.5,0.000015");
        assert!(lines[2].starts_with("2026-01-01T00:00:01.0,1,1,2,"));
        assert!(contents.ends_with('\n'));
        assert_eq!(r.row_count().unwrap(), 2);
    }

    #[test]
    fn test_append_failure_is_persistence_error() {
        let dir = tempfile::tempdir().unwrap();
        // 親ディレクトリの位置にファイルがあるので作成できない
        let blocker = dir.path().join("metrics");
        std::fs::write(&blocker, "not a dir").unwrap();
        let r = recorder(dir.path());
        let err = r.append(&entry("2026-01-01T00:00:00.0", 1)).unwrap_err();
        assert!(matches!(err, Error::Persistence(_)));
        assert!(err.to_string().contains("metrics.csv"));
    }
}
