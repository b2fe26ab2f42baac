//! 時刻取得 Outbound ポート
//!
//! メトリクスログのタイムスタンプはこの trait 経由で取得する。

/// 時刻取得の抽象
///
/// 実装は `common::adapter::StdClock` やテスト用の固定時刻など。
pub trait Clock: Send + Sync {
    /// 現在のローカル時刻を ISO-8601（タイムゾーンなし、マイクロ秒まで）で返す
    fn now_local_iso8601(&self) -> String;
}
