//! Ports & Adapters のポート定義
//!
//! - inbound: ドライバ（CLI）がアプリを呼び出すインターフェース
//! - outbound: アプリが外界（LLM・表示・標準入力）を使うための trait

pub mod inbound;
pub mod outbound;
