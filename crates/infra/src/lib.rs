//! # AccessRequests インフラ層
//!
//! 外部システムとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **レコード取得**: PostgreSQL 上のメタデータレコードの参照
//! - **メール送信**: SMTP / SES / Noop による通知メールの配送
//!
//! ## 依存関係
//!
//! ```text
//! receivers → infra → domain
//! ```
//!
//! ドメイン層はインフラ層に依存しない（依存性逆転の原則）。
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL 接続プール
//! - [`error`] - インフラ層エラー定義
//! - [`notification`] - メール送信
//! - [`record_store`] - レコード取得
//! - `mock` - テスト用インメモリ実装（`test-utils` feature）

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod notification;
pub mod record_store;

pub use error::InfraError;
pub use notification::{NotificationBackend, NotificationSender};
pub use record_store::{PostgresRecordStore, RecordStore};
