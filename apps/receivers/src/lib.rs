//! # AccessRequests Receivers
//!
//! 制限付きレコードへのアクセスリクエストのライフサイクルシグナルに反応し、
//! 通知メールの送信とシークレットリンクの作成を行う。
//!
//! ## 依存関係
//!
//! ```text
//! receivers → infra → domain
//!     └──────→ shared
//! ```
//!
//! ## モジュール構成
//!
//! - [`config`] - 環境変数からの設定読み込み
//! - [`error`] - 受信処理のエラー定義
//! - [`receivers`] - シグナルの振り分けと各通知の組み立て
//! - [`usecase`] - 通知送信・シークレットリンク作成
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use accessrequests_domain::clock::SystemClock;
//! use accessrequests_receivers::{AccessRequestEvent, AccessRequestReceivers, ReceiversConfig};
//! use accessrequests_shared::observability::{LogFormat, init_tracing};
//!
//! init_tracing(LogFormat::from_env())?;
//! let config = ReceiversConfig::from_env()?;
//! let receivers = AccessRequestReceivers::from_config(&config).await?;
//! receivers.handle(AccessRequestEvent::Created, &mut request).await?;
//!
//! let accepted = AccessRequestEvent::accepted(message, expires_at, &SystemClock)?;
//! receivers.handle(accepted, &mut request).await?;
//! ```

pub mod config;
pub mod error;
pub mod receivers;
pub mod usecase;

#[cfg(any(test, feature = "test-utils"))]
#[doc(hidden)]
pub mod test_utils;

pub use config::ReceiversConfig;
pub use error::ReceiverError;
pub use receivers::{AccessRequestEvent, AccessRequestReceivers};
