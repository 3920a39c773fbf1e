//! # AccessRequests ドメイン層
//!
//! 制限付きレコードへのアクセス申請に関するドメインモデルを定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! receivers → infra → domain
//!      ↘       ↓
//!        shared
//! ```
//!
//! ドメイン層はインフラ層（DB、メール送信）には一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`access_request`] - アクセスリクエストとシークレットリンク
//! - [`record`] - 外部レコードストアのメタデータレコード
//! - [`notification`] - メールメッセージと通知エラー
//! - [`value_objects`] - メールアドレス・氏名などの値オブジェクト
//! - [`clock`] - 時刻プロバイダ
//! - [`error`] - ドメイン層エラー
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use accessrequests_domain::{
//!     access_request::{AccessRequest, NewAccessRequest},
//!     record::RecordId,
//!     value_objects::{Email, Justification, SenderName},
//! };
//!
//! let mut request = AccessRequest::new(NewAccessRequest {
//!     recid:            RecordId::new(1),
//!     receiver_email:   Email::new("owner@example.org")?,
//!     sender_full_name: SenderName::new("Jane Doe")?,
//!     sender_email:     Email::new("jane@example.org")?,
//!     justification:    Justification::new("For my research")?,
//!     now:              chrono::Utc::now(),
//! });
//!
//! request.confirm_email()?;
//! assert!(request.is_confirmed());
//! # Ok(())
//! # }
//! ```

#[macro_use]
mod macros;

pub mod access_request;
pub mod clock;
pub mod error;
pub mod notification;
pub mod record;
pub mod value_objects;

pub use error::DomainError;
