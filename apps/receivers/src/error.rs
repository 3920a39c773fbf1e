//! # Receivers エラー定義
//!
//! 受信処理で発生するエラーを 1 つの型にまとめる。
//! 各層のエラーは `#[error(transparent)]` でそのまま保持し、
//! 呼び出し元が元のエラーでパターンマッチできるようにする。

use accessrequests_domain::{DomainError, notification::NotificationError, record::RecordId};
use accessrequests_infra::InfraError;
use thiserror::Error;

/// 受信処理で発生するエラー
#[derive(Debug, Error)]
pub enum ReceiverError {
    /// ドメインルール違反（レコード不在を含む）
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// テンプレートレンダリング・メール送信の失敗
    #[error(transparent)]
    Notification(#[from] NotificationError),

    /// レコードストアの障害
    #[error(transparent)]
    Infra(#[from] InfraError),
}

impl ReceiverError {
    /// レコード不在エラーの場合、対象の recid を返す
    pub fn as_record_not_found(&self) -> Option<RecordId> {
        match self {
            Self::Domain(DomainError::RecordNotFound(recid)) => Some(*recid),
            _ => None,
        }
    }
}
