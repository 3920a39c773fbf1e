//! # ドメイン層エラー定義
//!
//! ビジネスルール違反やドメイン固有の例外状態を表現するエラー型。
//!
//! ## 設計方針
//!
//! - **型による分類**: エラーの種類を列挙型で明示し、パターンマッチで処理可能に
//! - **thiserror 活用**: `#[error(...)]` マクロでエラーメッセージを自動生成
//!
//! ## 使用例
//!
//! ```rust
//! use accessrequests_domain::{DomainError, record::RecordId};
//!
//! fn find_record(recid: RecordId) -> Result<(), DomainError> {
//!     // レコードストアから検索...
//!     Err(DomainError::RecordNotFound(recid))
//! }
//!
//! let err = find_record(RecordId::new(42)).unwrap_err();
//! assert_eq!(err.to_string(), "レコードが見つかりません: 42");
//! ```

use thiserror::Error;

use crate::{access_request::RequestStatus, record::RecordId};

/// ドメイン層で発生するエラー
#[derive(Debug, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 入力値がビジネスルールに違反している場合に使用する。
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// アクセスリクエスト対象のレコードが存在しない
    ///
    /// レコードストアが `None` を返した場合に使用する。
    /// 呼び出し側で回復せず、そのまま上位へ伝播させる。
    #[error("レコードが見つかりません: {0}")]
    RecordNotFound(RecordId),

    /// 現在のステータスでは許可されない状態遷移
    #[error("不正な状態遷移です: {from} から {action} はできません")]
    InvalidRequestState {
        /// 遷移前のステータス
        from:   RequestStatus,
        /// 試みた操作（"confirm_email", "accept", "reject"）
        action: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn invalid_request_stateのメッセージに遷移元と操作が含まれる() {
        let err = DomainError::InvalidRequestState {
            from:   RequestStatus::Accepted,
            action: "reject",
        };

        assert_eq!(
            err.to_string(),
            "不正な状態遷移です: accepted から reject はできません"
        );
    }
}
