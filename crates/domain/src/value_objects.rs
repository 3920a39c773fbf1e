//! # 共通値オブジェクト
//!
//! アクセスリクエストと通知で共有される値オブジェクトを定義する。
//!
//! ## 含まれる型
//!
//! | 型 | ラップ対象 | 用途 |
//! |---|-----------|------|
//! | [`Email`] | `String` | 通知の宛先・送信元メールアドレス |
//! | [`SenderName`] | `String` | アクセス申請者の氏名（PII） |
//! | [`Justification`] | `String` | アクセス申請の理由 |

use serde::{Deserialize, Serialize};

use crate::DomainError;

// =========================================================================
// Email（メールアドレス）
// =========================================================================

/// メールアドレス（値オブジェクト）
///
/// 生成時に `local@domain` 形式を検証し、空の宛先を型レベルで排除する。
///
/// メールアドレスは申請者・所有者を特定できる情報のため、`Display` は実装しない。
/// ログには [`masked`](Email::masked) の結果を使う。
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// メールアドレスを作成する
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - `@` を含み、その前後が空でない
    /// - 最大 255 文字
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.is_empty() {
            return Err(DomainError::Validation(
                "メールアドレスは必須です".to_string(),
            ));
        }

        let Some((local, domain)) = value.split_once('@') else {
            return Err(DomainError::Validation(
                "メールアドレスの形式が不正です".to_string(),
            ));
        };

        if local.is_empty() || domain.is_empty() {
            return Err(DomainError::Validation(
                "メールアドレスの形式が不正です".to_string(),
            ));
        }

        if value.len() > 255 {
            return Err(DomainError::Validation(
                "メールアドレスは255文字以内である必要があります".to_string(),
            ));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// ログ出力用にローカル部を伏せた表記（`j***@example.org`）
    pub fn masked(&self) -> String {
        match self.0.split_once('@') {
            Some((local, domain)) => {
                let head: String = local.chars().take(1).collect();
                format!("{head}***@{domain}")
            }
            None => "***".to_string(),
        }
    }
}

impl std::fmt::Debug for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Email").field(&self.masked()).finish()
    }
}

// =========================================================================
// SenderName / Justification
// =========================================================================

define_form_field! {
    /// アクセス申請者の氏名
    pub struct SenderName: "氏名", max 255, redacted;
}

define_form_field! {
    /// アクセス申請の理由
    pub struct Justification: "申請理由", max 5000, plain;
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_メールアドレスは正常な形式を受け入れる() {
        let email = Email::new("info@invenio-software.org").unwrap();
        assert_eq!(email.as_str(), "info@invenio-software.org");
    }

    #[rstest]
    #[case::空文字列("")]
    #[case::アットマークなし("invenio-software.org")]
    #[case::ローカル部なし("@invenio-software.org")]
    #[case::ドメイン部なし("info@")]
    fn test_メールアドレスの不正な形式はエラー(#[case] input: &str) {
        assert!(matches!(
            Email::new(input),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_メールアドレスの最大長を超えるとエラー() {
        let long = format!("{}@example.com", "a".repeat(250));
        assert!(Email::new(long).is_err());
    }

    #[test]
    fn test_氏名は前後の空白が除去される() {
        let name = SenderName::new("  Jane Doe  ").unwrap();
        assert_eq!(name.as_str(), "Jane Doe");
    }

    #[test]
    fn test_氏名のdebug出力はマスクされる() {
        let name = SenderName::new("Jane Doe").unwrap();
        assert_eq!(format!("{name:?}"), "SenderName(<redacted>)");
    }

    #[test]
    fn test_メールアドレスのマスク表記はローカル部の先頭1文字だけ残す() {
        let email = Email::new("jane.doe@example.org").unwrap();

        assert_eq!(email.masked(), "j***@example.org");
        assert_eq!(format!("{email:?}"), "Email(\"j***@example.org\")");
    }

    #[test]
    fn test_申請理由の文字数超過エラーに現在の文字数が入る() {
        let result = Justification::new("あ".repeat(5001));

        assert!(matches!(
            result,
            Err(DomainError::Validation(msg))
                if msg == "申請理由は 5000 文字以内で入力してください（現在 5001 文字）"
        ));
    }

    #[test]
    fn test_空白のみの申請理由はエラー() {
        let result = Justification::new("   ");
        assert!(matches!(result, Err(DomainError::Validation(msg)) if msg == "申請理由を入力してください"));
    }

    #[test]
    fn test_申請理由はシリアライズで文字列になる() {
        let justification = Justification::new("For my research").unwrap();
        assert_eq!(
            serde_json::to_value(&justification).unwrap(),
            serde_json::json!("For my research")
        );
    }
}
