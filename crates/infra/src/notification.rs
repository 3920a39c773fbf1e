//! # 通知送信
//!
//! メール通知の送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `NotificationSender` trait でメール送信を抽象化
//! - **3 つの実装**: SMTP（開発・リレー用）、SES（本番用）、Noop（通知無効化用）
//! - **設定による切替**: `NOTIFICATION_BACKEND` の値から [`NotificationBackend`] を選ぶ
//! - **送信元はメッセージ側**: 送信元アドレスは `EmailMessage::from` を使い、送信器は保持しない

mod noop;
mod ses;
mod smtp;

use std::str::FromStr;

use accessrequests_domain::notification::{EmailMessage, NotificationError};
use async_trait::async_trait;
pub use noop::NoopNotificationSender;
pub use ses::SesNotificationSender;
pub use smtp::SmtpNotificationSender;

/// メール送信トレイト
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// メールを送信する
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError>;
}

/// 送信バックエンドの種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum NotificationBackend {
    /// SMTP サーバー経由
    Smtp,
    /// Amazon SES v2 経由
    Ses,
    /// 送信しない（ログ出力のみ）
    Noop,
}

impl NotificationBackend {
    /// 文字列からバックエンドを決定する
    ///
    /// 未知の値は `Noop` にフォールバックし、警告ログを出す。
    pub fn parse(value: &str) -> Self {
        Self::from_str(value).unwrap_or_else(|_| {
            tracing::warn!(backend = value, "未知の通知バックエンドのため noop を使用します");
            Self::Noop
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("smtp", NotificationBackend::Smtp)]
    #[case("ses", NotificationBackend::Ses)]
    #[case("noop", NotificationBackend::Noop)]
    #[case("sendmail", NotificationBackend::Noop)]
    #[case("", NotificationBackend::Noop)]
    fn parseで通知バックエンドを決定する(
        #[case] input: &str,
        #[case] expected: NotificationBackend,
    ) {
        assert_eq!(NotificationBackend::parse(input), expected);
    }
}
