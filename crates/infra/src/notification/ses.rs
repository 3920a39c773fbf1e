//! SES 通知送信実装
//!
//! AWS SES v2 API を使用してメールを送信する。
//! 本番環境で使用する。

use accessrequests_domain::notification::{EmailMessage, NotificationError};
use async_trait::async_trait;
use aws_sdk_sesv2::{
    Client,
    types::{Body, Content, Destination, EmailContent, Message},
};

use super::NotificationSender;

/// SES 通知送信
///
/// 送信元アドレスは `EmailMessage::from` を使用するため、SES で検証済みであること。
pub struct SesNotificationSender {
    client: Client,
}

impl SesNotificationSender {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// 環境変数・共有設定から AWS 設定を読み込んで作成する
    pub async fn from_env() -> Self {
        let config = aws_config::load_from_env().await;
        Self::new(Client::new(&config))
    }
}

/// 件名・本文の SES コンテンツを組み立てる
fn build_content(data: &str, part: &str) -> Result<Content, NotificationError> {
    Content::builder()
        .data(data)
        .charset("UTF-8")
        .build()
        .map_err(|e| NotificationError::SendFailed(format!("{part}構築失敗: {e}")))
}

#[async_trait]
impl NotificationSender for SesNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        let destination = Destination::builder()
            .set_to_addresses(Some(
                email.to.iter().map(|to| to.as_str().to_string()).collect(),
            ))
            .build();

        let content = EmailContent::builder()
            .simple(
                Message::builder()
                    .subject(build_content(&email.subject, "件名")?)
                    .body(
                        Body::builder()
                            .text(build_content(&email.body, "テキスト本文")?)
                            .build(),
                    )
                    .build(),
            )
            .build();

        self.client
            .send_email()
            .from_email_address(email.from.as_str())
            .destination(destination)
            .content(content)
            .send()
            .await
            .map_err(|e| NotificationError::SendFailed(format!("SES 送信失敗: {e}")))?;

        Ok(())
    }
}
