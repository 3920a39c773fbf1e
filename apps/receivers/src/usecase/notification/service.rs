//! # 通知サービス
//!
//! テンプレートレンダリング → メッセージ組み立て → メール送信を 1 回の呼び出しで行う。
//!
//! ## 設計方針
//!
//! - **1 呼び出し 1 通**: 宛先 1 件のメッセージを 1 通だけ送信器に渡す
//! - **送信元は注入**: サポート窓口アドレスは構築時に受け取り、グローバル設定は参照しない
//! - **fail-fast**: レンダリング・送信の失敗はリトライせずそのまま返す

use std::sync::Arc;

use accessrequests_domain::{
    notification::{EmailMessage, NotificationError},
    value_objects::Email,
};
use accessrequests_infra::NotificationSender;
use accessrequests_shared::{
    event_log::{error, event},
    log_business_event,
};
use tera::Context;

use super::TemplateRenderer;

/// 通知サービス
pub struct NotificationService {
    sender:        Arc<dyn NotificationSender>,
    renderer:      Arc<dyn TemplateRenderer>,
    support_email: Email,
}

impl NotificationService {
    pub fn new(
        sender: Arc<dyn NotificationSender>,
        renderer: Arc<dyn TemplateRenderer>,
        support_email: Email,
    ) -> Self {
        Self {
            sender,
            renderer,
            support_email,
        }
    }

    /// 送信元アドレス
    pub fn support_email(&self) -> &Email {
        &self.support_email
    }

    /// テンプレートから通知メールを生成して送信する
    ///
    /// # 引数
    ///
    /// - `to`: 宛先メールアドレス
    /// - `subject`: 件名
    /// - `template`: テンプレート識別子
    /// - `context`: テンプレート変数（名前 → 値）
    #[tracing::instrument(skip_all, fields(to = %to.masked(), template = %template))]
    pub async fn send_notification(
        &self,
        to: &Email,
        subject: &str,
        template: &str,
        context: &Context,
    ) -> Result<(), NotificationError> {
        let body = self.renderer.render(template, context).inspect_err(|e| {
            tracing::error!(
                error.category = error::category::INFRASTRUCTURE,
                error.kind = error::kind::TEMPLATE,
                error = %e,
                template,
                "通知テンプレートのレンダリングに失敗"
            );
        })?;

        let message = EmailMessage::new(self.support_email.clone(), to.clone(), subject, body);

        match self.sender.send_email(&message).await {
            Ok(()) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_SENT,
                    event.entity_type = event::entity_type::EMAIL,
                    event.result = event::result::SUCCESS,
                    notification.template = template,
                    notification.recipient = %to.masked(),
                    "通知メール送信成功"
                );
                Ok(())
            }
            Err(e) => {
                tracing::error!(
                    error.category = error::category::INFRASTRUCTURE,
                    error.kind = error::kind::MAIL_TRANSPORT,
                    error = %e,
                    template,
                    "通知メールの送信に失敗"
                );
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_FAILED,
                    event.entity_type = event::entity_type::EMAIL,
                    event.result = event::result::FAILURE,
                    notification.template = template,
                    notification.recipient = %to.masked(),
                    error = %e,
                    "通知メール送信失敗"
                );
                Err(e)
            }
        }
    }
}
