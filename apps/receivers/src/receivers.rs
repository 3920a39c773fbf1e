//! # アクセスリクエストのシグナル受信
//!
//! アクセスリクエストのライフサイクルシグナルを受け取り、
//! 通知メールの送信とシークレットリンクの作成に振り分ける。
//!
//! | シグナル | 処理（順序どおり） |
//! |----------|--------------------|
//! | `Created` | メールアドレス確認依頼 |
//! | `Confirmed` | 所有者への新規申請通知 → 申請者への受付確認 |
//! | `Accepted` | シークレットリンク作成 → 承認通知 |
//! | `Rejected` | 却下通知 |
//!
//! ステータス遷移はリクエスト側（[`AccessRequest`]）の責務で、ここでは変更しない。

use std::sync::Arc;

use accessrequests_domain::{
    DomainError,
    access_request::AccessRequest,
    clock::Clock,
    record::{Record, RecordId},
};
use accessrequests_infra::{
    InfraError,
    NotificationBackend,
    NotificationSender,
    PostgresRecordStore,
    RecordStore,
    db,
    notification::{NoopNotificationSender, SesNotificationSender, SmtpNotificationSender},
};
use accessrequests_shared::{
    event_log::{error, event},
    log_business_event,
};
use chrono::{DateTime, Duration, Utc};
use tera::Context;

use crate::{
    config::{NotificationConfig, ReceiversConfig},
    error::ReceiverError,
    usecase::{
        NotificationService,
        SecretLinkService,
        TemplateRenderer,
        TeraTemplateRenderer,
        find_record,
        notification::templates,
    },
};

/// メールアドレス確認依頼の件名
const SUBJECT_VERIFICATION: &str = "Access request verification";
/// 承認通知の件名
const SUBJECT_ACCEPTED: &str = "Access request accepted";
/// 却下通知の件名
const SUBJECT_REJECTED: &str = "Access request rejected";

/// アクセスリクエストのライフサイクルシグナル
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessRequestEvent {
    /// リクエストが作成された
    Created,
    /// 申請者のメールアドレスが確認された
    Confirmed,
    /// 所有者が承認した
    Accepted {
        /// 所有者からのメッセージ
        message:    Option<String>,
        /// シークレットリンクの有効期限
        expires_at: Option<DateTime<Utc>>,
    },
    /// 所有者が却下した
    Rejected {
        /// 所有者からのメッセージ
        message: Option<String>,
    },
}

impl AccessRequestEvent {
    /// 承認シグナルを作成する
    ///
    /// 有効期限は `clock` の現在時刻より後でなければならない。
    /// 検証はここだけで行い、受信側（シークレットリンク作成）は受け取った値をそのまま設定する。
    pub fn accepted(
        message: Option<String>,
        expires_at: Option<DateTime<Utc>>,
        clock: &dyn Clock,
    ) -> Result<Self, DomainError> {
        if expires_at.is_some_and(|expires_at| expires_at <= clock.now()) {
            return Err(DomainError::Validation(
                "有効期限は現在時刻より後である必要があります".to_string(),
            ));
        }
        Ok(Self::Accepted {
            message,
            expires_at,
        })
    }
}

/// シグナル受信ハンドラ群
pub struct AccessRequestReceivers {
    notifier:                NotificationService,
    secret_links:            SecretLinkService,
    record_store:            Arc<dyn RecordStore>,
    base_url:                String,
    confirm_link_expires_in: Duration,
}

impl AccessRequestReceivers {
    pub fn new(
        notifier: NotificationService,
        secret_links: SecretLinkService,
        record_store: Arc<dyn RecordStore>,
        base_url: impl Into<String>,
        confirm_link_expires_in: Duration,
    ) -> Self {
        Self {
            notifier,
            secret_links,
            record_store,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            confirm_link_expires_in,
        }
    }

    /// 設定から本番用の依存コンポーネントを組み立てる
    ///
    /// レコードストアの接続は最初の参照時に確立する。
    pub async fn from_config(config: &ReceiversConfig) -> Result<Self, ReceiverError> {
        let sender = build_notification_sender(&config.notification).await;
        let renderer: Arc<dyn TemplateRenderer> = Arc::new(TeraTemplateRenderer::new()?);

        let pool = db::create_lazy_pool(&config.database_url).map_err(InfraError::from)?;
        let record_store: Arc<dyn RecordStore> = Arc::new(PostgresRecordStore::new(pool));

        let notifier =
            NotificationService::new(sender, renderer.clone(), config.support_email.clone());
        let secret_links = SecretLinkService::new(record_store.clone(), renderer);

        Ok(Self::new(
            notifier,
            secret_links,
            record_store,
            config.base_url.clone(),
            config.confirm_link_expires_in,
        ))
    }

    /// シグナルを対応するハンドラに振り分ける
    pub async fn handle(
        &self,
        event: AccessRequestEvent,
        request: &mut AccessRequest,
    ) -> Result<(), ReceiverError> {
        match event {
            AccessRequestEvent::Created => self.send_email_validation(request).await,
            AccessRequestEvent::Confirmed => self.send_confirmed_notifications(request).await,
            AccessRequestEvent::Accepted {
                message,
                expires_at,
            } => {
                self.create_secret_link(request, expires_at).await?;
                self.send_accept_notification(request, message.as_deref())
                    .await
            }
            AccessRequestEvent::Rejected { message } => {
                self.send_reject_notification(request, message.as_deref())
                    .await
            }
        }
    }

    /// 申請者にメールアドレス確認依頼を送る
    #[tracing::instrument(skip_all, fields(request_id = %request.id()))]
    pub async fn send_email_validation(&self, request: &AccessRequest) -> Result<(), ReceiverError> {
        let record = self.fetch_record(request.recid()).await?;

        let mut context = base_context(request, &record);
        context.insert("days", &self.confirm_link_expires_in.num_days());
        context.insert(
            "confirm_link",
            &format!(
                "{}/records/{}/accessrequest/{}",
                self.base_url,
                request.recid(),
                request.confirmation_token()
            ),
        );

        self.notifier
            .send_notification(
                request.sender_email(),
                SUBJECT_VERIFICATION,
                templates::VALIDATE_EMAIL,
                &context,
            )
            .await?;
        Ok(())
    }

    /// 所有者への新規申請通知と、申請者への受付確認を送る
    ///
    /// レコードが存在しない場合はエラーログを出して何も送らない（失敗扱いにしない）。
    #[tracing::instrument(skip_all, fields(request_id = %request.id()))]
    pub async fn send_confirmed_notifications(
        &self,
        request: &AccessRequest,
    ) -> Result<(), ReceiverError> {
        let recid = request.recid();
        let Some(record) = find_record(self.record_store.as_ref(), recid).await? else {
            tracing::error!(
                error.category = error::category::DOMAIN,
                error.kind = error::kind::RECORD_NOT_FOUND,
                %recid,
                "受付通知の対象レコードが見つかりません"
            );
            log_business_event!(
                event.category = event::category::NOTIFICATION,
                event.action = event::action::NOTIFICATION_SKIPPED,
                event.entity_type = event::entity_type::ACCESS_REQUEST,
                event.entity_id = %request.id(),
                event.result = event::result::FAILURE,
                "レコード不在のため受付通知をスキップ"
            );
            return Ok(());
        };

        let subject = format!("Access request: {}", record.title().unwrap_or_default());
        let context = base_context(request, &record);

        self.notifier
            .send_notification(
                request.receiver_email(),
                &subject,
                templates::NEW_REQUEST,
                &context,
            )
            .await?;
        self.notifier
            .send_notification(
                request.sender_email(),
                &subject,
                templates::CONFIRMATION,
                &context,
            )
            .await?;
        Ok(())
    }

    /// 申請者に承認通知を送る
    ///
    /// 本文にはシークレットリンクのトークン付き URL と有効期限（`YYYY-MM-DD`）を含める。
    #[tracing::instrument(skip_all, fields(request_id = %request.id()))]
    pub async fn send_accept_notification(
        &self,
        request: &AccessRequest,
        message: Option<&str>,
    ) -> Result<(), ReceiverError> {
        let record = self.fetch_record(request.recid()).await?;

        let link = request.link();
        let mut context = base_context(request, &record);
        context.insert("message", &message);
        context.insert(
            "expires_at",
            &link
                .expires_at()
                .map(|expires_at| expires_at.format("%Y-%m-%d").to_string()),
        );
        context.insert(
            "record_link",
            &format!(
                "{}/records/{}?token={}",
                self.base_url,
                request.recid(),
                link.token()
            ),
        );

        self.notifier
            .send_notification(
                request.sender_email(),
                SUBJECT_ACCEPTED,
                templates::ACCEPTED,
                &context,
            )
            .await?;
        Ok(())
    }

    /// 申請者に却下通知を送る
    #[tracing::instrument(skip_all, fields(request_id = %request.id()))]
    pub async fn send_reject_notification(
        &self,
        request: &AccessRequest,
        message: Option<&str>,
    ) -> Result<(), ReceiverError> {
        let record = self.fetch_record(request.recid()).await?;

        let mut context = base_context(request, &record);
        context.insert("message", &message);

        self.notifier
            .send_notification(
                request.sender_email(),
                SUBJECT_REJECTED,
                templates::REJECTED,
                &context,
            )
            .await?;
        Ok(())
    }

    /// シークレットリンクを作成する（[`SecretLinkService::create_secret_link`] に委譲）
    pub async fn create_secret_link(
        &self,
        request: &mut AccessRequest,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<(), ReceiverError> {
        self.secret_links
            .create_secret_link(request, expires_at)
            .await
    }

    async fn fetch_record(&self, recid: RecordId) -> Result<Record, ReceiverError> {
        find_record(self.record_store.as_ref(), recid)
            .await?
            .ok_or_else(|| DomainError::RecordNotFound(recid).into())
    }
}

/// 全テンプレート共通のコンテキスト（`request` と `record`）
fn base_context(request: &AccessRequest, record: &Record) -> Context {
    let mut context = Context::new();
    context.insert("request", request);
    context.insert("record", record);
    context
}

/// 設定されたバックエンドの送信器を作成する
pub async fn build_notification_sender(config: &NotificationConfig) -> Arc<dyn NotificationSender> {
    tracing::info!(backend = %config.backend, "通知バックエンドを初期化します");
    match config.backend {
        NotificationBackend::Smtp => Arc::new(SmtpNotificationSender::new(
            &config.smtp_host,
            config.smtp_port,
        )),
        NotificationBackend::Ses => Arc::new(SesNotificationSender::from_env().await),
        NotificationBackend::Noop => Arc::new(NoopNotificationSender),
    }
}
