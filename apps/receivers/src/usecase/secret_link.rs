//! # シークレットリンク作成
//!
//! 承認されたアクセスリクエストに対し、対象レコードのメタデータから
//! シークレットリンクのタイトルと説明文を設定する。
//!
//! ## 処理の流れ
//!
//! 1. レコードストアから `recid` でレコードを取得
//!    - 見つからなければ `RecordNotFound` を返し、リンクは変更しない
//! 2. 説明文テンプレートを `request` と `record` だけをコンテキストにしてレンダリング
//! 3. タイトル（レコードタイトル）・説明文・有効期限をリンクに設定
//!
//! 有効期限は承認シグナルの作成時に検証済みのものを受け取る
//! （[`AccessRequestEvent::accepted`](crate::receivers::AccessRequestEvent::accepted)）。
//! 呼び出しのたびに再レンダリング・上書きする（冪等ではない）。

use std::sync::Arc;

use accessrequests_domain::{DomainError, access_request::AccessRequest};
use accessrequests_infra::RecordStore;
use accessrequests_shared::{
    event_log::{error, event},
    log_business_event,
};
use chrono::{DateTime, Utc};
use tera::Context;

use super::{
    find_record,
    notification::{TemplateRenderer, templates},
};
use crate::error::ReceiverError;

/// シークレットリンク作成サービス
pub struct SecretLinkService {
    record_store: Arc<dyn RecordStore>,
    renderer:     Arc<dyn TemplateRenderer>,
}

impl SecretLinkService {
    pub fn new(record_store: Arc<dyn RecordStore>, renderer: Arc<dyn TemplateRenderer>) -> Self {
        Self {
            record_store,
            renderer,
        }
    }

    /// シークレットリンクのタイトル・説明文・有効期限を設定する
    ///
    /// メールアドレス確認済み（`is_confirmed()`）であることは呼び出し側の前提とし、ここでは検証しない。
    ///
    /// # エラー
    ///
    /// - `DomainError::RecordNotFound`: レコードが存在しない
    /// - `NotificationError::TemplateFailed`: 説明文のレンダリング失敗
    /// - `InfraError`: レコードストアの障害
    ///
    /// いずれの場合もリンクは変更されない。
    #[tracing::instrument(skip_all, fields(request_id = %request.id(), recid = %request.recid()))]
    pub async fn create_secret_link(
        &self,
        request: &mut AccessRequest,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<(), ReceiverError> {
        let recid = request.recid();
        let Some(record) = find_record(self.record_store.as_ref(), recid).await? else {
            tracing::error!(
                error.category = error::category::DOMAIN,
                error.kind = error::kind::RECORD_NOT_FOUND,
                %recid,
                "シークレットリンク対象のレコードが見つかりません"
            );
            return Err(DomainError::RecordNotFound(recid).into());
        };

        let mut context = Context::new();
        context.insert("request", &*request);
        context.insert("record", &record);
        let description = self
            .renderer
            .render(templates::LINK_DESCRIPTION, &context)?;

        let title = record.title().unwrap_or_else(|| {
            tracing::warn!(%recid, "レコードにタイトルがないため空のタイトルを設定します");
            ""
        });

        request
            .link_mut()
            .populate(title, description, expires_at);

        log_business_event!(
            event.category = event::category::ACCESS_REQUEST,
            event.action = event::action::SECRET_LINK_CREATED,
            event.entity_type = event::entity_type::SECRET_LINK,
            event.entity_id = %request.link().id(),
            event.result = event::result::SUCCESS,
            access_request.id = %request.id(),
            "シークレットリンクを作成"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use accessrequests_domain::record::{Record, RecordId};
    use accessrequests_infra::mock::MockRecordStore;
    use chrono::Duration;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};
    use serde_json::json;

    use super::*;
    use crate::test_utils::{RecordingTemplateRenderer, make_confirmed_request};

    #[fixture]
    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn make_service(
        store: &MockRecordStore,
        renderer: &RecordingTemplateRenderer,
    ) -> SecretLinkService {
        SecretLinkService::new(Arc::new(store.clone()), Arc::new(renderer.clone()))
    }

    fn make_record() -> Record {
        Record::from_json(RecordId::new(1), json!({ "title": "Record Title" }))
    }

    #[rstest]
    #[tokio::test]
    async fn レコードのタイトルと説明文がリンクに設定される(now: DateTime<Utc>) {
        let store = MockRecordStore::new();
        store.add_record(make_record());
        let renderer = RecordingTemplateRenderer::new();
        let service = make_service(&store, &renderer);
        let mut request = make_confirmed_request(1, now);

        service
            .create_secret_link(&mut request, None)
            .await
            .unwrap();

        assert_eq!(request.link().title(), "Record Title");
        assert_eq!(request.link().description(), "");
        assert_eq!(request.link().expires_at(), None);
    }

    #[rstest]
    #[tokio::test]
    async fn 説明文テンプレートはrequestとrecordだけでレンダリングされる(now: DateTime<Utc>) {
        let store = MockRecordStore::new();
        store.add_record(make_record());
        let renderer = RecordingTemplateRenderer::new();
        let service = make_service(&store, &renderer);
        let mut request = make_confirmed_request(1, now);
        let expected_request = serde_json::to_value(&request).unwrap();

        service
            .create_secret_link(&mut request, None)
            .await
            .unwrap();

        assert_eq!(renderer.render_count(templates::LINK_DESCRIPTION), 1);
        assert_eq!(renderer.calls().len(), 1);
        assert_eq!(
            renderer.context_keys(templates::LINK_DESCRIPTION),
            vec!["record".to_string(), "request".to_string()]
        );
        assert_eq!(
            renderer.context_value(templates::LINK_DESCRIPTION, "request"),
            Some(expected_request)
        );
        assert_eq!(
            renderer.context_value(templates::LINK_DESCRIPTION, "record"),
            Some(serde_json::to_value(make_record()).unwrap())
        );
    }

    #[rstest]
    #[tokio::test]
    async fn 説明文はレンダリング結果になる(now: DateTime<Utc>) {
        let store = MockRecordStore::new();
        store.add_record(make_record());
        let renderer = RecordingTemplateRenderer::new()
            .with_output(templates::LINK_DESCRIPTION, "Access request from Jane Doe");
        let service = make_service(&store, &renderer);
        let mut request = make_confirmed_request(1, now);

        service
            .create_secret_link(&mut request, Some(now + Duration::days(30)))
            .await
            .unwrap();

        assert_eq!(request.link().description(), "Access request from Jane Doe");
        assert_eq!(request.link().expires_at(), Some(now + Duration::days(30)));
    }

    #[rstest]
    #[tokio::test]
    async fn レコードが存在しない場合はrecord_not_foundでリンクは変更されない(
        now: DateTime<Utc>,
    ) {
        let store = MockRecordStore::new();
        let renderer = RecordingTemplateRenderer::new();
        let service = make_service(&store, &renderer);
        let mut request = make_confirmed_request(1, now);
        let before = request.link().clone();

        let result = service.create_secret_link(&mut request, None).await;

        let err = result.unwrap_err();
        assert_eq!(err.as_record_not_found(), Some(RecordId::new(1)));
        assert_eq!(request.link(), &before);
        assert!(!renderer.template_used(templates::LINK_DESCRIPTION));
    }

    #[rstest]
    #[tokio::test]
    async fn 繰り返し呼ぶと再レンダリングして上書きする(now: DateTime<Utc>) {
        let store = MockRecordStore::new();
        store.add_record(make_record());
        let renderer = RecordingTemplateRenderer::new();
        let service = make_service(&store, &renderer);
        let mut request = make_confirmed_request(1, now);

        service
            .create_secret_link(&mut request, Some(now + Duration::days(1)))
            .await
            .unwrap();
        service
            .create_secret_link(&mut request, None)
            .await
            .unwrap();

        assert_eq!(renderer.render_count(templates::LINK_DESCRIPTION), 2);
        assert_eq!(store.requested_ids().len(), 2);
        assert_eq!(request.link().title(), "Record Title");
        assert_eq!(request.link().expires_at(), None);
    }

    #[rstest]
    #[tokio::test]
    async fn レコードストアの障害はinfraエラーで返りリンクは変更されない(
        now: DateTime<Utc>,
    ) {
        let store = MockRecordStore::new();
        store.add_record(make_record());
        store.fail_with("connection reset");
        let renderer = RecordingTemplateRenderer::new();
        let service = make_service(&store, &renderer);
        let mut request = make_confirmed_request(1, now);
        let before = request.link().clone();

        let result = service
            .create_secret_link(&mut request, Some(now + Duration::days(1)))
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, ReceiverError::Infra(_)));
        assert_eq!(err.as_record_not_found(), None);
        assert_eq!(request.link(), &before);
        assert!(!renderer.template_used(templates::LINK_DESCRIPTION));
    }

    #[rstest]
    #[tokio::test]
    async fn 過去の有効期限もそのまま設定される(now: DateTime<Utc>) {
        let store = MockRecordStore::new();
        store.add_record(make_record());
        let renderer = RecordingTemplateRenderer::new();
        let service = make_service(&store, &renderer);
        let mut request = make_confirmed_request(1, now);

        service
            .create_secret_link(&mut request, Some(now - Duration::days(1)))
            .await
            .unwrap();

        assert_eq!(request.link().expires_at(), Some(now - Duration::days(1)));
    }

    #[rstest]
    #[tokio::test]
    async fn 説明文のレンダリング失敗はそのまま返りリンクは変更されない(now: DateTime<Utc>) {
        let store = MockRecordStore::new();
        store.add_record(make_record());
        let renderer = RecordingTemplateRenderer::new().failing(templates::LINK_DESCRIPTION);
        let service = make_service(&store, &renderer);
        let mut request = make_confirmed_request(1, now);

        let result = service.create_secret_link(&mut request, None).await;

        assert!(matches!(
            result,
            Err(ReceiverError::Notification(
                accessrequests_domain::notification::NotificationError::TemplateFailed(_)
            ))
        ));
        assert_eq!(request.link().title(), "");
    }

    #[rstest]
    #[tokio::test]
    async fn タイトルのないレコードでは空のタイトルになる(now: DateTime<Utc>) {
        let store = MockRecordStore::new();
        store.add_record(Record::from_json(
            RecordId::new(1),
            json!({ "description": "no title" }),
        ));
        let renderer = RecordingTemplateRenderer::new();
        let service = make_service(&store, &renderer);
        let mut request = make_confirmed_request(1, now);

        service
            .create_secret_link(&mut request, None)
            .await
            .unwrap();

        assert_eq!(request.link().title(), "");
    }
}
