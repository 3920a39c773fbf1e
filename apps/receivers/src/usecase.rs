//! # ユースケース層
//!
//! アクセスリクエストのシグナルに反応する処理を実装する。
//!
//! - [`notification`] - 通知メールの生成・送信
//! - [`secret_link`] - シークレットリンクの作成

pub mod notification;
pub mod secret_link;

use accessrequests_domain::record::{Record, RecordId};
use accessrequests_infra::{InfraError, RecordStore};
use accessrequests_shared::event_log::error;
pub use notification::{NotificationService, TemplateRenderer, TeraTemplateRenderer};
pub use secret_link::SecretLinkService;

/// レコードを取得する。ストア障害はエラーログに残してそのまま返す
pub(crate) async fn find_record(
    store: &dyn RecordStore,
    recid: RecordId,
) -> Result<Option<Record>, InfraError> {
    store.get_record(&recid).await.inspect_err(|e| {
        tracing::error!(
            error.category = error::category::INFRASTRUCTURE,
            error.kind = error::kind::DATABASE,
            error = %e,
            %recid,
            "レコードの取得に失敗"
        );
    })
}
