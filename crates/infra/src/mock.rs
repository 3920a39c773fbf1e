//! # テスト用モック
//!
//! ユースケーステストで使用するインメモリのテストダブル。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! accessrequests-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use accessrequests_domain::{
    notification::{EmailMessage, NotificationError},
    record::{Record, RecordId},
};
use async_trait::async_trait;

use crate::{error::InfraError, notification::NotificationSender, record_store::RecordStore};

// ===== MockNotificationSender =====

/// 送信したメッセージを outbox に記録する送信器
///
/// `Clone` したインスタンス同士で outbox を共有する。
#[derive(Clone, Default)]
pub struct MockNotificationSender {
    outbox:    Arc<Mutex<Vec<EmailMessage>>>,
    fail_with: Arc<Mutex<Option<String>>>,
}

impl MockNotificationSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// 送信済みメッセージのスナップショット
    pub fn outbox(&self) -> Vec<EmailMessage> {
        self.outbox.lock().unwrap().clone()
    }

    /// outbox を空にする
    pub fn clear_outbox(&self) {
        self.outbox.lock().unwrap().clear();
    }

    /// 以降の送信を指定メッセージで失敗させる
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.fail_with.lock().unwrap() = Some(message.into());
    }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        if let Some(message) = self.fail_with.lock().unwrap().clone() {
            return Err(NotificationError::SendFailed(message));
        }
        self.outbox.lock().unwrap().push(email.clone());
        Ok(())
    }
}

// ===== MockRecordStore =====

/// インメモリのレコードストア
///
/// 取得した ID を記録し、呼び出し回数の検証に使える。
/// [`fail_with`](MockRecordStore::fail_with) で以降の取得を DB 障害にできる。
#[derive(Clone, Default)]
pub struct MockRecordStore {
    records:   Arc<Mutex<HashMap<RecordId, Record>>>,
    requests:  Arc<Mutex<Vec<RecordId>>>,
    fail_with: Arc<Mutex<Option<String>>>,
}

impl MockRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_record(&self, record: Record) {
        self.records.lock().unwrap().insert(record.recid(), record);
    }

    /// `get_record` に渡された ID の履歴
    pub fn requested_ids(&self) -> Vec<RecordId> {
        self.requests.lock().unwrap().clone()
    }

    /// 以降の取得を指定メッセージの DB エラーで失敗させる
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.fail_with.lock().unwrap() = Some(message.into());
    }
}

#[async_trait]
impl RecordStore for MockRecordStore {
    async fn get_record(&self, recid: &RecordId) -> Result<Option<Record>, InfraError> {
        self.requests.lock().unwrap().push(*recid);
        if let Some(message) = self.fail_with.lock().unwrap().clone() {
            return Err(sqlx::Error::Protocol(message).into());
        }
        Ok(self.records.lock().unwrap().get(recid).cloned())
    }
}

#[cfg(test)]
mod tests {
    use accessrequests_domain::value_objects::Email;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn make_email() -> EmailMessage {
        EmailMessage::new(
            Email::new("support@example.org").unwrap(),
            Email::new("jane@example.org").unwrap(),
            "subject",
            "body",
        )
    }

    #[tokio::test]
    async fn outboxはクローン間で共有される() {
        let sender = MockNotificationSender::new();
        let cloned = sender.clone();

        cloned.send_email(&make_email()).await.unwrap();

        assert_eq!(sender.outbox(), vec![make_email()]);
        sender.clear_outbox();
        assert!(cloned.outbox().is_empty());
    }

    #[tokio::test]
    async fn fail_with設定後は送信に失敗しoutboxに残らない() {
        let sender = MockNotificationSender::new();
        sender.fail_with("接続拒否");

        let result = sender.send_email(&make_email()).await;

        assert!(matches!(result, Err(NotificationError::SendFailed(msg)) if msg == "接続拒否"));
        assert!(sender.outbox().is_empty());
    }

    #[tokio::test]
    async fn 未登録のレコードはnoneを返す() {
        let store = MockRecordStore::new();
        store.add_record(Record::from_json(
            RecordId::new(1),
            json!({ "title": "Record Title" }),
        ));

        let found = store.get_record(&RecordId::new(1)).await.unwrap();
        let missing = store.get_record(&RecordId::new(2)).await.unwrap();

        assert_eq!(
            found.as_ref().and_then(Record::title),
            Some("Record Title")
        );
        assert!(missing.is_none());
        assert_eq!(
            store.requested_ids(),
            vec![RecordId::new(1), RecordId::new(2)]
        );
    }

    #[tokio::test]
    async fn fail_with設定後の取得はdb障害になる() {
        let store = MockRecordStore::new();
        store.add_record(Record::from_json(
            RecordId::new(1),
            json!({ "title": "Record Title" }),
        ));
        store.fail_with("connection reset");

        let result = store.get_record(&RecordId::new(1)).await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("connection reset"));
        assert_eq!(store.requested_ids(), vec![RecordId::new(1)]);
    }
}
