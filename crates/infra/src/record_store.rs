//! # RecordStore
//!
//! アクセスリクエスト対象のメタデータレコードを取得する。
//!
//! ## 設計方針
//!
//! - **読み取り専用**: レコードは外部ストアが所有し、ここでは ID で引くだけ
//! - **不在は `Ok(None)`**: 見つからないことはエラーではなく、判断は呼び出し側が行う
//! - **依存性注入**: ユースケースは `Arc<dyn RecordStore>` を受け取り、テストではモックに差し替える

use accessrequests_domain::record::{Record, RecordId};
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::PgPool;

use crate::error::InfraError;

/// レコードストアトレイト
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// ID でレコードを取得する
    async fn get_record(&self, recid: &RecordId) -> Result<Option<Record>, InfraError>;
}

/// PostgreSQL 実装の RecordStore
///
/// `records(recid BIGINT PRIMARY KEY, metadata JSONB NOT NULL)` を参照する。
#[derive(Debug, Clone)]
pub struct PostgresRecordStore {
    pool: PgPool,
}

impl PostgresRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PostgresRecordStore {
    #[tracing::instrument(skip_all, level = "debug", fields(%recid))]
    async fn get_record(&self, recid: &RecordId) -> Result<Option<Record>, InfraError> {
        let row: Option<(i64, JsonValue)> =
            sqlx::query_as("SELECT recid, metadata FROM records WHERE recid = $1")
                .bind(recid.as_i64())
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(recid, metadata)| Record::from_json(RecordId::new(recid), metadata)))
    }
}
