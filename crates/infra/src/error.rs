//! # インフラ層エラー定義
//!
//! レコードストア（PostgreSQL）の参照失敗を表す。
//! メール送信の失敗はドメインの `NotificationError` で表すため、ここには含めない。
//!
//! `sqlx::Error` から変換した時点のスパン（どのリクエスト・どの recid の処理中か）を
//! [`SpanTrace`] として保持する。スパン情報を得るには `tracing_error::ErrorLayer` の登録が必要。

use thiserror::Error;
use tracing_error::SpanTrace;

/// レコードストアの参照エラー
#[derive(Debug, Error)]
#[error("レコードストアの参照に失敗: {source}")]
pub struct InfraError {
    source:     sqlx::Error,
    span_trace: SpanTrace,
}

impl InfraError {
    /// エラー発生時のスパン
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }
}

impl From<sqlx::Error> for InfraError {
    fn from(source: sqlx::Error) -> Self {
        Self {
            source,
            span_trace: SpanTrace::capture(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use tracing_subscriber::layer::SubscriberExt as _;

    use super::*;

    #[test]
    fn sqlxエラーからの変換時に実行中のスパンが記録される() {
        let subscriber = tracing_subscriber::registry().with(tracing_error::ErrorLayer::default());
        let _guard = tracing::subscriber::set_default(subscriber);
        let span = tracing::info_span!("get_record", recid = 42);
        let _enter = span.enter();

        let err = InfraError::from(sqlx::Error::RowNotFound);

        let trace = err.span_trace().to_string();
        assert!(trace.contains("get_record"), "スパン名を含むこと: {trace}");
    }

    #[test]
    fn 元のsqlxエラーがsourceとして辿れる() {
        let err = InfraError::from(sqlx::Error::RowNotFound);

        let source = err.source().and_then(|e| e.downcast_ref::<sqlx::Error>());
        assert!(matches!(source, Some(sqlx::Error::RowNotFound)));
        assert!(err.to_string().starts_with("レコードストアの参照に失敗: "));
    }
}
