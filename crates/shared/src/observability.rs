//! # ログ出力の初期化
//!
//! receivers を組み込むプロセスが起動時に一度だけ呼ぶ。
//!
//! - 出力形式は `LOG_FORMAT`（`json` / `pretty`）で切り替える
//! - レベルは `RUST_LOG` で上書きできる。未設定なら accessrequests 系クレートのみ debug
//! - `tracing_error::ErrorLayer` を登録し、レコードストアのエラーにスパンを残す

/// `RUST_LOG` 未設定時のフィルタ
pub const DEFAULT_FILTER: &str = "info,accessrequests_receivers=debug,accessrequests_infra=debug";

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 1 行 1 イベントの JSON（`event.*` / `error.*` がトップレベルのキーになる）
    Json,
    #[default]
    Pretty,
}

impl LogFormat {
    /// `LOG_FORMAT` の値を解釈する
    ///
    /// 大文字小文字は区別しない。未知の値は `None`。
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "pretty" => Some(Self::Pretty),
            _ => None,
        }
    }

    /// 環境変数 `LOG_FORMAT` から決定する（未設定・未知の値は `Pretty`）
    pub fn from_env() -> Self {
        std::env::var("LOG_FORMAT")
            .ok()
            .and_then(|value| Self::parse(&value))
            .unwrap_or_default()
    }
}

/// グローバルサブスクライバーを登録する
///
/// 既に登録済みの場合はエラーを返し、既存の設定はそのまま残る。
#[cfg(feature = "observability")]
pub fn init_tracing(format: LogFormat) -> Result<(), tracing_subscriber::util::TryInitError> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_error::ErrorLayer::default());

    match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(true)
                    .with_span_list(false),
            )
            .try_init()?,
        LogFormat::Pretty => registry.with(fmt::layer()).try_init()?,
    }

    tracing::debug!(?format, "ログ出力を初期化しました");
    Ok(())
}
