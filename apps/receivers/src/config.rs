//! # Receivers 設定
//!
//! 環境変数からアクセスリクエスト受信処理の設定を読み込む。
//! 設定はグローバル状態として参照せず、構築時に各サービスへ明示的に渡す。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `SUPPORT_EMAIL` | **Yes** | 通知メールの送信元アドレス |
//! | `DATABASE_URL` | **Yes** | レコードストアの PostgreSQL 接続 URL |
//! | `ACCESSREQUESTS_BASE_URL` | No | メール内リンクのベース URL（デフォルト: `http://localhost:5000`） |
//! | `ACCESSREQUESTS_CONFIRMLINK_EXPIRES_IN` | No | 確認リンクの有効期間（秒、デフォルト: 5 日） |
//! | `NOTIFICATION_BACKEND` | No | `smtp` / `ses` / `noop`（デフォルト: `noop`） |
//! | `SMTP_HOST` | No | SMTP ホスト（デフォルト: `localhost`） |
//! | `SMTP_PORT` | No | SMTP ポート（デフォルト: `1025`） |

use std::env;

use accessrequests_domain::value_objects::Email;
use accessrequests_infra::NotificationBackend;
use chrono::Duration;
use thiserror::Error;

/// 確認リンクの有効期間のデフォルト値（5 日）
const DEFAULT_CONFIRMLINK_EXPIRES_IN_SECS: i64 = 5 * 24 * 60 * 60;

/// 設定読み込みエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 必須の環境変数が未設定
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    /// 値の形式が不正
    #[error("{var} の値が不正です: {reason}")]
    Invalid {
        var:    &'static str,
        reason: String,
    },
}

/// アクセスリクエスト受信処理の設定
#[derive(Debug, Clone)]
pub struct ReceiversConfig {
    /// 通知メールの送信元アドレス
    pub support_email: Email,
    /// メール内リンクのベース URL（末尾スラッシュなし）
    pub base_url: String,
    /// メールアドレス確認リンクの有効期間
    pub confirm_link_expires_in: Duration,
    /// レコードストアの接続 URL
    pub database_url: String,
    /// 通知設定
    pub notification: NotificationConfig,
}

/// 通知機能の設定
#[derive(Debug, Clone)]
pub struct NotificationConfig {
    /// 送信バックエンド
    pub backend:   NotificationBackend,
    /// SMTP ホスト（backend=smtp の場合に使用）
    pub smtp_host: String,
    /// SMTP ポート（backend=smtp の場合に使用）
    pub smtp_port: u16,
}

impl ReceiversConfig {
    /// 環境変数から設定を読み込む
    ///
    /// `.env` ファイルが存在すれば先に読み込む。
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意のキー参照関数から設定を読み込む
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let support_email = lookup("SUPPORT_EMAIL").ok_or(ConfigError::Missing("SUPPORT_EMAIL"))?;
        let support_email = Email::new(support_email).map_err(|e| ConfigError::Invalid {
            var:    "SUPPORT_EMAIL",
            reason: e.to_string(),
        })?;

        let base_url = lookup("ACCESSREQUESTS_BASE_URL")
            .unwrap_or_else(|| "http://localhost:5000".to_string())
            .trim_end_matches('/')
            .to_string();

        let expires_in_secs = match lookup("ACCESSREQUESTS_CONFIRMLINK_EXPIRES_IN") {
            Some(value) => value.parse::<i64>().map_err(|e| ConfigError::Invalid {
                var:    "ACCESSREQUESTS_CONFIRMLINK_EXPIRES_IN",
                reason: e.to_string(),
            })?,
            None => DEFAULT_CONFIRMLINK_EXPIRES_IN_SECS,
        };
        if expires_in_secs <= 0 {
            return Err(ConfigError::Invalid {
                var:    "ACCESSREQUESTS_CONFIRMLINK_EXPIRES_IN",
                reason: "正の秒数である必要があります".to_string(),
            });
        }

        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        Ok(Self {
            support_email,
            base_url,
            confirm_link_expires_in: Duration::seconds(expires_in_secs),
            database_url,
            notification: NotificationConfig::from_lookup(&lookup)?,
        })
    }
}

impl NotificationConfig {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let smtp_port = match lookup("SMTP_PORT") {
            Some(value) => value.parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::Invalid {
                    var:    "SMTP_PORT",
                    reason: e.to_string(),
                }
            })?,
            None => 1025,
        };

        Ok(Self {
            backend: NotificationBackend::parse(
                &lookup("NOTIFICATION_BACKEND").unwrap_or_else(|| "noop".to_string()),
            ),
            smtp_host: lookup("SMTP_HOST").unwrap_or_else(|| "localhost".to_string()),
            smtp_port,
        })
    }
}
