//! # 通知
//!
//! メール通知に関するドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **値オブジェクト**: [`EmailMessage`] は送信のたびに組み立てて破棄する
//! - **テンプレート分離**: メール本文の生成（TemplateRenderer）は receivers 側に置く
//! - **失敗の伝播**: レンダリング・送信の失敗はラップせずそのまま呼び出し元へ返す

use thiserror::Error;

use crate::value_objects::Email;

/// 通知送信エラー
#[derive(Debug, Error)]
pub enum NotificationError {
    /// メール送信に失敗
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),

    /// テンプレートレンダリングに失敗
    #[error("テンプレートレンダリングに失敗: {0}")]
    TemplateFailed(String),
}

/// メールメッセージ
///
/// テンプレートレンダリングの出力。NotificationSender に渡される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// 送信元メールアドレス（サポート窓口）
    pub from:    Email,
    /// 送信先メールアドレス
    pub to:      Vec<Email>,
    /// 件名
    pub subject: String,
    /// プレーンテキスト本文
    pub body:    String,
}

impl EmailMessage {
    /// 宛先 1 件のメッセージを作成する
    pub fn new(
        from: Email,
        to: Email,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            from,
            to: vec![to],
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// マスクした宛先をカンマ区切りで返す（ログ出力用）
    pub fn masked_recipients(&self) -> String {
        self.to
            .iter()
            .map(Email::masked)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
