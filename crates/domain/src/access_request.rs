//! # アクセスリクエスト
//!
//! 制限付きレコードへのアクセスを所有者に申請する案件と、
//! 承認時に発行されるシークレットリンクを管理する。
//!
//! ## ライフサイクル
//!
//! ```text
//! EmailValidation ──confirm_email──▶ Pending ──accept──▶ Accepted
//!                                       │
//!                                       └────reject────▶ Rejected
//! ```
//!
//! シークレットリンクはリクエストと同時に生成され（1:1 で所有）、
//! タイトル・説明はレコード取得後に [`SecretLink::populate`] で設定される。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::{
    DomainError,
    record::RecordId,
    value_objects::{Email, Justification, SenderName},
};

define_entity_id! {
    /// アクセスリクエスト ID
    pub struct AccessRequestId;
}

define_entity_id! {
    /// シークレットリンク ID
    pub struct SecretLinkId;
}

/// アクセスリクエストのステータス
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    IntoStaticStr,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RequestStatus {
    /// 申請者のメールアドレス確認待ち
    EmailValidation,
    /// 所有者の判断待ち
    Pending,
    /// 承認済み
    Accepted,
    /// 却下
    Rejected,
}

/// シークレットリンク
///
/// レコードへの限定アクセスを付与するリンク。`token` を URL に付与して使う。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecretLink {
    id:          SecretLinkId,
    #[serde(skip)]
    token:       String,
    title:       String,
    description: String,
    expires_at:  Option<DateTime<Utc>>,
    created_at:  DateTime<Utc>,
}

impl SecretLink {
    /// 空のシークレットリンクを作成する
    ///
    /// トークンは UUID v4 の simple 形式（32 桁の 16 進数）。
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            id:          SecretLinkId::new(),
            token:       uuid::Uuid::new_v4().simple().to_string(),
            title:       String::new(),
            description: String::new(),
            expires_at:  None,
            created_at:  now,
        }
    }

    /// タイトル・説明・有効期限を設定する
    ///
    /// 呼び出しのたびに上書きする（last-write-wins）。
    pub fn populate(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        expires_at: Option<DateTime<Utc>>,
    ) {
        self.title = title.into();
        self.description = description.into();
        self.expires_at = expires_at;
    }

    pub fn id(&self) -> &SecretLinkId {
        &self.id
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// 新規アクセスリクエストの作成パラメータ
#[derive(Debug, Clone)]
pub struct NewAccessRequest {
    pub recid:            RecordId,
    pub receiver_email:   Email,
    pub sender_full_name: SenderName,
    pub sender_email:     Email,
    pub justification:    Justification,
    pub now:              DateTime<Utc>,
}

/// アクセスリクエスト
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessRequest {
    id:                 AccessRequestId,
    recid:              RecordId,
    receiver_email:     Email,
    sender_full_name:   SenderName,
    sender_email:       Email,
    justification:      Justification,
    status:             RequestStatus,
    #[serde(skip)]
    confirmation_token: String,
    created_at:         DateTime<Utc>,
    link:               SecretLink,
}

impl AccessRequest {
    /// 新しいアクセスリクエストを作成する
    ///
    /// ステータスは `EmailValidation` から始まり、シークレットリンクも同時に生成する。
    pub fn new(params: NewAccessRequest) -> Self {
        Self {
            id:                 AccessRequestId::new(),
            recid:              params.recid,
            receiver_email:     params.receiver_email,
            sender_full_name:   params.sender_full_name,
            sender_email:       params.sender_email,
            justification:      params.justification,
            status:             RequestStatus::EmailValidation,
            confirmation_token: uuid::Uuid::new_v4().simple().to_string(),
            created_at:         params.now,
            link:               SecretLink::new(params.now),
        }
    }

    pub fn id(&self) -> &AccessRequestId {
        &self.id
    }

    pub fn recid(&self) -> RecordId {
        self.recid
    }

    pub fn receiver_email(&self) -> &Email {
        &self.receiver_email
    }

    pub fn sender_full_name(&self) -> &SenderName {
        &self.sender_full_name
    }

    pub fn sender_email(&self) -> &Email {
        &self.sender_email
    }

    pub fn justification(&self) -> &Justification {
        &self.justification
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn confirmation_token(&self) -> &str {
        &self.confirmation_token
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn link(&self) -> &SecretLink {
        &self.link
    }

    pub fn link_mut(&mut self) -> &mut SecretLink {
        &mut self.link
    }

    /// 申請者のメールアドレスが確認済みかどうか
    pub fn is_confirmed(&self) -> bool {
        self.status != RequestStatus::EmailValidation
    }

    /// メールアドレス確認を完了する（EmailValidation → Pending）
    pub fn confirm_email(&mut self) -> Result<(), DomainError> {
        self.transition(RequestStatus::EmailValidation, RequestStatus::Pending, "confirm_email")
    }

    /// 承認する（Pending → Accepted）
    pub fn accept(&mut self) -> Result<(), DomainError> {
        self.transition(RequestStatus::Pending, RequestStatus::Accepted, "accept")
    }

    /// 却下する（Pending → Rejected）
    pub fn reject(&mut self) -> Result<(), DomainError> {
        self.transition(RequestStatus::Pending, RequestStatus::Rejected, "reject")
    }

    fn transition(
        &mut self,
        expected: RequestStatus,
        next: RequestStatus,
        action: &'static str,
    ) -> Result<(), DomainError> {
        if self.status != expected {
            return Err(DomainError::InvalidRequestState {
                from: self.status,
                action,
            });
        }
        self.status = next;
        Ok(())
    }
}
