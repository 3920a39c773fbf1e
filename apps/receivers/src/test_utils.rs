//! テスト用ユーティリティ
//!
//! レンダリング呼び出しを記録する [`RecordingTemplateRenderer`] と、
//! アクセスリクエストのフィクスチャを提供する。

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
};

use accessrequests_domain::{
    access_request::{AccessRequest, NewAccessRequest},
    notification::NotificationError,
    record::RecordId,
    value_objects::{Email, Justification, SenderName},
};
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use tera::Context;

use crate::usecase::TemplateRenderer;

/// 1 回のレンダリング呼び出し
#[derive(Debug, Clone)]
pub struct RenderCall {
    pub template: String,
    /// レンダリング時のコンテキスト（JSON オブジェクト）
    pub context:  JsonValue,
}

/// レンダリング呼び出しを記録するテンプレートレンダラー
///
/// 出力を設定していないテンプレートは空文字列を返す。
/// `Clone` したインスタンス同士で呼び出し履歴を共有する。
#[derive(Clone, Default)]
pub struct RecordingTemplateRenderer {
    calls:   Arc<Mutex<Vec<RenderCall>>>,
    outputs: HashMap<String, String>,
    failing: HashSet<String>,
}

impl RecordingTemplateRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// テンプレートの出力を設定する
    pub fn with_output(mut self, template: &str, output: impl Into<String>) -> Self {
        self.outputs.insert(template.to_string(), output.into());
        self
    }

    /// テンプレートのレンダリングを失敗させる
    pub fn failing(mut self, template: &str) -> Self {
        self.failing.insert(template.to_string());
        self
    }

    /// 記録されたすべての呼び出し
    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls.lock().unwrap().clone()
    }

    /// 指定テンプレートがレンダリングされたかどうか
    pub fn template_used(&self, template: &str) -> bool {
        self.render_count(template) > 0
    }

    /// 指定テンプレートのレンダリング回数
    pub fn render_count(&self, template: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.template == template)
            .count()
    }

    /// 指定テンプレートの直近の呼び出しでのコンテキスト値
    pub fn context_value(&self, template: &str, key: &str) -> Option<JsonValue> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|call| call.template == template)
            .and_then(|call| call.context.get(key).cloned())
    }

    /// 指定テンプレートの直近の呼び出しでのコンテキストのキー一覧（昇順）
    pub fn context_keys(&self, template: &str) -> Vec<String> {
        let mut keys: Vec<String> = self
            .calls
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|call| call.template == template)
            .and_then(|call| call.context.as_object().map(|o| o.keys().cloned().collect()))
            .unwrap_or_default();
        keys.sort();
        keys
    }
}

impl TemplateRenderer for RecordingTemplateRenderer {
    fn render(&self, template: &str, context: &Context) -> Result<String, NotificationError> {
        self.calls.lock().unwrap().push(RenderCall {
            template: template.to_string(),
            context:  context.clone().into_json(),
        });

        if self.failing.contains(template) {
            return Err(NotificationError::TemplateFailed(format!(
                "{template}: テスト用の失敗"
            )));
        }

        Ok(self.outputs.get(template).cloned().unwrap_or_default())
    }
}

/// テスト用のアクセスリクエストを作成する
pub fn make_request(recid: i64, now: DateTime<Utc>) -> AccessRequest {
    AccessRequest::new(NewAccessRequest {
        recid: RecordId::new(recid),
        receiver_email: Email::new("owner@example.org").unwrap(),
        sender_full_name: SenderName::new("Jane Doe").unwrap(),
        sender_email: Email::new("jane@example.org").unwrap(),
        justification: Justification::new("For my research").unwrap(),
        now,
    })
}

/// メールアドレス確認済みのアクセスリクエストを作成する
pub fn make_confirmed_request(recid: i64, now: DateTime<Utc>) -> AccessRequest {
    let mut request = make_request(recid, now);
    request.confirm_email().unwrap();
    request
}
