//! # テンプレートレンダラー
//!
//! tera テンプレートエンジンで通知メール本文とリンク説明文を生成する。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: ユースケースは [`TemplateRenderer`] に依存し、テストでは記録用実装に差し替える
//! - **`include_str!` によるコンパイル時埋め込み**: テンプレートはバイナリに埋め込まれる
//! - **プレーンテキスト**: `.txt` テンプレートは tera の自動エスケープ対象外

use accessrequests_domain::notification::NotificationError;
use tera::{Context, Tera};

/// テンプレート識別子
pub mod templates {
    /// メールアドレス確認依頼（申請者宛て）
    pub const VALIDATE_EMAIL: &str = "accessrequests/emails/validate_email.txt";
    /// 新規アクセス申請の通知（所有者宛て）
    pub const NEW_REQUEST: &str = "accessrequests/emails/new_request.txt";
    /// 申請受付の確認（申請者宛て）
    pub const CONFIRMATION: &str = "accessrequests/emails/confirmation.txt";
    /// 承認通知（申請者宛て）
    pub const ACCEPTED: &str = "accessrequests/emails/accepted.txt";
    /// 却下通知（申請者宛て）
    pub const REJECTED: &str = "accessrequests/emails/rejected.txt";
    /// シークレットリンクの説明文
    pub const LINK_DESCRIPTION: &str = "accessrequests/link_description.txt";
}

/// テンプレートレンダラートレイト
pub trait TemplateRenderer: Send + Sync {
    /// テンプレートをコンテキストでレンダリングする
    fn render(&self, template: &str, context: &Context) -> Result<String, NotificationError>;
}

/// tera 実装のテンプレートレンダラー
pub struct TeraTemplateRenderer {
    engine: Tera,
}

impl TeraTemplateRenderer {
    /// 埋め込みテンプレートを登録したレンダラーを作成する
    pub fn new() -> Result<Self, NotificationError> {
        let mut engine = Tera::default();

        engine
            .add_raw_templates(vec![
                (
                    templates::VALIDATE_EMAIL,
                    include_str!("../../../templates/accessrequests/emails/validate_email.txt"),
                ),
                (
                    templates::NEW_REQUEST,
                    include_str!("../../../templates/accessrequests/emails/new_request.txt"),
                ),
                (
                    templates::CONFIRMATION,
                    include_str!("../../../templates/accessrequests/emails/confirmation.txt"),
                ),
                (
                    templates::ACCEPTED,
                    include_str!("../../../templates/accessrequests/emails/accepted.txt"),
                ),
                (
                    templates::REJECTED,
                    include_str!("../../../templates/accessrequests/emails/rejected.txt"),
                ),
                (
                    templates::LINK_DESCRIPTION,
                    include_str!("../../../templates/accessrequests/link_description.txt"),
                ),
            ])
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(Self { engine })
    }
}

impl TemplateRenderer for TeraTemplateRenderer {
    fn render(&self, template: &str, context: &Context) -> Result<String, NotificationError> {
        self.engine
            .render(template, context)
            .map_err(|e| NotificationError::TemplateFailed(format!("{template}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn make_context() -> Context {
        let mut context = Context::new();
        context.insert(
            "request",
            &json!({
                "sender_full_name": "Jane Doe",
                "sender_email": "jane@example.org",
                "justification": "For my research",
            }),
        );
        context.insert("record", &json!({ "recid": 1, "title": "Record Title" }));
        context
    }

    #[test]
    fn newが正常に初期化される() {
        assert!(TeraTemplateRenderer::new().is_ok());
    }

    #[test]
    fn link_descriptionに申請者とレコードタイトルが含まれる() {
        let renderer = TeraTemplateRenderer::new().unwrap();

        let description = renderer
            .render(templates::LINK_DESCRIPTION, &make_context())
            .unwrap();

        assert_eq!(
            description,
            "Access request from Jane Doe (jane@example.org) for \"Record Title\"."
        );
    }

    #[test]
    fn new_requestに申請理由が含まれる() {
        let renderer = TeraTemplateRenderer::new().unwrap();

        let body = renderer
            .render(templates::NEW_REQUEST, &make_context())
            .unwrap();

        assert!(body.contains("Jane Doe (jane@example.org)"));
        assert!(body.contains("For my research"));
        assert!(body.contains("\"Record Title\""));
    }

    #[test]
    fn acceptedでmessageなしの場合はメッセージ欄を出さない() {
        let renderer = TeraTemplateRenderer::new().unwrap();
        let mut context = make_context();
        context.insert("message", &Option::<String>::None);
        context.insert("expires_at", &Option::<String>::None);
        context.insert("record_link", "http://localhost:5000/records/1?token=abc");

        let body = renderer.render(templates::ACCEPTED, &context).unwrap();

        assert!(!body.contains("Message from the owner"));
        assert!(body.contains("http://localhost:5000/records/1?token=abc"));
        assert!(body.contains("The link does not expire."));
    }

    #[test]
    fn acceptedでmessageと有効期限ありの場合は両方を出す() {
        let renderer = TeraTemplateRenderer::new().unwrap();
        let mut context = make_context();
        context.insert("message", "Enjoy the data");
        context.insert("expires_at", "2030-01-31");
        context.insert("record_link", "http://localhost:5000/records/1?token=abc");

        let body = renderer.render(templates::ACCEPTED, &context).unwrap();

        assert!(body.contains("Message from the owner:"));
        assert!(body.contains("Enjoy the data"));
        assert!(body.contains("The link expires on 2030-01-31."));
    }

    #[test]
    fn validate_emailに確認リンクと日数が含まれる() {
        let renderer = TeraTemplateRenderer::new().unwrap();
        let mut context = make_context();
        context.insert("confirm_link", "http://localhost:5000/records/1/accessrequest/xyz");
        context.insert("days", &1);

        let body = renderer
            .render(templates::VALIDATE_EMAIL, &context)
            .unwrap();

        assert!(body.contains("http://localhost:5000/records/1/accessrequest/xyz"));
        assert!(body.contains("valid for 1 day."));
    }

    #[test]
    fn 未登録のテンプレートはtemplate_failedを返す() {
        let renderer = TeraTemplateRenderer::new().unwrap();

        let result = renderer.render("accessrequests/unknown.txt", &Context::new());

        assert!(matches!(result, Err(NotificationError::TemplateFailed(_))));
    }
}
