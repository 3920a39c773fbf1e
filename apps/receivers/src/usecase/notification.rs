//! # 通知ユースケース
//!
//! アクセスリクエストに伴うメール通知の生成・送信を担う。
//!
//! ## モジュール構成
//!
//! - [`template_renderer`] - tera テンプレートエンジンによる本文生成
//! - [`service`] - テンプレートレンダリング + 送信の統合サービス

pub mod service;
pub mod template_renderer;

pub use service::NotificationService;
pub use template_renderer::{TemplateRenderer, TeraTemplateRenderer, templates};
