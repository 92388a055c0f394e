use std::sync::Arc;

use handlebars::Handlebars;
use serde::Serialize;

use super::resolve_template::{ResolveTemplateError, ResolveTemplateUseCase};
use crate::domain::service::template_vars::sample_context;

#[derive(Debug, Clone, Default)]
pub struct RenderTemplateInput {
    pub name: String,
    pub locale: Option<String>,
    /// 未指定の場合はテンプレート中の変数から生成したサンプル値で描画する（プレビュー用）。
    pub context: Option<serde_json::Value>,
}

/// RenderedEmail は描画済みのメール本文。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedEmail {
    pub name: String,
    pub locale: String,
    pub subject: String,
    pub html: String,
    pub text: String,
    pub fallback: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum RenderTemplateError {
    #[error("email template does not exist: {0}")]
    TemplateNotFound(String),

    #[error("failed to render {field} of {name}: {message}")]
    Render {
        name: String,
        field: &'static str,
        message: String,
    },

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ResolveTemplateError> for RenderTemplateError {
    fn from(e: ResolveTemplateError) -> Self {
        match e {
            ResolveTemplateError::TemplateNotFound(name) => Self::TemplateNotFound(name),
            ResolveTemplateError::Internal(msg) => Self::Internal(msg),
        }
    }
}

/// RenderTemplateUseCase はテンプレートを解決し、件名・HTML・テキストを描画する。
/// HTML のみエスケープし、件名とテキストはそのまま埋め込む。
pub struct RenderTemplateUseCase {
    resolver: Arc<ResolveTemplateUseCase>,
    html_engine: Handlebars<'static>,
    plain_engine: Handlebars<'static>,
}

impl RenderTemplateUseCase {
    pub fn new(resolver: Arc<ResolveTemplateUseCase>) -> Self {
        let html_engine = Handlebars::new();
        let mut plain_engine = Handlebars::new();
        plain_engine.register_escape_fn(handlebars::no_escape);
        Self {
            resolver,
            html_engine,
            plain_engine,
        }
    }

    pub async fn execute(
        &self,
        input: &RenderTemplateInput,
    ) -> Result<RenderedEmail, RenderTemplateError> {
        let resolved = self
            .resolver
            .execute(&input.name, input.locale.as_deref())
            .await?;

        let content = resolved.content();
        let context = input
            .context
            .clone()
            .unwrap_or_else(|| sample_context(content));

        let render = |engine: &Handlebars<'static>, field: &'static str, source: &str| {
            engine
                .render_template(source, &context)
                .map_err(|e| RenderTemplateError::Render {
                    name: resolved.name().to_string(),
                    field,
                    message: e.to_string(),
                })
        };

        let subject = render(&self.plain_engine, "subject", &content.subject)?;
        let html = render(&self.html_engine, "html_template", &content.html_template)?;
        let text = render(&self.plain_engine, "text_template", &content.text_template)?;

        Ok(RenderedEmail {
            name: resolved.name().to_string(),
            locale: resolved.locale().to_string(),
            subject,
            html,
            text,
            fallback: resolved.is_fallback(),
        })
    }
}
