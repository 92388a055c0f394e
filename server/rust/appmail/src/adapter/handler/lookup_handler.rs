use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::error::AppmailError;
use super::AppState;
use crate::domain::entity::ResolvedTemplate;
use crate::usecase::{RenderTemplateInput, RenderedEmail};

// --- Request / Response DTOs ---

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    pub locale: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ResolvedTemplateResponse {
    pub name: String,
    /// 実際に返したコンテンツのロケール
    pub locale: String,
    pub subject: String,
    pub html_template: String,
    pub text_template: String,
    pub translation: bool,
    /// 要求ロケールに一致せず主テンプレートを返した場合に true
    pub fallback: bool,
}

impl From<ResolvedTemplate> for ResolvedTemplateResponse {
    fn from(r: ResolvedTemplate) -> Self {
        let content = r.content().clone();
        Self {
            name: r.name().to_string(),
            locale: r.locale().to_string(),
            subject: content.subject,
            html_template: content.html_template,
            text_template: content.text_template,
            translation: r.is_translation(),
            fallback: r.is_fallback(),
        }
    }
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct RenderRequest {
    pub locale: Option<String>,
    /// 省略時はテンプレート変数から生成したサンプル値で描画する
    pub context: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct RenderedEmailResponse {
    pub name: String,
    pub locale: String,
    pub subject: String,
    pub html: String,
    pub text: String,
    pub fallback: bool,
}

impl From<RenderedEmail> for RenderedEmailResponse {
    fn from(r: RenderedEmail) -> Self {
        Self {
            name: r.name,
            locale: r.locale,
            subject: r.subject,
            html: r.html,
            text: r.text,
            fallback: r.fallback,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct LanguageResponse {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ListLocalesResponse {
    pub default_locale: String,
    pub languages: Vec<LanguageResponse>,
}

// --- Handlers ---

#[utoipa::path(get, path = "/healthz", responses((status = 200, description = "Health check OK")))]
pub async fn healthz() -> &'static str {
    "ok"
}

#[utoipa::path(get, path = "/readyz", responses((status = 200, description = "Ready")))]
pub async fn readyz() -> &'static str {
    "ok"
}

#[utoipa::path(
    get,
    path = "/api/v1/locales",
    responses(
        (status = 200, description = "Supported locales", body = ListLocalesResponse),
    )
)]
pub async fn list_locales(State(state): State<AppState>) -> Json<ListLocalesResponse> {
    Json(ListLocalesResponse {
        default_locale: state.locales.template_default_locale().to_string(),
        languages: state
            .locales
            .languages()
            .into_iter()
            .map(|l| LanguageResponse {
                code: l.code,
                name: l.name,
            })
            .collect(),
    })
}

#[utoipa::path(
    get,
    path = "/api/v1/resolve/{name}",
    params(
        ("name" = String, Path, description = "Template name"),
        ("locale" = Option<String>, Query, description = "Requested locale, e.g. en_GB"),
    ),
    responses(
        (status = 200, description = "Best matching content", body = ResolvedTemplateResponse),
        (status = 404, description = "Template not found"),
    )
)]
pub async fn resolve_template(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<ResolveQuery>,
) -> Result<Json<ResolvedTemplateResponse>, AppmailError> {
    let resolved = state
        .resolve_template_uc
        .execute(&name, query.locale.as_deref())
        .await?;
    Ok(Json(resolved.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/render/{name}",
    params(("name" = String, Path, description = "Template name")),
    request_body = RenderRequest,
    responses(
        (status = 200, description = "Rendered email", body = RenderedEmailResponse),
        (status = 404, description = "Template not found"),
        (status = 422, description = "Template could not be rendered"),
    )
)]
pub async fn render_template(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(req): Json<RenderRequest>,
) -> Result<Json<RenderedEmailResponse>, AppmailError> {
    let input = RenderTemplateInput {
        name,
        locale: req.locale,
        context: req.context,
    };
    let rendered = state.render_template_uc.execute(&input).await?;
    Ok(Json(rendered.into()))
}
