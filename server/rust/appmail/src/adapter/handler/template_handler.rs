use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::AppmailError;
use super::AppState;
use crate::domain::entity::{EmailTemplate, EmailTemplateTranslation};
use crate::usecase::{
    CreateTemplateInput, CreateTranslationInput, UpdateTemplateInput, UpdateTranslationInput,
};

// --- Request / Response DTOs ---

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateTemplateRequest {
    pub name: String,
    /// 省略時はテンプレートの既定ロケール
    pub locale: Option<String>,
    pub subject: String,
    pub html_template: String,
    /// 空の場合は html_template から生成される
    #[serde(default)]
    pub text_template: String,
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct UpdateTemplateRequest {
    pub name: Option<String>,
    pub locale: Option<String>,
    pub subject: Option<String>,
    pub html_template: Option<String>,
    pub text_template: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateTranslationRequest {
    pub locale: String,
    pub subject: String,
    pub html_template: String,
    #[serde(default)]
    pub text_template: String,
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct UpdateTranslationRequest {
    pub locale: Option<String>,
    pub subject: Option<String>,
    pub html_template: Option<String>,
    pub text_template: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct TemplateResponse {
    pub id: String,
    pub name: String,
    pub locale: String,
    pub subject: String,
    pub html_template: String,
    pub text_template: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<EmailTemplate> for TemplateResponse {
    fn from(t: EmailTemplate) -> Self {
        Self {
            id: t.id.to_string(),
            name: t.name,
            locale: t.locale,
            subject: t.content.subject,
            html_template: t.content.html_template,
            text_template: t.content.text_template,
            created_at: t.created_at.to_rfc3339(),
            updated_at: t.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ListTemplatesResponse {
    pub templates: Vec<TemplateResponse>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct TranslationResponse {
    pub id: String,
    pub parent_id: String,
    pub locale: String,
    pub subject: String,
    pub html_template: String,
    pub text_template: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<EmailTemplateTranslation> for TranslationResponse {
    fn from(t: EmailTemplateTranslation) -> Self {
        Self {
            id: t.id.to_string(),
            parent_id: t.parent_id.to_string(),
            locale: t.locale,
            subject: t.content.subject,
            html_template: t.content.html_template,
            text_template: t.content.text_template,
            created_at: t.created_at.to_rfc3339(),
            updated_at: t.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ListTranslationsResponse {
    pub translations: Vec<TranslationResponse>,
}

// --- Template handlers ---

#[utoipa::path(
    get,
    path = "/api/v1/templates",
    responses(
        (status = 200, description = "Template list", body = ListTemplatesResponse),
    )
)]
pub async fn list_templates(
    State(state): State<AppState>,
) -> Result<Json<ListTemplatesResponse>, AppmailError> {
    let templates = state.list_templates_uc.execute().await?;
    Ok(Json(ListTemplatesResponse {
        templates: templates.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/templates",
    request_body = CreateTemplateRequest,
    responses(
        (status = 201, description = "Template created", body = TemplateResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Name already in use"),
    )
)]
pub async fn create_template(
    State(state): State<AppState>,
    Json(req): Json<CreateTemplateRequest>,
) -> Result<(StatusCode, Json<TemplateResponse>), AppmailError> {
    let input = CreateTemplateInput {
        name: req.name,
        locale: req.locale,
        subject: req.subject,
        html_template: req.html_template,
        text_template: req.text_template,
    };
    let template = state.create_template_uc.execute(&input).await?;
    Ok((StatusCode::CREATED, Json(template.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/templates/{id}",
    params(("id" = String, Path, description = "Template ID")),
    responses(
        (status = 200, description = "Template found", body = TemplateResponse),
        (status = 404, description = "Template not found"),
    )
)]
pub async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TemplateResponse>, AppmailError> {
    let template = state.get_template_uc.execute(&id).await?;
    Ok(Json(template.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/templates/{id}",
    params(("id" = String, Path, description = "Template ID")),
    request_body = UpdateTemplateRequest,
    responses(
        (status = 200, description = "Template updated", body = TemplateResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Template not found"),
        (status = 409, description = "Name or locale conflict"),
    )
)]
pub async fn update_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTemplateRequest>,
) -> Result<Json<TemplateResponse>, AppmailError> {
    let input = UpdateTemplateInput {
        id,
        name: req.name,
        locale: req.locale,
        subject: req.subject,
        html_template: req.html_template,
        text_template: req.text_template,
    };
    let template = state.update_template_uc.execute(&input).await?;
    Ok(Json(template.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/templates/{id}",
    params(("id" = String, Path, description = "Template ID")),
    responses(
        (status = 204, description = "Template and its translations deleted"),
        (status = 404, description = "Template not found"),
    )
)]
pub async fn delete_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppmailError> {
    state.delete_template_uc.execute(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// --- Translation handlers ---

#[utoipa::path(
    get,
    path = "/api/v1/templates/{id}/translations",
    params(("id" = String, Path, description = "Parent template ID")),
    responses(
        (status = 200, description = "Translation list", body = ListTranslationsResponse),
        (status = 404, description = "Template not found"),
    )
)]
pub async fn list_translations(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ListTranslationsResponse>, AppmailError> {
    let translations = state.list_translations_uc.execute(&id).await?;
    Ok(Json(ListTranslationsResponse {
        translations: translations.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/templates/{id}/translations",
    params(("id" = String, Path, description = "Parent template ID")),
    request_body = CreateTranslationRequest,
    responses(
        (status = 201, description = "Translation created", body = TranslationResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Template not found"),
        (status = 409, description = "Duplicate or same-as-parent locale"),
    )
)]
pub async fn create_translation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<CreateTranslationRequest>,
) -> Result<(StatusCode, Json<TranslationResponse>), AppmailError> {
    let input = CreateTranslationInput {
        parent_id: id,
        locale: req.locale,
        subject: req.subject,
        html_template: req.html_template,
        text_template: req.text_template,
    };
    let translation = state.create_translation_uc.execute(&input).await?;
    Ok((StatusCode::CREATED, Json(translation.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/translations/{id}",
    params(("id" = String, Path, description = "Translation ID")),
    request_body = UpdateTranslationRequest,
    responses(
        (status = 200, description = "Translation updated", body = TranslationResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Translation not found"),
        (status = 409, description = "Duplicate or same-as-parent locale"),
    )
)]
pub async fn update_translation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTranslationRequest>,
) -> Result<Json<TranslationResponse>, AppmailError> {
    let input = UpdateTranslationInput {
        id,
        locale: req.locale,
        subject: req.subject,
        html_template: req.html_template,
        text_template: req.text_template,
    };
    let translation = state.update_translation_uc.execute(&input).await?;
    Ok(Json(translation.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/translations/{id}",
    params(("id" = String, Path, description = "Translation ID")),
    responses(
        (status = 204, description = "Translation deleted"),
        (status = 404, description = "Translation not found"),
    )
)]
pub async fn delete_translation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppmailError> {
    state.delete_translation_uc.execute(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
