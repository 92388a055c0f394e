use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::ErrorResponse;
use crate::domain::service::TranslationIntegrityError;
use crate::usecase::{
    CreateTemplateError, CreateTranslationError, DeleteTemplateError, DeleteTranslationError,
    GetTemplateError, ListTemplatesError, ListTranslationsError, RenderTemplateError,
    ResolveTemplateError, UpdateTemplateError, UpdateTranslationError,
};

/// AppmailError は REST ハンドラのエラー型。
#[derive(Debug, thiserror::Error)]
pub enum AppmailError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unprocessable(String),

    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for AppmailError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppmailError::NotFound(msg) => (StatusCode::NOT_FOUND, "APPMAIL_NOT_FOUND", msg.as_str()),
            AppmailError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                "APPMAIL_VALIDATION_ERROR",
                msg.as_str(),
            ),
            AppmailError::Conflict(msg) => (StatusCode::CONFLICT, "APPMAIL_CONFLICT", msg.as_str()),
            AppmailError::Unprocessable(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "APPMAIL_RENDER_ERROR",
                msg.as_str(),
            ),
            AppmailError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "APPMAIL_INTERNAL_ERROR",
                    msg.as_str(),
                )
            }
        };

        let body = ErrorResponse::new(code, message);
        (status, Json(body)).into_response()
    }
}

impl From<TranslationIntegrityError> for AppmailError {
    fn from(e: TranslationIntegrityError) -> Self {
        match e {
            TranslationIntegrityError::Internal(msg) => AppmailError::Internal(msg),
            other => AppmailError::Conflict(other.to_string()),
        }
    }
}

impl From<CreateTemplateError> for AppmailError {
    fn from(e: CreateTemplateError) -> Self {
        match e {
            CreateTemplateError::NameConflict(_) => AppmailError::Conflict(e.to_string()),
            CreateTemplateError::Validation(_) => AppmailError::Validation(e.to_string()),
            CreateTemplateError::Internal(msg) => AppmailError::Internal(msg),
        }
    }
}

impl From<GetTemplateError> for AppmailError {
    fn from(e: GetTemplateError) -> Self {
        match e {
            GetTemplateError::NotFound(_) => AppmailError::NotFound(e.to_string()),
            GetTemplateError::Internal(msg) => AppmailError::Internal(msg),
        }
    }
}

impl From<ListTemplatesError> for AppmailError {
    fn from(e: ListTemplatesError) -> Self {
        match e {
            ListTemplatesError::Internal(msg) => AppmailError::Internal(msg),
        }
    }
}

impl From<UpdateTemplateError> for AppmailError {
    fn from(e: UpdateTemplateError) -> Self {
        match e {
            UpdateTemplateError::NotFound(_) => AppmailError::NotFound(e.to_string()),
            UpdateTemplateError::NameConflict(_) | UpdateTemplateError::LocaleConflict { .. } => {
                AppmailError::Conflict(e.to_string())
            }
            UpdateTemplateError::Validation(_) => AppmailError::Validation(e.to_string()),
            UpdateTemplateError::Internal(msg) => AppmailError::Internal(msg),
        }
    }
}

impl From<DeleteTemplateError> for AppmailError {
    fn from(e: DeleteTemplateError) -> Self {
        match e {
            DeleteTemplateError::NotFound(_) => AppmailError::NotFound(e.to_string()),
            DeleteTemplateError::Internal(msg) => AppmailError::Internal(msg),
        }
    }
}

impl From<ListTranslationsError> for AppmailError {
    fn from(e: ListTranslationsError) -> Self {
        match e {
            ListTranslationsError::TemplateNotFound(_) => AppmailError::NotFound(e.to_string()),
            ListTranslationsError::Internal(msg) => AppmailError::Internal(msg),
        }
    }
}

impl From<CreateTranslationError> for AppmailError {
    fn from(e: CreateTranslationError) -> Self {
        match e {
            CreateTranslationError::TemplateNotFound(_) => AppmailError::NotFound(e.to_string()),
            CreateTranslationError::Validation(_) => AppmailError::Validation(e.to_string()),
            CreateTranslationError::Integrity(inner) => inner.into(),
            CreateTranslationError::Internal(msg) => AppmailError::Internal(msg),
        }
    }
}

impl From<UpdateTranslationError> for AppmailError {
    fn from(e: UpdateTranslationError) -> Self {
        match e {
            UpdateTranslationError::NotFound(_) => AppmailError::NotFound(e.to_string()),
            UpdateTranslationError::Validation(_) => AppmailError::Validation(e.to_string()),
            UpdateTranslationError::Integrity(inner) => inner.into(),
            UpdateTranslationError::Internal(msg) => AppmailError::Internal(msg),
        }
    }
}

impl From<DeleteTranslationError> for AppmailError {
    fn from(e: DeleteTranslationError) -> Self {
        match e {
            DeleteTranslationError::NotFound(_) => AppmailError::NotFound(e.to_string()),
            DeleteTranslationError::Internal(msg) => AppmailError::Internal(msg),
        }
    }
}

impl From<ResolveTemplateError> for AppmailError {
    fn from(e: ResolveTemplateError) -> Self {
        match e {
            ResolveTemplateError::TemplateNotFound(_) => AppmailError::NotFound(e.to_string()),
            ResolveTemplateError::Internal(msg) => AppmailError::Internal(msg),
        }
    }
}

impl From<RenderTemplateError> for AppmailError {
    fn from(e: RenderTemplateError) -> Self {
        match e {
            RenderTemplateError::TemplateNotFound(_) => AppmailError::NotFound(e.to_string()),
            RenderTemplateError::Render { .. } => AppmailError::Unprocessable(e.to_string()),
            RenderTemplateError::Internal(msg) => AppmailError::Internal(msg),
        }
    }
}
