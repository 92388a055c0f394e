pub mod error;
pub mod lookup_handler;
pub mod template_handler;

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::domain::repository::{EmailTemplateRepository, EmailTemplateTranslationRepository};
use crate::domain::service::{LocaleSettings, PlainTextConverter};
use crate::usecase::{
    CreateTemplateUseCase, CreateTranslationUseCase, DeleteTemplateUseCase,
    DeleteTranslationUseCase, GetTemplateUseCase, ListTemplatesUseCase, ListTranslationsUseCase,
    RenderTemplateUseCase, ResolveTemplateUseCase, UpdateTemplateUseCase,
    UpdateTranslationUseCase,
};

/// AppState はアプリケーション全体の共有状態を表す。
#[derive(Clone)]
pub struct AppState {
    pub create_template_uc: Arc<CreateTemplateUseCase>,
    pub get_template_uc: Arc<GetTemplateUseCase>,
    pub list_templates_uc: Arc<ListTemplatesUseCase>,
    pub update_template_uc: Arc<UpdateTemplateUseCase>,
    pub delete_template_uc: Arc<DeleteTemplateUseCase>,
    pub list_translations_uc: Arc<ListTranslationsUseCase>,
    pub create_translation_uc: Arc<CreateTranslationUseCase>,
    pub update_translation_uc: Arc<UpdateTranslationUseCase>,
    pub delete_translation_uc: Arc<DeleteTranslationUseCase>,
    pub resolve_template_uc: Arc<ResolveTemplateUseCase>,
    pub render_template_uc: Arc<RenderTemplateUseCase>,
    pub locales: Arc<LocaleSettings>,
}

impl AppState {
    /// リポジトリとロケール設定から全ユースケースを組み立てる。
    pub fn new(
        template_repo: Arc<dyn EmailTemplateRepository>,
        translation_repo: Arc<dyn EmailTemplateTranslationRepository>,
        locales: Arc<LocaleSettings>,
        converter: Arc<dyn PlainTextConverter>,
    ) -> Self {
        let resolve_template_uc = Arc::new(ResolveTemplateUseCase::new(
            template_repo.clone(),
            translation_repo.clone(),
            locales.clone(),
        ));

        Self {
            create_template_uc: Arc::new(CreateTemplateUseCase::new(
                template_repo.clone(),
                locales.clone(),
                converter.clone(),
            )),
            get_template_uc: Arc::new(GetTemplateUseCase::new(template_repo.clone())),
            list_templates_uc: Arc::new(ListTemplatesUseCase::new(template_repo.clone())),
            update_template_uc: Arc::new(UpdateTemplateUseCase::new(
                template_repo.clone(),
                translation_repo.clone(),
                locales.clone(),
            )),
            delete_template_uc: Arc::new(DeleteTemplateUseCase::new(template_repo.clone())),
            list_translations_uc: Arc::new(ListTranslationsUseCase::new(
                template_repo.clone(),
                translation_repo.clone(),
            )),
            create_translation_uc: Arc::new(CreateTranslationUseCase::new(
                template_repo.clone(),
                translation_repo.clone(),
                locales.clone(),
                converter,
            )),
            update_translation_uc: Arc::new(UpdateTranslationUseCase::new(
                template_repo,
                translation_repo.clone(),
                locales.clone(),
            )),
            delete_translation_uc: Arc::new(DeleteTranslationUseCase::new(translation_repo)),
            render_template_uc: Arc::new(RenderTemplateUseCase::new(resolve_template_uc.clone())),
            resolve_template_uc,
            locales,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        lookup_handler::healthz,
        lookup_handler::readyz,
        lookup_handler::list_locales,
        lookup_handler::resolve_template,
        lookup_handler::render_template,
        template_handler::list_templates,
        template_handler::create_template,
        template_handler::get_template,
        template_handler::update_template,
        template_handler::delete_template,
        template_handler::list_translations,
        template_handler::create_translation,
        template_handler::update_translation,
        template_handler::delete_translation,
    ),
    components(schemas(
        template_handler::CreateTemplateRequest,
        template_handler::UpdateTemplateRequest,
        template_handler::CreateTranslationRequest,
        template_handler::UpdateTranslationRequest,
        template_handler::TemplateResponse,
        template_handler::ListTemplatesResponse,
        template_handler::TranslationResponse,
        template_handler::ListTranslationsResponse,
        lookup_handler::ResolvedTemplateResponse,
        lookup_handler::RenderRequest,
        lookup_handler::RenderedEmailResponse,
        lookup_handler::LanguageResponse,
        lookup_handler::ListLocalesResponse,
    )),
)]
struct ApiDoc;

/// REST API ルーターを構築する。
pub fn router(state: AppState) -> Router {
    Router::new()
        // Health / Readiness
        .route("/healthz", get(lookup_handler::healthz))
        .route("/readyz", get(lookup_handler::readyz))
        // Template endpoints
        .route(
            "/api/v1/templates",
            get(template_handler::list_templates).post(template_handler::create_template),
        )
        .route(
            "/api/v1/templates/{id}",
            get(template_handler::get_template)
                .put(template_handler::update_template)
                .delete(template_handler::delete_template),
        )
        // Translation endpoints
        .route(
            "/api/v1/templates/{id}/translations",
            get(template_handler::list_translations).post(template_handler::create_translation),
        )
        .route(
            "/api/v1/translations/{id}",
            put(template_handler::update_translation).delete(template_handler::delete_translation),
        )
        // Lookup endpoints
        .route("/api/v1/locales", get(lookup_handler::list_locales))
        .route("/api/v1/resolve/{name}", get(lookup_handler::resolve_template))
        .route("/api/v1/render/{name}", post(lookup_handler::render_template))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// ErrorResponse は統一エラーレスポンス。
#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, serde::Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub request_id: String,
    pub details: Vec<String>,
}

impl ErrorResponse {
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            error: ErrorBody {
                code: code.to_string(),
                message: message.to_string(),
                request_id: uuid::Uuid::new_v4().to_string(),
                details: vec![],
            },
        }
    }
}
