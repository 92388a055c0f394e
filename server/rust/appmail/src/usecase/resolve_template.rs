use std::sync::Arc;

use crate::domain::entity::ResolvedTemplate;
use crate::domain::repository::{EmailTemplateRepository, EmailTemplateTranslationRepository};
use crate::domain::service::locale::lookup_event;
use crate::domain::service::LocaleSettings;

#[derive(Debug, thiserror::Error)]
pub enum ResolveTemplateError {
    #[error("email template does not exist: {0}")]
    TemplateNotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// ResolveTemplateUseCase はテンプレート名と要求ロケールから最適なコンテンツを返す。
///
/// 主テンプレートが存在する限り失敗しない。一致する翻訳が無い場合は主テンプレートを返す。
pub struct ResolveTemplateUseCase {
    template_repo: Arc<dyn EmailTemplateRepository>,
    translation_repo: Arc<dyn EmailTemplateTranslationRepository>,
    locales: Arc<LocaleSettings>,
}

impl ResolveTemplateUseCase {
    pub fn new(
        template_repo: Arc<dyn EmailTemplateRepository>,
        translation_repo: Arc<dyn EmailTemplateTranslationRepository>,
        locales: Arc<LocaleSettings>,
    ) -> Self {
        Self {
            template_repo,
            translation_repo,
            locales,
        }
    }

    /// locale が None の場合は既定ロケールで検索する。
    pub async fn execute(
        &self,
        name: &str,
        locale: Option<&str>,
    ) -> Result<ResolvedTemplate, ResolveTemplateError> {
        let requested = locale.unwrap_or_else(|| self.locales.default_locale());
        let cleaned = self.locales.normalize(requested);

        let template = self
            .template_repo
            .find_by_name(name)
            .await
            .map_err(|e| ResolveTemplateError::Internal(e.to_string()))?
            .ok_or_else(|| ResolveTemplateError::TemplateNotFound(name.to_string()))?;

        if template.locale == cleaned {
            return Ok(ResolvedTemplate::Primary {
                template,
                fallback: false,
            });
        }

        let translation = self
            .translation_repo
            .find_by_parent_and_locale(&template.id, &cleaned)
            .await
            .map_err(|e| ResolveTemplateError::Internal(e.to_string()))?;

        if let Some(translation) = translation {
            return Ok(ResolvedTemplate::Translation {
                template,
                translation,
            });
        }

        lookup_event!(
            self.locales.lookup_log_level(),
            name = %template.name,
            requested = %requested,
            "email template lookup: could not find exact match for '{}'. Returned {}",
            requested,
            template.name
        );

        Ok(ResolvedTemplate::Primary {
            template,
            fallback: true,
        })
    }
}
