use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entity::EmailTemplate;
use crate::domain::repository::{
    EmailTemplateRepository, EmailTemplateTranslationRepository, UniqueViolation,
};
use crate::domain::service::{LocaleSettings, TemplateValidationError, TemplateValidator};

#[derive(Debug, Clone, Default)]
pub struct UpdateTemplateInput {
    pub id: Uuid,
    pub name: Option<String>,
    pub locale: Option<String>,
    pub subject: Option<String>,
    pub html_template: Option<String>,
    pub text_template: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateTemplateError {
    #[error("template not found: {0}")]
    NotFound(Uuid),

    #[error("template already exists: {0}")]
    NameConflict(String),

    #[error("a translation already uses locale {locale} for {name}")]
    LocaleConflict { name: String, locale: String },

    #[error(transparent)]
    Validation(#[from] TemplateValidationError),

    #[error("internal error: {0}")]
    Internal(String),
}

/// UpdateTemplateUseCase はテンプレートを部分更新する。
/// プレーンテキスト本文の自動生成は初回作成時のみで、更新時には行わない。
pub struct UpdateTemplateUseCase {
    repo: Arc<dyn EmailTemplateRepository>,
    translation_repo: Arc<dyn EmailTemplateTranslationRepository>,
    locales: Arc<LocaleSettings>,
}

impl UpdateTemplateUseCase {
    pub fn new(
        repo: Arc<dyn EmailTemplateRepository>,
        translation_repo: Arc<dyn EmailTemplateTranslationRepository>,
        locales: Arc<LocaleSettings>,
    ) -> Self {
        Self {
            repo,
            translation_repo,
            locales,
        }
    }

    pub async fn execute(
        &self,
        input: &UpdateTemplateInput,
    ) -> Result<EmailTemplate, UpdateTemplateError> {
        let mut template = self
            .repo
            .find_by_id(&input.id)
            .await
            .map_err(|e| UpdateTemplateError::Internal(e.to_string()))?
            .ok_or(UpdateTemplateError::NotFound(input.id))?;

        let validator = TemplateValidator::new(&self.locales);

        if let Some(ref name) = input.name {
            if *name != template.name {
                validator.validate_name(name)?;
                let taken = self
                    .repo
                    .find_by_name(name)
                    .await
                    .map_err(|e| UpdateTemplateError::Internal(e.to_string()))?
                    .is_some_and(|other| other.id != template.id);
                if taken {
                    return Err(UpdateTemplateError::NameConflict(name.clone()));
                }
                template.name = name.clone();
            }
        }

        if let Some(ref locale) = input.locale {
            let locale = locale.trim();
            if locale != template.locale {
                validator.validate_locale(locale)?;
                // 親のロケールは翻訳のロケールと重複してはならない
                let used = self
                    .translation_repo
                    .exists_for_parent_and_locale(&template.id, locale, None)
                    .await
                    .map_err(|e| UpdateTemplateError::Internal(e.to_string()))?;
                if used {
                    tracing::warn!(
                        template_id = %template.id,
                        locale = %locale,
                        "template locale collides with an existing translation"
                    );
                    return Err(UpdateTemplateError::LocaleConflict {
                        name: template.name.clone(),
                        locale: locale.to_string(),
                    });
                }
                template.locale = locale.to_string();
            }
        }

        if let Some(ref subject) = input.subject {
            template.content.subject = subject.clone();
        }
        if let Some(ref html) = input.html_template {
            template.content.html_template = html.clone();
        }
        if let Some(ref text) = input.text_template {
            template.content.text_template = text.clone();
        }
        validator.validate_content(&template.content)?;
        template.updated_at = chrono::Utc::now();

        self.repo.update(&template).await.map_err(|e| {
            if UniqueViolation::is_in(&e) {
                UpdateTemplateError::NameConflict(template.name.clone())
            } else {
                UpdateTemplateError::Internal(e.to_string())
            }
        })?;

        Ok(template)
    }
}
