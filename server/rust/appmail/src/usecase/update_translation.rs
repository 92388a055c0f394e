use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entity::EmailTemplateTranslation;
use crate::domain::repository::{
    EmailTemplateRepository, EmailTemplateTranslationRepository, UniqueViolation,
};
use crate::domain::service::{
    LocaleSettings, TemplateValidationError, TemplateValidator, TranslationIntegrityError,
    TranslationIntegrityGuard,
};

#[derive(Debug, Clone, Default)]
pub struct UpdateTranslationInput {
    pub id: Uuid,
    pub locale: Option<String>,
    pub subject: Option<String>,
    pub html_template: Option<String>,
    pub text_template: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateTranslationError {
    #[error("translation not found: {0}")]
    NotFound(Uuid),

    #[error(transparent)]
    Validation(#[from] TemplateValidationError),

    #[error(transparent)]
    Integrity(#[from] TranslationIntegrityError),

    #[error("internal error: {0}")]
    Internal(String),
}

/// UpdateTranslationUseCase は翻訳を部分更新する。
/// 整合性チェックでは自身を重複判定から除外するため、変更のない再保存は常に成功する。
pub struct UpdateTranslationUseCase {
    template_repo: Arc<dyn EmailTemplateRepository>,
    translation_repo: Arc<dyn EmailTemplateTranslationRepository>,
    guard: TranslationIntegrityGuard,
    locales: Arc<LocaleSettings>,
}

impl UpdateTranslationUseCase {
    pub fn new(
        template_repo: Arc<dyn EmailTemplateRepository>,
        translation_repo: Arc<dyn EmailTemplateTranslationRepository>,
        locales: Arc<LocaleSettings>,
    ) -> Self {
        Self {
            template_repo,
            guard: TranslationIntegrityGuard::new(translation_repo.clone()),
            translation_repo,
            locales,
        }
    }

    pub async fn execute(
        &self,
        input: &UpdateTranslationInput,
    ) -> Result<EmailTemplateTranslation, UpdateTranslationError> {
        let mut translation = self
            .translation_repo
            .find_by_id(&input.id)
            .await
            .map_err(|e| UpdateTranslationError::Internal(e.to_string()))?
            .ok_or(UpdateTranslationError::NotFound(input.id))?;

        let validator = TemplateValidator::new(&self.locales);

        if let Some(ref locale) = input.locale {
            let locale = locale.trim();
            validator.validate_locale(locale)?;
            translation.locale = locale.to_string();
        }
        if let Some(ref subject) = input.subject {
            translation.content.subject = subject.clone();
        }
        if let Some(ref html) = input.html_template {
            translation.content.html_template = html.clone();
        }
        if let Some(ref text) = input.text_template {
            translation.content.text_template = text.clone();
        }
        validator.validate_content(&translation.content)?;

        // 外部キーで親の存在は保証されているが、削除と競合した場合は NotFound 扱いとする
        let parent = self
            .template_repo
            .find_by_id(&translation.parent_id)
            .await
            .map_err(|e| UpdateTranslationError::Internal(e.to_string()))?
            .ok_or(UpdateTranslationError::NotFound(input.id))?;

        self.guard.enforce(&parent, &translation, true).await?;
        translation.updated_at = chrono::Utc::now();

        self.translation_repo
            .update(&translation)
            .await
            .map_err(|e| {
                if UniqueViolation::is_in(&e) {
                    UpdateTranslationError::Integrity(
                        TranslationIntegrityError::DuplicateTranslation {
                            name: parent.name.clone(),
                            locale: translation.locale.clone(),
                        },
                    )
                } else {
                    UpdateTranslationError::Internal(e.to_string())
                }
            })?;

        Ok(translation)
    }
}
