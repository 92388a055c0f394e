use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entity::{EmailContent, EmailTemplateTranslation};
use crate::domain::repository::{
    EmailTemplateRepository, EmailTemplateTranslationRepository, UniqueViolation,
};
use crate::domain::service::{
    LocaleSettings, PlainTextConverter, TemplateValidationError, TemplateValidator,
    TranslationIntegrityError, TranslationIntegrityGuard,
};

#[derive(Debug, Clone)]
pub struct CreateTranslationInput {
    pub parent_id: Uuid,
    pub locale: String,
    pub subject: String,
    pub html_template: String,
    pub text_template: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CreateTranslationError {
    #[error("template not found: {0}")]
    TemplateNotFound(Uuid),

    #[error(transparent)]
    Validation(#[from] TemplateValidationError),

    #[error(transparent)]
    Integrity(#[from] TranslationIntegrityError),

    #[error("internal error: {0}")]
    Internal(String),
}

pub struct CreateTranslationUseCase {
    template_repo: Arc<dyn EmailTemplateRepository>,
    translation_repo: Arc<dyn EmailTemplateTranslationRepository>,
    guard: TranslationIntegrityGuard,
    locales: Arc<LocaleSettings>,
    converter: Arc<dyn PlainTextConverter>,
}

impl CreateTranslationUseCase {
    pub fn new(
        template_repo: Arc<dyn EmailTemplateRepository>,
        translation_repo: Arc<dyn EmailTemplateTranslationRepository>,
        locales: Arc<LocaleSettings>,
        converter: Arc<dyn PlainTextConverter>,
    ) -> Self {
        Self {
            template_repo,
            guard: TranslationIntegrityGuard::new(translation_repo.clone()),
            translation_repo,
            locales,
            converter,
        }
    }

    pub async fn execute(
        &self,
        input: &CreateTranslationInput,
    ) -> Result<EmailTemplateTranslation, CreateTranslationError> {
        let locale = input.locale.trim().to_string();
        let mut content = EmailContent::new(
            input.subject.clone(),
            input.html_template.clone(),
            input.text_template.clone(),
        );

        let validator = TemplateValidator::new(&self.locales);
        validator.validate_locale(&locale)?;
        validator.validate_content(&content)?;

        let parent = self
            .template_repo
            .find_by_id(&input.parent_id)
            .await
            .map_err(|e| CreateTranslationError::Internal(e.to_string()))?
            .ok_or(CreateTranslationError::TemplateNotFound(input.parent_id))?;

        content.fill_missing_text(self.converter.as_ref());
        let translation = EmailTemplateTranslation::new(parent.id, locale, content);

        if let Err(e) = self.guard.enforce(&parent, &translation, false).await {
            tracing::warn!(
                template_id = %parent.id,
                locale = %translation.locale,
                error = %e,
                "email template translation rejected"
            );
            return Err(e.into());
        }

        self.translation_repo
            .create(&translation)
            .await
            .map_err(|e| {
                if UniqueViolation::is_in(&e) {
                    CreateTranslationError::Integrity(
                        TranslationIntegrityError::DuplicateTranslation {
                            name: parent.name.clone(),
                            locale: translation.locale.clone(),
                        },
                    )
                } else {
                    CreateTranslationError::Internal(e.to_string())
                }
            })?;

        tracing::info!(
            translation_id = %translation.id,
            template_id = %parent.id,
            locale = %translation.locale,
            "email template translation created"
        );
        Ok(translation)
    }
}
