use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entity::EmailTemplateTranslation;
use crate::domain::repository::{EmailTemplateRepository, EmailTemplateTranslationRepository};

#[derive(Debug, thiserror::Error)]
pub enum ListTranslationsError {
    #[error("template not found: {0}")]
    TemplateNotFound(Uuid),

    #[error("internal error: {0}")]
    Internal(String),
}

/// ListTranslationsUseCase は親テンプレート配下の翻訳をロケール順で返す。
pub struct ListTranslationsUseCase {
    template_repo: Arc<dyn EmailTemplateRepository>,
    translation_repo: Arc<dyn EmailTemplateTranslationRepository>,
}

impl ListTranslationsUseCase {
    pub fn new(
        template_repo: Arc<dyn EmailTemplateRepository>,
        translation_repo: Arc<dyn EmailTemplateTranslationRepository>,
    ) -> Self {
        Self {
            template_repo,
            translation_repo,
        }
    }

    pub async fn execute(
        &self,
        parent_id: &Uuid,
    ) -> Result<Vec<EmailTemplateTranslation>, ListTranslationsError> {
        self.template_repo
            .find_by_id(parent_id)
            .await
            .map_err(|e| ListTranslationsError::Internal(e.to_string()))?
            .ok_or(ListTranslationsError::TemplateNotFound(*parent_id))?;

        self.translation_repo
            .find_by_parent(parent_id)
            .await
            .map_err(|e| ListTranslationsError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::{EmailContent, EmailTemplate};
    use crate::domain::repository::email_template_repository::MockEmailTemplateRepository;
    use crate::domain::repository::email_template_translation_repository::MockEmailTemplateTranslationRepository;

    #[tokio::test]
    async fn success() {
        let parent = EmailTemplate::new("welcome".to_string(), "en".to_string(), EmailContent::default());
        let parent_id = parent.id;

        let mut templates = MockEmailTemplateRepository::new();
        templates
            .expect_find_by_id()
            .returning(move |_| Ok(Some(parent.clone())));

        let mut translations = MockEmailTemplateTranslationRepository::new();
        translations
            .expect_find_by_parent()
            .withf(move |id| *id == parent_id)
            .returning(move |id| {
                Ok(vec![
                    EmailTemplateTranslation::new(*id, "de".to_string(), EmailContent::default()),
                    EmailTemplateTranslation::new(*id, "en-gb".to_string(), EmailContent::default()),
                ])
            });

        let uc = ListTranslationsUseCase::new(Arc::new(templates), Arc::new(translations));
        let result = uc.execute(&parent_id).await.unwrap();
        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn parent_not_found() {
        let mut templates = MockEmailTemplateRepository::new();
        templates.expect_find_by_id().returning(|_| Ok(None));

        let uc = ListTranslationsUseCase::new(
            Arc::new(templates),
            Arc::new(MockEmailTemplateTranslationRepository::new()),
        );
        assert!(matches!(
            uc.execute(&Uuid::new_v4()).await,
            Err(ListTranslationsError::TemplateNotFound(_))
        ));
    }
}
