use std::sync::Arc;

use uuid::Uuid;

use crate::domain::repository::EmailTemplateTranslationRepository;

#[derive(Debug, thiserror::Error)]
pub enum DeleteTranslationError {
    #[error("translation not found: {0}")]
    NotFound(Uuid),

    #[error("internal error: {0}")]
    Internal(String),
}

pub struct DeleteTranslationUseCase {
    repo: Arc<dyn EmailTemplateTranslationRepository>,
}

impl DeleteTranslationUseCase {
    pub fn new(repo: Arc<dyn EmailTemplateTranslationRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: &Uuid) -> Result<(), DeleteTranslationError> {
        let deleted = self
            .repo
            .delete(id)
            .await
            .map_err(|e| DeleteTranslationError::Internal(e.to_string()))?;

        if !deleted {
            return Err(DeleteTranslationError::NotFound(*id));
        }

        tracing::info!(translation_id = %id, "email template translation deleted");
        Ok(())
    }
}
