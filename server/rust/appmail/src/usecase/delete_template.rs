use std::sync::Arc;

use uuid::Uuid;

use crate::domain::repository::EmailTemplateRepository;

#[derive(Debug, thiserror::Error)]
pub enum DeleteTemplateError {
    #[error("template not found: {0}")]
    NotFound(Uuid),

    #[error("internal error: {0}")]
    Internal(String),
}

/// DeleteTemplateUseCase はテンプレートと配下の翻訳を削除する。
pub struct DeleteTemplateUseCase {
    repo: Arc<dyn EmailTemplateRepository>,
}

impl DeleteTemplateUseCase {
    pub fn new(repo: Arc<dyn EmailTemplateRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: &Uuid) -> Result<(), DeleteTemplateError> {
        let deleted = self
            .repo
            .delete(id)
            .await
            .map_err(|e| DeleteTemplateError::Internal(e.to_string()))?;

        if !deleted {
            return Err(DeleteTemplateError::NotFound(*id));
        }

        tracing::info!(template_id = %id, "email template deleted");
        Ok(())
    }
}
