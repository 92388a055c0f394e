use std::sync::Arc;

use crate::domain::entity::EmailTemplate;
use crate::domain::repository::EmailTemplateRepository;

#[derive(Debug, thiserror::Error)]
pub enum ListTemplatesError {
    #[error("internal error: {0}")]
    Internal(String),
}

pub struct ListTemplatesUseCase {
    repo: Arc<dyn EmailTemplateRepository>,
}

impl ListTemplatesUseCase {
    pub fn new(repo: Arc<dyn EmailTemplateRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> Result<Vec<EmailTemplate>, ListTemplatesError> {
        self.repo
            .find_all()
            .await
            .map_err(|e| ListTemplatesError::Internal(e.to_string()))
    }
}
