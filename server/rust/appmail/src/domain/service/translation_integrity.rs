use std::sync::Arc;

use crate::domain::entity::{EmailTemplate, EmailTemplateTranslation};
use crate::domain::repository::EmailTemplateTranslationRepository;

/// TranslationIntegrityError は翻訳保存前の整合性チェックのエラー。
#[derive(Debug, thiserror::Error)]
pub enum TranslationIntegrityError {
    #[error("translation already exists for {name}:{locale}")]
    DuplicateTranslation { name: String, locale: String },

    #[error("translation cannot use the same locale as its parent: {name}:{locale}")]
    SameLocaleAsParent { name: String, locale: String },

    #[error("internal error: {0}")]
    Internal(String),
}

/// TranslationIntegrityGuard は (親テンプレート, ロケール) の一意性と、
/// 翻訳が親と同じロケールを持たないことを保存前に検証する。
///
/// 存在確認と書き込みの間に競合が起こりうるため、最終的な保証はストレージの一意制約が担う。
pub struct TranslationIntegrityGuard {
    repo: Arc<dyn EmailTemplateTranslationRepository>,
}

impl TranslationIntegrityGuard {
    pub fn new(repo: Arc<dyn EmailTemplateTranslationRepository>) -> Self {
        Self { repo }
    }

    /// is_update が true の場合は translation 自身を重複判定から除外する。
    pub async fn enforce(
        &self,
        parent: &EmailTemplate,
        translation: &EmailTemplateTranslation,
        is_update: bool,
    ) -> Result<(), TranslationIntegrityError> {
        let exclude_id = is_update.then_some(translation.id);
        let exists = self
            .repo
            .exists_for_parent_and_locale(&parent.id, &translation.locale, exclude_id)
            .await
            .map_err(|e| TranslationIntegrityError::Internal(e.to_string()))?;

        if exists {
            return Err(TranslationIntegrityError::DuplicateTranslation {
                name: parent.name.clone(),
                locale: translation.locale.clone(),
            });
        }

        if translation.locale == parent.locale {
            return Err(TranslationIntegrityError::SameLocaleAsParent {
                name: parent.name.clone(),
                locale: translation.locale.clone(),
            });
        }

        Ok(())
    }
}
