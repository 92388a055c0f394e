pub mod email_template_repository;
pub mod email_template_translation_repository;

pub use email_template_repository::EmailTemplateRepository;
pub use email_template_translation_repository::EmailTemplateTranslationRepository;

/// UniqueViolation はストレージ層の一意制約違反を表す。
/// リポジトリ実装は anyhow::Error にこの型を包んで返し、ユースケース側で downcast して判定する。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unique constraint violated: {constraint}")]
pub struct UniqueViolation {
    pub constraint: String,
}

impl UniqueViolation {
    pub fn new(constraint: impl Into<String>) -> Self {
        Self {
            constraint: constraint.into(),
        }
    }

    /// anyhow::Error が一意制約違反かどうかを判定する。
    pub fn is_in(err: &anyhow::Error) -> bool {
        err.downcast_ref::<UniqueViolation>().is_some()
    }
}

/// テンプレート名の一意制約名
pub const TEMPLATE_NAME_CONSTRAINT: &str = "email_templates_name_key";
/// 親テンプレートとロケールの組に対する一意制約名
pub const TRANSLATION_LOCALE_CONSTRAINT: &str = "email_template_translations_parent_id_locale_key";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_detected_through_anyhow() {
        let err = anyhow::Error::new(UniqueViolation::new(TEMPLATE_NAME_CONSTRAINT));
        assert!(UniqueViolation::is_in(&err));
        assert!(!UniqueViolation::is_in(&anyhow::anyhow!("db error")));
    }
}
