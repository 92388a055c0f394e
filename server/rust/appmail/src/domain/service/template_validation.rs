use std::sync::LazyLock;

use regex::Regex;

use super::locale::LocaleSettings;
use crate::domain::entity::EmailContent;

pub const MAX_NAME_LENGTH: usize = 255;
/// RFC 2822 の行長制限を踏まえ 78 文字以内が推奨だが、保存上限は 255 文字とする。
pub const MAX_SUBJECT_LENGTH: usize = 255;
pub const MAX_LOCALE_LENGTH: usize = 50;

static SLUG_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").ok());

/// TemplateValidationError は保存前の入力検証エラー。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateValidationError {
    #[error("invalid template name '{0}': use letters, numbers, underscores or hyphens (max 255)")]
    InvalidName(String),

    #[error("subject is {0} characters long; the maximum is 255")]
    SubjectTooLong(usize),

    #[error("invalid language code: {0}")]
    InvalidLanguageCode(String),
}

/// TemplateValidator はテンプレートと翻訳の保存前検証を提供する。
pub struct TemplateValidator<'a> {
    locales: &'a LocaleSettings,
}

impl<'a> TemplateValidator<'a> {
    pub fn new(locales: &'a LocaleSettings) -> Self {
        Self { locales }
    }

    pub fn validate_name(&self, name: &str) -> Result<(), TemplateValidationError> {
        let is_slug = SLUG_RE.as_ref().is_some_and(|re| re.is_match(name));
        if !is_slug || name.chars().count() > MAX_NAME_LENGTH {
            return Err(TemplateValidationError::InvalidName(name.to_string()));
        }
        Ok(())
    }

    /// ロケールは対応ロケールのコードと完全一致する必要がある（保存時は正規化しない）。
    pub fn validate_locale(&self, locale: &str) -> Result<(), TemplateValidationError> {
        if locale.len() > MAX_LOCALE_LENGTH || !self.locales.is_supported(locale) {
            return Err(TemplateValidationError::InvalidLanguageCode(
                locale.to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_content(&self, content: &EmailContent) -> Result<(), TemplateValidationError> {
        let len = content.subject.chars().count();
        if len > MAX_SUBJECT_LENGTH {
            return Err(TemplateValidationError::SubjectTooLong(len));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        let settings = LocaleSettings::default();
        let v = TemplateValidator::new(&settings);

        assert!(v.validate_name("welcome").is_ok());
        assert!(v.validate_name("Order_Shipped-2").is_ok());
        assert!(v.validate_name("").is_err());
        assert!(v.validate_name("has space").is_err());
        assert!(v.validate_name("dot.ted").is_err());
        assert!(v.validate_name(&"a".repeat(256)).is_err());
        assert!(v.validate_name(&"a".repeat(255)).is_ok());
    }

    #[test]
    fn test_validate_locale() {
        let settings = LocaleSettings::default();
        let v = TemplateValidator::new(&settings);

        assert!(v.validate_locale("en-gb").is_ok());
        assert!(v.validate_locale("de").is_ok());
        assert_eq!(
            v.validate_locale("en_GB"),
            Err(TemplateValidationError::InvalidLanguageCode(
                "en_GB".to_string()
            ))
        );
        assert!(v.validate_locale("xx").is_err());
    }

    #[test]
    fn test_validate_subject_length() {
        let settings = LocaleSettings::default();
        let v = TemplateValidator::new(&settings);

        let ok = EmailContent::new("s".repeat(255), String::new(), String::new());
        assert!(v.validate_content(&ok).is_ok());

        let too_long = EmailContent::new("s".repeat(256), String::new(), String::new());
        assert_eq!(
            v.validate_content(&too_long),
            Err(TemplateValidationError::SubjectTooLong(256))
        );
    }
}
