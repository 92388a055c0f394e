use std::sync::Arc;

use crate::domain::entity::{EmailContent, EmailTemplate};
use crate::domain::repository::{EmailTemplateRepository, UniqueViolation};
use crate::domain::service::{
    LocaleSettings, PlainTextConverter, TemplateValidationError, TemplateValidator,
};

#[derive(Debug, Clone)]
pub struct CreateTemplateInput {
    pub name: String,
    /// 未指定の場合はテンプレートの既定ロケールを使う。
    pub locale: Option<String>,
    pub subject: String,
    pub html_template: String,
    pub text_template: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CreateTemplateError {
    #[error("template already exists: {0}")]
    NameConflict(String),

    #[error(transparent)]
    Validation(#[from] TemplateValidationError),

    #[error("internal error: {0}")]
    Internal(String),
}

pub struct CreateTemplateUseCase {
    repo: Arc<dyn EmailTemplateRepository>,
    locales: Arc<LocaleSettings>,
    converter: Arc<dyn PlainTextConverter>,
}

impl CreateTemplateUseCase {
    pub fn new(
        repo: Arc<dyn EmailTemplateRepository>,
        locales: Arc<LocaleSettings>,
        converter: Arc<dyn PlainTextConverter>,
    ) -> Self {
        Self {
            repo,
            locales,
            converter,
        }
    }

    pub async fn execute(
        &self,
        input: &CreateTemplateInput,
    ) -> Result<EmailTemplate, CreateTemplateError> {
        let locale = input
            .locale
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| self.locales.template_default_locale())
            .to_string();

        let mut content = EmailContent::new(
            input.subject.clone(),
            input.html_template.clone(),
            input.text_template.clone(),
        );

        let validator = TemplateValidator::new(&self.locales);
        validator.validate_name(&input.name)?;
        validator.validate_locale(&locale)?;
        validator.validate_content(&content)?;

        if self
            .repo
            .find_by_name(&input.name)
            .await
            .map_err(|e| CreateTemplateError::Internal(e.to_string()))?
            .is_some()
        {
            tracing::warn!(name = %input.name, "email template name already in use");
            return Err(CreateTemplateError::NameConflict(input.name.clone()));
        }

        content.fill_missing_text(self.converter.as_ref());
        let template = EmailTemplate::new(input.name.clone(), locale, content);

        self.repo.create(&template).await.map_err(|e| {
            if UniqueViolation::is_in(&e) {
                CreateTemplateError::NameConflict(input.name.clone())
            } else {
                CreateTemplateError::Internal(e.to_string())
            }
        })?;

        tracing::info!(
            template_id = %template.id,
            name = %template.name,
            locale = %template.locale,
            "email template created"
        );
        Ok(template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repository::email_template_repository::MockEmailTemplateRepository;
    use crate::domain::repository::TEMPLATE_NAME_CONSTRAINT;
    use crate::domain::service::plaintext::MockPlainTextConverter;

    fn input(name: &str, locale: Option<&str>) -> CreateTemplateInput {
        CreateTemplateInput {
            name: name.to_string(),
            locale: locale.map(str::to_string),
            subject: "Welcome {{ user.name }}".to_string(),
            html_template: "<p>Hello</p>".to_string(),
            text_template: String::new(),
        }
    }

    fn converter() -> Arc<MockPlainTextConverter> {
        let mut conv = MockPlainTextConverter::new();
        conv.expect_convert().returning(|_| "Hello".to_string());
        Arc::new(conv)
    }

    #[tokio::test]
    async fn success_derives_plaintext_and_default_locale() {
        let mut mock = MockEmailTemplateRepository::new();
        mock.expect_find_by_name().returning(|_| Ok(None));
        mock.expect_create().returning(|_| Ok(()));

        let uc = CreateTemplateUseCase::new(
            Arc::new(mock),
            Arc::new(LocaleSettings::default()),
            converter(),
        );
        let template = uc.execute(&input("welcome", None)).await.unwrap();

        assert_eq!(template.name, "welcome");
        assert_eq!(template.locale, "en");
        assert_eq!(template.content.text_template, "Hello");
    }

    #[tokio::test]
    async fn explicit_text_is_kept() {
        let mut mock = MockEmailTemplateRepository::new();
        mock.expect_find_by_name().returning(|_| Ok(None));
        mock.expect_create().returning(|_| Ok(()));

        let mut conv = MockPlainTextConverter::new();
        conv.expect_convert().never();

        let uc = CreateTemplateUseCase::new(
            Arc::new(mock),
            Arc::new(LocaleSettings::default()),
            Arc::new(conv),
        );
        let mut inp = input("welcome", Some("de"));
        inp.text_template = "Hallo".to_string();
        let template = uc.execute(&inp).await.unwrap();

        assert_eq!(template.locale, "de");
        assert_eq!(template.content.text_template, "Hallo");
    }

    #[tokio::test]
    async fn name_conflict() {
        let mut mock = MockEmailTemplateRepository::new();
        mock.expect_find_by_name().returning(|name| {
            Ok(Some(EmailTemplate::new(
                name.to_string(),
                "en".to_string(),
                EmailContent::default(),
            )))
        });
        mock.expect_create().never();

        let uc = CreateTemplateUseCase::new(
            Arc::new(mock),
            Arc::new(LocaleSettings::default()),
            converter(),
        );
        let result = uc.execute(&input("welcome", Some("en"))).await;

        match result.unwrap_err() {
            CreateTemplateError::NameConflict(name) => assert_eq!(name, "welcome"),
            e => unreachable!("unexpected error: {:?}", e),
        }
    }

    #[tokio::test]
    async fn storage_unique_violation_is_name_conflict() {
        let mut mock = MockEmailTemplateRepository::new();
        mock.expect_find_by_name().returning(|_| Ok(None));
        mock.expect_create()
            .returning(|_| Err(UniqueViolation::new(TEMPLATE_NAME_CONSTRAINT).into()));

        let uc = CreateTemplateUseCase::new(
            Arc::new(mock),
            Arc::new(LocaleSettings::default()),
            converter(),
        );
        let result = uc.execute(&input("welcome", None)).await;
        assert!(matches!(result, Err(CreateTemplateError::NameConflict(_))));
    }

    #[tokio::test]
    async fn invalid_locale() {
        let mock = MockEmailTemplateRepository::new();

        let uc = CreateTemplateUseCase::new(
            Arc::new(mock),
            Arc::new(LocaleSettings::default()),
            converter(),
        );
        let result = uc.execute(&input("welcome", Some("xx-yy"))).await;

        assert!(matches!(
            result,
            Err(CreateTemplateError::Validation(
                TemplateValidationError::InvalidLanguageCode(_)
            ))
        ));
    }

    #[tokio::test]
    async fn invalid_name() {
        let mock = MockEmailTemplateRepository::new();

        let uc = CreateTemplateUseCase::new(
            Arc::new(mock),
            Arc::new(LocaleSettings::default()),
            converter(),
        );
        let result = uc.execute(&input("not a slug", None)).await;

        assert!(matches!(
            result,
            Err(CreateTemplateError::Validation(
                TemplateValidationError::InvalidName(_)
            ))
        ));
    }

    #[tokio::test]
    async fn internal_error() {
        let mut mock = MockEmailTemplateRepository::new();
        mock.expect_find_by_name().returning(|_| Ok(None));
        mock.expect_create()
            .returning(|_| Err(anyhow::anyhow!("db error")));

        let uc = CreateTemplateUseCase::new(
            Arc::new(mock),
            Arc::new(LocaleSettings::default()),
            converter(),
        );
        let result = uc.execute(&input("welcome", None)).await;
        assert!(matches!(result, Err(CreateTemplateError::Internal(_))));
    }
}
