use super::email_content::EmailContent;
use super::email_template::EmailTemplate;
use super::email_template_translation::EmailTemplateTranslation;

/// ResolvedTemplate は名前とロケールによる検索結果。
/// 主テンプレートか、その翻訳のいずれかを保持する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTemplate {
    Primary {
        template: EmailTemplate,
        /// 要求ロケールに一致する翻訳が無く主テンプレートを返した場合に true
        fallback: bool,
    },
    Translation {
        template: EmailTemplate,
        translation: EmailTemplateTranslation,
    },
}

impl ResolvedTemplate {
    pub fn name(&self) -> &str {
        match self {
            Self::Primary { template, .. } | Self::Translation { template, .. } => &template.name,
        }
    }

    /// 実際に返却するコンテンツのロケール。
    pub fn locale(&self) -> &str {
        match self {
            Self::Primary { template, .. } => &template.locale,
            Self::Translation { translation, .. } => &translation.locale,
        }
    }

    pub fn content(&self) -> &EmailContent {
        match self {
            Self::Primary { template, .. } => &template.content,
            Self::Translation { translation, .. } => &translation.content,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Primary { fallback: true, .. })
    }

    pub fn is_translation(&self) -> bool {
        matches!(self, Self::Translation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_for_translation() {
        let parent = EmailTemplate::new(
            "welcome".to_string(),
            "en".to_string(),
            EmailContent::new("Hi".to_string(), String::new(), String::new()),
        );
        let translation = EmailTemplateTranslation::new(
            parent.id,
            "de".to_string(),
            EmailContent::new("Hallo".to_string(), String::new(), String::new()),
        );
        let resolved = ResolvedTemplate::Translation {
            template: parent,
            translation,
        };

        assert_eq!(resolved.name(), "welcome");
        assert_eq!(resolved.locale(), "de");
        assert_eq!(resolved.content().subject, "Hallo");
        assert!(resolved.is_translation());
        assert!(!resolved.is_fallback());
    }

    #[test]
    fn test_accessors_for_fallback() {
        let parent = EmailTemplate::new(
            "welcome".to_string(),
            "en".to_string(),
            EmailContent::new("Hi".to_string(), String::new(), String::new()),
        );
        let resolved = ResolvedTemplate::Primary {
            template: parent,
            fallback: true,
        };

        assert_eq!(resolved.locale(), "en");
        assert_eq!(resolved.content().subject, "Hi");
        assert!(resolved.is_fallback());
    }
}
