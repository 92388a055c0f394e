use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::email_content::EmailContent;

/// EmailTemplate はトランザクションメールの主テンプレート（既定ロケール版）を表す。
/// name はテンプレートを一意に識別し、大文字小文字を区別する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailTemplate {
    pub id: Uuid,
    pub name: String,
    pub locale: String,
    #[serde(flatten)]
    pub content: EmailContent,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EmailTemplate {
    pub fn new(name: String, locale: String, content: EmailContent) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            locale,
            content,
            created_at: now,
            updated_at: now,
        }
    }
}

impl std::fmt::Display for EmailTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EmailTemplate: {} ({})", self.name, self.locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sets_timestamps() {
        let t = EmailTemplate::new(
            "welcome".to_string(),
            "en".to_string(),
            EmailContent::default(),
        );
        assert_eq!(t.created_at, t.updated_at);
        assert_eq!(t.to_string(), "EmailTemplate: welcome (en)");
    }

    #[test]
    fn test_serialize_flattens_content() {
        let content = EmailContent::new("Hi".to_string(), "<p>x</p>".to_string(), "x".to_string());
        let t = EmailTemplate::new("welcome".to_string(), "en".to_string(), content);
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["subject"], "Hi");
        assert_eq!(json["html_template"], "<p>x</p>");
        assert_eq!(json["text_template"], "x");
    }
}
