use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::email_content::EmailContent;

/// EmailTemplateTranslation は EmailTemplate の特定ロケール向け本文を表す。
/// 親テンプレートごとにロケールは一意で、親と同じロケールは持てない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailTemplateTranslation {
    pub id: Uuid,
    pub parent_id: Uuid,
    pub locale: String,
    #[serde(flatten)]
    pub content: EmailContent,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EmailTemplateTranslation {
    pub fn new(parent_id: Uuid, locale: String, content: EmailContent) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            parent_id,
            locale,
            content,
            created_at: now,
            updated_at: now,
        }
    }
}
