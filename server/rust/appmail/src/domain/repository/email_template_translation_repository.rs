use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entity::EmailTemplateTranslation;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailTemplateTranslationRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> anyhow::Result<Option<EmailTemplateTranslation>>;
    async fn find_by_parent(&self, parent_id: &Uuid)
        -> anyhow::Result<Vec<EmailTemplateTranslation>>;
    async fn find_by_parent_and_locale(
        &self,
        parent_id: &Uuid,
        locale: &str,
    ) -> anyhow::Result<Option<EmailTemplateTranslation>>;
    /// 同じ親・同じロケールの翻訳が存在するかを返す。exclude_id は更新時に自身を除外するために使う。
    async fn exists_for_parent_and_locale(
        &self,
        parent_id: &Uuid,
        locale: &str,
        exclude_id: Option<Uuid>,
    ) -> anyhow::Result<bool>;
    async fn create(&self, translation: &EmailTemplateTranslation) -> anyhow::Result<()>;
    async fn update(&self, translation: &EmailTemplateTranslation) -> anyhow::Result<()>;
    async fn delete(&self, id: &Uuid) -> anyhow::Result<bool>;
}
