use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entity::EmailTemplate;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailTemplateRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> anyhow::Result<Option<EmailTemplate>>;
    /// name は完全一致（大文字小文字を区別）で検索する。
    async fn find_by_name(&self, name: &str) -> anyhow::Result<Option<EmailTemplate>>;
    async fn find_all(&self) -> anyhow::Result<Vec<EmailTemplate>>;
    async fn create(&self, template: &EmailTemplate) -> anyhow::Result<()>;
    async fn update(&self, template: &EmailTemplate) -> anyhow::Result<()>;
    /// 削除時は配下の翻訳もすべて削除する。
    async fn delete(&self, id: &Uuid) -> anyhow::Result<bool>;
}
