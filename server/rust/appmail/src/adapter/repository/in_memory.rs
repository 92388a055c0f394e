use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entity::{EmailTemplate, EmailTemplateTranslation};
use crate::domain::repository::{
    EmailTemplateRepository, EmailTemplateTranslationRepository, UniqueViolation,
    TEMPLATE_NAME_CONSTRAINT, TRANSLATION_LOCALE_CONSTRAINT,
};

/// 翻訳と、参照可能な親テンプレート ID の集合。同じロックで保護する。
#[derive(Default)]
struct TranslationStore {
    translations: HashMap<Uuid, EmailTemplateTranslation>,
    parents: HashSet<Uuid>,
}

impl TranslationStore {
    fn conflicts(&self, candidate: &EmailTemplateTranslation) -> bool {
        self.translations.values().any(|t| {
            t.id != candidate.id && t.parent_id == candidate.parent_id && t.locale == candidate.locale
        })
    }

    /// 外部キーと一意制約を PostgreSQL と同じ順で検査して保存する。
    fn save(&mut self, translation: &EmailTemplateTranslation) -> anyhow::Result<()> {
        if !self.parents.contains(&translation.parent_id) {
            anyhow::bail!(
                "parent email template {} does not exist",
                translation.parent_id
            );
        }
        if self.conflicts(translation) {
            return Err(UniqueViolation::new(TRANSLATION_LOCALE_CONSTRAINT).into());
        }
        self.translations.insert(translation.id, translation.clone());
        Ok(())
    }
}

/// InMemoryEmailTemplateTranslationRepository はインメモリの翻訳リポジトリ。
/// 親テンプレートへの参照と (parent_id, locale) の一意制約を PostgreSQL と同様に強制する。
pub struct InMemoryEmailTemplateTranslationRepository {
    store: RwLock<TranslationStore>,
}

impl InMemoryEmailTemplateTranslationRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(TranslationStore::default()),
        }
    }

    /// 親テンプレートを翻訳の参照先として登録する。
    async fn register_parent(&self, parent_id: Uuid) {
        self.store.write().await.parents.insert(parent_id);
    }

    /// 親テンプレート削除時のカスケード削除。以後その親への翻訳は保存できない。
    pub async fn delete_by_parent(&self, parent_id: &Uuid) -> usize {
        let mut store = self.store.write().await;
        store.parents.remove(parent_id);
        let before = store.translations.len();
        store.translations.retain(|_, t| t.parent_id != *parent_id);
        before - store.translations.len()
    }
}

impl Default for InMemoryEmailTemplateTranslationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmailTemplateTranslationRepository for InMemoryEmailTemplateTranslationRepository {
    async fn find_by_id(&self, id: &Uuid) -> anyhow::Result<Option<EmailTemplateTranslation>> {
        let store = self.store.read().await;
        Ok(store.translations.get(id).cloned())
    }

    async fn find_by_parent(
        &self,
        parent_id: &Uuid,
    ) -> anyhow::Result<Vec<EmailTemplateTranslation>> {
        let store = self.store.read().await;
        let mut found: Vec<_> = store
            .translations
            .values()
            .filter(|t| t.parent_id == *parent_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.locale.cmp(&b.locale));
        Ok(found)
    }

    async fn find_by_parent_and_locale(
        &self,
        parent_id: &Uuid,
        locale: &str,
    ) -> anyhow::Result<Option<EmailTemplateTranslation>> {
        let store = self.store.read().await;
        Ok(store
            .translations
            .values()
            .find(|t| t.parent_id == *parent_id && t.locale == locale)
            .cloned())
    }

    async fn exists_for_parent_and_locale(
        &self,
        parent_id: &Uuid,
        locale: &str,
        exclude_id: Option<Uuid>,
    ) -> anyhow::Result<bool> {
        let store = self.store.read().await;
        Ok(store.translations.values().any(|t| {
            t.parent_id == *parent_id && t.locale == locale && Some(t.id) != exclude_id
        }))
    }

    async fn create(&self, translation: &EmailTemplateTranslation) -> anyhow::Result<()> {
        self.store.write().await.save(translation)
    }

    async fn update(&self, translation: &EmailTemplateTranslation) -> anyhow::Result<()> {
        self.store.write().await.save(translation)
    }

    async fn delete(&self, id: &Uuid) -> anyhow::Result<bool> {
        let mut store = self.store.write().await;
        Ok(store.translations.remove(id).is_some())
    }
}

/// InMemoryEmailTemplateRepository はインメモリのテンプレートリポジトリ。
/// name の一意制約と、削除時の翻訳へのカスケードを再現する。
/// ロックは常にテンプレート、翻訳の順で取得する。
pub struct InMemoryEmailTemplateRepository {
    templates: RwLock<HashMap<Uuid, EmailTemplate>>,
    translations: Arc<InMemoryEmailTemplateTranslationRepository>,
}

impl InMemoryEmailTemplateRepository {
    pub fn new(translations: Arc<InMemoryEmailTemplateTranslationRepository>) -> Self {
        Self {
            templates: RwLock::new(HashMap::new()),
            translations,
        }
    }

    fn name_taken(templates: &HashMap<Uuid, EmailTemplate>, candidate: &EmailTemplate) -> bool {
        templates
            .values()
            .any(|t| t.id != candidate.id && t.name == candidate.name)
    }
}

#[async_trait]
impl EmailTemplateRepository for InMemoryEmailTemplateRepository {
    async fn find_by_id(&self, id: &Uuid) -> anyhow::Result<Option<EmailTemplate>> {
        let templates = self.templates.read().await;
        Ok(templates.get(id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> anyhow::Result<Option<EmailTemplate>> {
        let templates = self.templates.read().await;
        Ok(templates.values().find(|t| t.name == name).cloned())
    }

    async fn find_all(&self) -> anyhow::Result<Vec<EmailTemplate>> {
        let templates = self.templates.read().await;
        let mut all: Vec<_> = templates.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn create(&self, template: &EmailTemplate) -> anyhow::Result<()> {
        let mut templates = self.templates.write().await;
        if Self::name_taken(&templates, template) {
            return Err(UniqueViolation::new(TEMPLATE_NAME_CONSTRAINT).into());
        }
        self.translations.register_parent(template.id).await;
        templates.insert(template.id, template.clone());
        Ok(())
    }

    async fn update(&self, template: &EmailTemplate) -> anyhow::Result<()> {
        let mut templates = self.templates.write().await;
        if Self::name_taken(&templates, template) {
            return Err(UniqueViolation::new(TEMPLATE_NAME_CONSTRAINT).into());
        }
        templates.insert(template.id, template.clone());
        Ok(())
    }

    async fn delete(&self, id: &Uuid) -> anyhow::Result<bool> {
        let mut templates = self.templates.write().await;
        let removed = templates.remove(id).is_some();
        if removed {
            self.translations.delete_by_parent(id).await;
        }
        Ok(removed)
    }
}
