//! テスト用ヘルパー。
//! 統合テスト（tests/integration_test.rs）から利用する。

use std::sync::Arc;

use crate::adapter::handler::AppState;
use crate::adapter::repository::in_memory::{
    InMemoryEmailTemplateRepository, InMemoryEmailTemplateTranslationRepository,
};
use crate::domain::service::LocaleSettings;
use crate::infrastructure::html2text_converter::Html2TextConverter;

/// TestRepos はテストから直接データを投入・確認するためのリポジトリ組。
pub struct TestRepos {
    pub templates: Arc<InMemoryEmailTemplateRepository>,
    pub translations: Arc<InMemoryEmailTemplateTranslationRepository>,
}

impl TestRepos {
    pub fn new() -> Self {
        let translations = Arc::new(InMemoryEmailTemplateTranslationRepository::new());
        let templates = Arc::new(InMemoryEmailTemplateRepository::new(translations.clone()));
        Self {
            templates,
            translations,
        }
    }
}

impl Default for TestRepos {
    fn default() -> Self {
        Self::new()
    }
}

/// テスト用 AppState を構築するヘルパー。
pub fn make_test_app_state(repos: &TestRepos, locales: LocaleSettings) -> AppState {
    AppState::new(
        repos.templates.clone(),
        repos.translations.clone(),
        Arc::new(locales),
        Arc::new(Html2TextConverter::default()),
    )
}
