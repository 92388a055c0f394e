//! PostgreSQLリポジトリ統合テスト
//! 実行には PostgreSQL が必要:
//!   DATABASE_URL="postgres://..." cargo test -- --ignored
//!
//! マイグレーション: database/appmail-db/migrations

use std::sync::Arc;

use sqlx::PgPool;

use appmail_server::adapter::repository::template_postgres::TemplatePostgresRepository;
use appmail_server::adapter::repository::translation_postgres::TranslationPostgresRepository;
use appmail_server::domain::entity::{EmailContent, EmailTemplate, EmailTemplateTranslation};
use appmail_server::domain::repository::{
    EmailTemplateRepository, EmailTemplateTranslationRepository, UniqueViolation,
};

async fn setup() -> (TemplatePostgresRepository, TranslationPostgresRepository) {
    let url = std::env::var("DATABASE_URL").unwrap();
    let pool = PgPool::connect(&url).await.unwrap();
    sqlx::migrate!("../../../database/appmail-db/migrations")
        .run(&pool)
        .await
        .unwrap();
    let pool = Arc::new(pool);
    (
        TemplatePostgresRepository::new(pool.clone()),
        TranslationPostgresRepository::new(pool),
    )
}

fn unique_name(prefix: &str) -> String {
    format!("{prefix}_{}", uuid::Uuid::new_v4().simple())
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_create_and_find_template() {
    let (templates, _) = setup().await;
    let name = unique_name("welcome");
    let template = EmailTemplate::new(
        name.clone(),
        "en".to_string(),
        EmailContent::new("Hi".to_string(), "<p>Hi</p>".to_string(), "Hi".to_string()),
    );
    templates.create(&template).await.unwrap();

    let found = templates.find_by_name(&name).await.unwrap().unwrap();
    assert_eq!(found.id, template.id);
    assert_eq!(found.content.subject, "Hi");
    assert!(templates.find_by_name(&name.to_uppercase()).await.unwrap().is_none());

    assert!(templates.delete(&template.id).await.unwrap());
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_duplicate_name_is_unique_violation() {
    let (templates, _) = setup().await;
    let name = unique_name("dup");
    let first = EmailTemplate::new(name.clone(), "en".to_string(), EmailContent::default());
    let second = EmailTemplate::new(name, "fr".to_string(), EmailContent::default());
    templates.create(&first).await.unwrap();

    let err = templates.create(&second).await.unwrap_err();
    assert!(UniqueViolation::is_in(&err));

    templates.delete(&first.id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_translation_unique_per_parent_and_cascade() {
    let (templates, translations) = setup().await;
    let parent = EmailTemplate::new(unique_name("parent"), "en".to_string(), EmailContent::default());
    templates.create(&parent).await.unwrap();

    let de = EmailTemplateTranslation::new(parent.id, "de".to_string(), EmailContent::default());
    translations.create(&de).await.unwrap();

    let dup = EmailTemplateTranslation::new(parent.id, "de".to_string(), EmailContent::default());
    let err = translations.create(&dup).await.unwrap_err();
    assert!(UniqueViolation::is_in(&err));

    assert!(translations
        .exists_for_parent_and_locale(&parent.id, "de", None)
        .await
        .unwrap());
    assert!(!translations
        .exists_for_parent_and_locale(&parent.id, "de", Some(de.id))
        .await
        .unwrap());

    assert!(templates.delete(&parent.id).await.unwrap());
    assert!(translations.find_by_id(&de.id).await.unwrap().is_none());
}
