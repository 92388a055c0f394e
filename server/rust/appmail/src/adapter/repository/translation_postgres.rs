use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::map_sqlx_error;
use crate::domain::entity::{EmailContent, EmailTemplateTranslation};
use crate::domain::repository::{EmailTemplateTranslationRepository, TRANSLATION_LOCALE_CONSTRAINT};

pub struct TranslationPostgresRepository {
    pool: Arc<PgPool>,
}

impl TranslationPostgresRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct TranslationRow {
    id: Uuid,
    parent_id: Uuid,
    locale: String,
    subject: String,
    html_template: String,
    text_template: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TranslationRow> for EmailTemplateTranslation {
    fn from(r: TranslationRow) -> Self {
        EmailTemplateTranslation {
            id: r.id,
            parent_id: r.parent_id,
            locale: r.locale,
            content: EmailContent::new(r.subject, r.html_template, r.text_template),
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

const SELECT_COLUMNS: &str =
    "SELECT id, parent_id, locale, subject, html_template, text_template, created_at, updated_at \
     FROM appmail.email_template_translations";

#[async_trait]
impl EmailTemplateTranslationRepository for TranslationPostgresRepository {
    async fn find_by_id(&self, id: &Uuid) -> anyhow::Result<Option<EmailTemplateTranslation>> {
        let row: Option<TranslationRow> =
            sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE id = $1"))
                .bind(id)
                .fetch_optional(self.pool.as_ref())
                .await?;
        Ok(row.map(Into::into))
    }

    async fn find_by_parent(
        &self,
        parent_id: &Uuid,
    ) -> anyhow::Result<Vec<EmailTemplateTranslation>> {
        let rows: Vec<TranslationRow> =
            sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE parent_id = $1 ORDER BY locale"))
                .bind(parent_id)
                .fetch_all(self.pool.as_ref())
                .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_parent_and_locale(
        &self,
        parent_id: &Uuid,
        locale: &str,
    ) -> anyhow::Result<Option<EmailTemplateTranslation>> {
        let row: Option<TranslationRow> = sqlx::query_as(&format!(
            "{SELECT_COLUMNS} WHERE parent_id = $1 AND locale = $2"
        ))
        .bind(parent_id)
        .bind(locale)
        .fetch_optional(self.pool.as_ref())
        .await?;
        Ok(row.map(Into::into))
    }

    async fn exists_for_parent_and_locale(
        &self,
        parent_id: &Uuid,
        locale: &str,
        exclude_id: Option<Uuid>,
    ) -> anyhow::Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS ( \
                SELECT 1 FROM appmail.email_template_translations \
                WHERE parent_id = $1 AND locale = $2 AND ($3::uuid IS NULL OR id <> $3) \
             )",
        )
        .bind(parent_id)
        .bind(locale)
        .bind(exclude_id)
        .fetch_one(self.pool.as_ref())
        .await?;
        Ok(exists)
    }

    async fn create(&self, translation: &EmailTemplateTranslation) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO appmail.email_template_translations \
             (id, parent_id, locale, subject, html_template, text_template, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(translation.id)
        .bind(translation.parent_id)
        .bind(&translation.locale)
        .bind(&translation.content.subject)
        .bind(&translation.content.html_template)
        .bind(&translation.content.text_template)
        .bind(translation.created_at)
        .bind(translation.updated_at)
        .execute(self.pool.as_ref())
        .await
        .map_err(|e| map_sqlx_error(e, TRANSLATION_LOCALE_CONSTRAINT))?;
        Ok(())
    }

    async fn update(&self, translation: &EmailTemplateTranslation) -> anyhow::Result<()> {
        sqlx::query(
            "UPDATE appmail.email_template_translations \
             SET locale = $2, subject = $3, html_template = $4, text_template = $5, updated_at = $6 \
             WHERE id = $1",
        )
        .bind(translation.id)
        .bind(&translation.locale)
        .bind(&translation.content.subject)
        .bind(&translation.content.html_template)
        .bind(&translation.content.text_template)
        .bind(translation.updated_at)
        .execute(self.pool.as_ref())
        .await
        .map_err(|e| map_sqlx_error(e, TRANSLATION_LOCALE_CONSTRAINT))?;
        Ok(())
    }

    async fn delete(&self, id: &Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM appmail.email_template_translations WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
