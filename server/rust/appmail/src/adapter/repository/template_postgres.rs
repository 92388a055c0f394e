use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::map_sqlx_error;
use crate::domain::entity::{EmailContent, EmailTemplate};
use crate::domain::repository::{EmailTemplateRepository, TEMPLATE_NAME_CONSTRAINT};

pub struct TemplatePostgresRepository {
    pool: Arc<PgPool>,
}

impl TemplatePostgresRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct TemplateRow {
    id: Uuid,
    name: String,
    locale: String,
    subject: String,
    html_template: String,
    text_template: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TemplateRow> for EmailTemplate {
    fn from(r: TemplateRow) -> Self {
        EmailTemplate {
            id: r.id,
            name: r.name,
            locale: r.locale,
            content: EmailContent::new(r.subject, r.html_template, r.text_template),
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

const SELECT_COLUMNS: &str =
    "SELECT id, name, locale, subject, html_template, text_template, created_at, updated_at \
     FROM appmail.email_templates";

#[async_trait]
impl EmailTemplateRepository for TemplatePostgresRepository {
    async fn find_by_id(&self, id: &Uuid) -> anyhow::Result<Option<EmailTemplate>> {
        let row: Option<TemplateRow> =
            sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE id = $1"))
                .bind(id)
                .fetch_optional(self.pool.as_ref())
                .await?;
        Ok(row.map(Into::into))
    }

    async fn find_by_name(&self, name: &str) -> anyhow::Result<Option<EmailTemplate>> {
        let row: Option<TemplateRow> =
            sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE name = $1"))
                .bind(name)
                .fetch_optional(self.pool.as_ref())
                .await?;
        Ok(row.map(Into::into))
    }

    async fn find_all(&self) -> anyhow::Result<Vec<EmailTemplate>> {
        let rows: Vec<TemplateRow> = sqlx::query_as(&format!("{SELECT_COLUMNS} ORDER BY name"))
            .fetch_all(self.pool.as_ref())
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, template: &EmailTemplate) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO appmail.email_templates \
             (id, name, locale, subject, html_template, text_template, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(template.id)
        .bind(&template.name)
        .bind(&template.locale)
        .bind(&template.content.subject)
        .bind(&template.content.html_template)
        .bind(&template.content.text_template)
        .bind(template.created_at)
        .bind(template.updated_at)
        .execute(self.pool.as_ref())
        .await
        .map_err(|e| map_sqlx_error(e, TEMPLATE_NAME_CONSTRAINT))?;
        Ok(())
    }

    async fn update(&self, template: &EmailTemplate) -> anyhow::Result<()> {
        sqlx::query(
            "UPDATE appmail.email_templates \
             SET name = $2, locale = $3, subject = $4, html_template = $5, text_template = $6, \
                 updated_at = $7 \
             WHERE id = $1",
        )
        .bind(template.id)
        .bind(&template.name)
        .bind(&template.locale)
        .bind(&template.content.subject)
        .bind(&template.content.html_template)
        .bind(&template.content.text_template)
        .bind(template.updated_at)
        .execute(self.pool.as_ref())
        .await
        .map_err(|e| map_sqlx_error(e, TEMPLATE_NAME_CONSTRAINT))?;
        Ok(())
    }

    async fn delete(&self, id: &Uuid) -> anyhow::Result<bool> {
        // 翻訳は外部キーの ON DELETE CASCADE で削除される
        let result = sqlx::query("DELETE FROM appmail.email_templates WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
