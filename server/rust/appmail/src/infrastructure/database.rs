use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

/// DatabaseConfig はデータベース接続設定。
/// password は Secret でラップし、Debug 出力に含めない。
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    #[serde(default = "default_db_port")]
    pub port: u16,
    pub name: String,
    pub user: String,
    #[serde(default = "default_password")]
    pub password: Secret<String>,
    #[serde(default = "default_ssl_mode")]
    pub ssl_mode: String,
    #[serde(default = "default_max_open_conns")]
    pub max_open_conns: u32,
    /// 起動時にマイグレーションを適用するかどうか
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

fn default_db_port() -> u16 {
    5432
}

fn default_password() -> Secret<String> {
    Secret::new(String::new())
}

fn default_ssl_mode() -> String {
    "disable".to_string()
}

fn default_max_open_conns() -> u32 {
    25
}

fn default_run_migrations() -> bool {
    true
}

impl DatabaseConfig {
    /// PostgreSQL接続URLを構築する。
    pub fn connection_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}?sslmode={}",
            self.user,
            self.password.expose_secret(),
            self.host,
            self.port,
            self.name,
            self.ssl_mode
        )
    }
}

/// connect はコネクションプールを作成し、必要に応じてマイグレーションを適用する。
/// DATABASE_URL が設定されている場合は設定ファイルの接続情報より優先する。
pub async fn connect(config: Option<&DatabaseConfig>) -> anyhow::Result<Option<PgPool>> {
    let env_url = std::env::var("DATABASE_URL").ok();
    let (url, max_conns, run_migrations) = match (config, env_url) {
        (Some(cfg), url) => (
            url.unwrap_or_else(|| cfg.connection_url()),
            cfg.max_open_conns,
            cfg.run_migrations,
        ),
        (None, Some(url)) => (url, default_max_open_conns(), default_run_migrations()),
        (None, None) => {
            info!("no database configured, using in-memory repositories");
            return Ok(None);
        }
    };

    info!("connecting to database");
    let pool = PgPoolOptions::new()
        .max_connections(max_conns)
        .connect(&url)
        .await?;
    info!("database connection pool established");

    if run_migrations {
        sqlx::migrate!("../../../database/appmail-db/migrations")
            .run(&pool)
            .await?;
        info!("database migrations applied");
    }

    Ok(Some(pool))
}
