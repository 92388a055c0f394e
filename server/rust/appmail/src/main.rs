use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use appmail_server::adapter::handler::{self, AppState};
use appmail_server::adapter::repository::in_memory::{
    InMemoryEmailTemplateRepository, InMemoryEmailTemplateTranslationRepository,
};
use appmail_server::adapter::repository::template_postgres::TemplatePostgresRepository;
use appmail_server::adapter::repository::translation_postgres::TranslationPostgresRepository;
use appmail_server::domain::repository::{
    EmailTemplateRepository, EmailTemplateTranslationRepository,
};
use appmail_server::infrastructure::config::Config;
use appmail_server::infrastructure::database;
use appmail_server::infrastructure::html2text_converter::Html2TextConverter;
use appmail_server::infrastructure::logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Config
    let config_path =
        std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/config.yaml".to_string());
    let cfg = Config::load(&config_path)?;

    // Logger
    logger::init_logger(&cfg.app.environment, &cfg.log.format, cfg.log.level.as_deref());

    info!(
        app_name = %cfg.app.name,
        version = %cfg.app.version,
        environment = %cfg.app.environment,
        "starting appmail server"
    );

    // Repositories
    let (template_repo, translation_repo): (
        Arc<dyn EmailTemplateRepository>,
        Arc<dyn EmailTemplateTranslationRepository>,
    ) = match database::connect(cfg.database.as_ref()).await? {
        Some(pool) => {
            let pool = Arc::new(pool);
            (
                Arc::new(TemplatePostgresRepository::new(pool.clone())),
                Arc::new(TranslationPostgresRepository::new(pool)),
            )
        }
        None => {
            let translations = Arc::new(InMemoryEmailTemplateTranslationRepository::new());
            (
                Arc::new(InMemoryEmailTemplateRepository::new(translations.clone())),
                translations,
            )
        }
    };

    let locales = Arc::new(cfg.locale.to_settings());
    info!(
        default_locale = %locales.default_locale(),
        languages = locales.languages().len(),
        "locale settings loaded"
    );

    let state = AppState::new(
        template_repo,
        translation_repo,
        locales,
        Arc::new(Html2TextConverter::default()),
    );
    let app = handler::router(state);

    // REST server
    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!("REST server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("appmail server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
