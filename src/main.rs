use agrolibro::{
    config::{
        AppConfig,
        database::{create_connection, create_tables, seed_admin_user, seed_roles},
    },
    errors::Result,
    http::{self, AppState},
};
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Non-fatal: env vars can be set externally.
    dotenv().ok();

    let config = AppConfig::load()?;
    info!("configuration loaded");

    let db = create_connection(&config.database_url)
        .await
        .inspect(|_| info!("database ready"))
        .inspect_err(|e| error!("failed to open database: {e}"))?;

    create_tables(&db).await?;
    seed_roles(&db).await?;
    seed_admin_user(&db, &config).await?;

    let state = AppState::new(db, config.session_ttl());
    http::serve(&config.bind_addr, state).await
}
