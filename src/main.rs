use tracing_subscriber::EnvFilter;

use rxdesk::api::server;
use rxdesk::api::types::ApiContext;
use rxdesk::{config, db, seed};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let db_path = config::database_path();
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Migrate and seed once at startup; requests open their own connections.
    let conn = db::open_database(&db_path)?;
    seed::seed_demo_data(&conn)?;
    drop(conn);

    let ctx = ApiContext::new(db_path);
    server::serve(&config::bind_addr(), ctx).await?;
    Ok(())
}
