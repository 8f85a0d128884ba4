use anyhow::{Context, Result};
use lightbnb_config::AppConfig;
use lightbnb_database::{initialize_database, QueryGateway};
use sqlx::SqlitePool;
use tracing::info;

pub mod telemetry {
    use anyhow::Result;
    use tracing::Level;
    use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

    pub fn init_tracing() -> Result<()> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = SubscriberBuilder::default()
            .with_max_level(Level::DEBUG)
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))
    }
}

/// Process-wide handles, created once at startup and closed at shutdown.
#[derive(Clone)]
pub struct BackendServices {
    pub db_pool: SqlitePool,
    pub gateway: QueryGateway,
}

impl BackendServices {
    pub async fn initialise(config: &AppConfig) -> Result<Self> {
        let db_pool = initialize_database(&config.database)
            .await
            .context("failed to initialise database")?;

        let gateway = QueryGateway::with_default_limit(db_pool.clone(), config.search.default_limit);

        info!(
            max_connections = config.database.max_connections,
            default_limit = config.search.default_limit,
            "query gateway ready"
        );

        Ok(Self { db_pool, gateway })
    }

    /// Close the pool. Gateway calls made afterwards return `None`.
    pub async fn shutdown(self) {
        self.db_pool.close().await;
        info!("database pool closed");
    }
}
