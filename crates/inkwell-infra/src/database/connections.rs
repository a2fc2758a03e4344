use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

/// Configuration for the database pool.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Pooled connection to the blog database.
///
/// # Example
/// ```ignore
/// let db = DatabaseConnections::init(&config).await?;
/// let blogs = PostgresBlogRepository::new(db.main.clone());
/// ```
pub struct DatabaseConnections {
    pub main: DbConn,
}

impl DatabaseConnections {
    /// Open the pool described by `config`.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, DbErr> {
        tracing::info!("Initializing database connection pool...");

        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(true)
            .to_owned();

        let main = Database::connect(opts).await?;
        tracing::info!(pool = config.max_connections, "Database connected");

        Ok(Self { main })
    }
}
