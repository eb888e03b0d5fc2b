use crate::{config::DatabaseConfig, error::ConnectError};
use log::info;
use sea_orm::{Database, DatabaseConnection};

/// Creates a database connection pool from the environment
pub async fn create_connection() -> Result<DatabaseConnection, ConnectError> {
    let config = DatabaseConfig::from_env()?;
    info!(
        "Connecting to database with up to {} connections",
        config.max_connections
    );

    Ok(Database::connect(config.connect_options()).await?)
}
