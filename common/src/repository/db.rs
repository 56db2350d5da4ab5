use crate::config::DatabaseConfig;
use anyhow::{Result, anyhow};
use log::info;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};

pub struct Db;

impl Db {
    /// Opens a MongoDB client and returns the configured database handle.
    pub async fn connect(config: &DatabaseConfig) -> Result<Database> {
        let client_options = ClientOptions::parse(&config.url)
            .await
            .map_err(|e| anyhow!("MongoDB URI parse error: {}", e))?;

        let client = Client::with_options(client_options)
            .map_err(|e| anyhow!("MongoDB client init error: {}", e))?;

        info!("MongoDB client ready, database '{}'", config.db_name);
        Ok(client.database(&config.db_name))
    }
}
