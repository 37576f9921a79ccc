use mongodb::bson::doc;
use mongodb::{Client, Collection, Database};

use crate::utils::error::BootstrapError;

/// MongoDB connection manager
#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    /// Connects to the server and verifies the connection with a ping
    /// before any provisioning step touches state.
    pub async fn new(uri: &str, database: &str) -> Result<Self, BootstrapError> {
        log::info!("Connecting to MongoDB at {}", uri);

        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;
        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = client.database(database);

        db.run_command(doc! { "ping": 1 }).await?;

        log::info!("Successfully connected to MongoDB database: {}", database);

        Ok(Self { client, db })
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub async fn shutdown(self) {
        self.client.shutdown().await;
        log::info!("MongoDB connection closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_mongodb_connection() {
        dotenv::dotenv().ok();
        let uri = std::env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

        let mongo = MongoDB::new(&uri, "strava").await;
        assert!(mongo.is_ok());
    }

    #[tokio::test]
    #[ignore] // Slow: waits out the server selection timeout
    async fn test_unreachable_server_is_connection_failure() {
        let result = MongoDB::new("mongodb://localhost:1", "strava").await;
        match result {
            Err(BootstrapError::ConnectionFailure(_)) => {}
            other => panic!("expected ConnectionFailure, got {:?}", other.map(|_| ())),
        }
    }
}
