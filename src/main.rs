mod bootstrap;
mod database;
mod models;
mod seeds;
mod utils;

use dotenv::dotenv;
use std::env;

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    if let Err(err) = run().await {
        log::error!("❌ Provisioning failed: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let uri = env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

    let spec = seeds::strava::bootstrap_spec();

    log::info!("🚀 Starting database provisioning...");
    log::info!("📊 Target database: {}", spec.database);

    let mongo = database::MongoDB::new(&uri, &spec.database).await?;

    let report = bootstrap::apply(&mongo, &spec).await?;

    log::info!(
        "✅ Provisioning complete: {} collection(s) created, {} already present, {} document(s) seeded",
        report.collections_created.len(),
        report.collections_existing.len(),
        report.documents_seeded
    );

    mongo.shutdown().await;

    Ok(())
}
