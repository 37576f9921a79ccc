use mongodb::bson::{doc, Document};
use serde::Serialize;

use crate::database::MongoDB;
use crate::models::{BootstrapSpec, CollectionSpec};
use crate::utils::error::BootstrapError;

/// Summary of what a bootstrap run actually applied
#[derive(Debug, Serialize)]
pub struct BootstrapReport {
    pub user_created: bool,
    pub collections_created: Vec<String>,
    pub collections_existing: Vec<String>,
    pub documents_seeded: u64,
    pub finished_at: i64,
}

/// Applies the declared state to the target database.
///
/// Runs to completion in declaration order: admin user first, then each
/// schema revision. Already-provisioned users and collections are benign
/// and skipped; any other error aborts the remaining steps. No retries,
/// no rollback.
pub async fn apply(
    mongo: &MongoDB,
    spec: &BootstrapSpec,
) -> Result<BootstrapReport, BootstrapError> {
    spec.validate()?;

    let user_created = ensure_admin_user(mongo, spec).await?;

    let mut collections_created = Vec::new();
    let mut collections_existing = Vec::new();
    let mut documents_seeded = 0u64;

    for revision in &spec.revisions {
        log::info!("📋 Applying schema revision {}...", revision.version);
        for collection in &revision.collections {
            if ensure_collection(mongo, collection).await? {
                documents_seeded += seed_collection(mongo, collection).await?;
                collections_created.push(collection.name.clone());
            } else {
                collections_existing.push(collection.name.clone());
            }
        }
    }

    Ok(BootstrapReport {
        user_created,
        collections_created,
        collections_existing,
        documents_seeded,
        finished_at: chrono::Utc::now().timestamp(),
    })
}

/// Creates the admin user on the target database. Returns false when an
/// earlier run already provisioned it; the existing user is left untouched.
async fn ensure_admin_user(mongo: &MongoDB, spec: &BootstrapSpec) -> Result<bool, BootstrapError> {
    let user = &spec.admin_user;
    let roles: Vec<Document> = user
        .roles
        .iter()
        .map(|grant| doc! { "role": &grant.role, "db": &grant.db })
        .collect();

    let command = doc! {
        "createUser": &user.username,
        "pwd": &user.password,
        "roles": roles,
    };

    match mongo.database().run_command(command).await {
        Ok(_) => {
            log::info!("   ✅ Created user '{}'", user.username);
            Ok(true)
        }
        Err(err) => match BootstrapError::from(err) {
            BootstrapError::UserAlreadyExists(_) => {
                log::info!("   ℹ️  User '{}' already exists, skipping", user.username);
                Ok(false)
            }
            other => Err(other),
        },
    }
}

/// Creates the collection if absent. Returns true when this run created it.
async fn ensure_collection(
    mongo: &MongoDB,
    collection: &CollectionSpec,
) -> Result<bool, BootstrapError> {
    match mongo
        .database()
        .create_collection(collection.name.as_str())
        .await
    {
        Ok(()) => {
            log::info!("   ✅ Created collection '{}'", collection.name);
            Ok(true)
        }
        Err(err) => match BootstrapError::from(err) {
            BootstrapError::CollectionAlreadyExists(_) => {
                log::info!(
                    "   ℹ️  Collection '{}' already exists, skipping",
                    collection.name
                );
                Ok(false)
            }
            other => Err(other),
        },
    }
}

/// Inserts the declared seed documents. Only called for collections created
/// in this run, so repeated bootstraps never duplicate seed rows.
async fn seed_collection(
    mongo: &MongoDB,
    collection: &CollectionSpec,
) -> Result<u64, BootstrapError> {
    if collection.seeds.is_empty() {
        return Ok(0);
    }

    let handle = mongo.collection::<Document>(&collection.name);
    let result = handle.insert_many(&collection.seeds).await?;
    log::info!(
        "   🌱 Seeded {} document(s) into '{}'",
        result.inserted_ids.len(),
        collection.name
    );

    Ok(result.inserted_ids.len() as u64)
}
