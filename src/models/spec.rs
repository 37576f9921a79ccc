use mongodb::bson::Document;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::utils::error::BootstrapError;

/// One (role, database) grant held by the admin user
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RoleGrant {
    pub role: String,
    pub db: String,
}

/// Application user created once at provisioning time
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AdminUser {
    pub username: String,
    pub password: String,
    pub roles: Vec<RoleGrant>,
}

/// A collection that must exist after bootstrap, with optional seed documents
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CollectionSpec {
    pub name: String,
    #[serde(default)]
    pub seeds: Vec<Document>,
}

/// One additive step in the schema history. Collections declared in an
/// earlier revision are never dropped by a later one.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SchemaRevision {
    pub version: u32,
    pub collections: Vec<CollectionSpec>,
}

/// Declarative description of the desired database state
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BootstrapSpec {
    pub database: String,
    pub admin_user: AdminUser,
    pub revisions: Vec<SchemaRevision>,
}

impl BootstrapSpec {
    /// All declared collections, in revision order
    pub fn collections(&self) -> impl Iterator<Item = &CollectionSpec> {
        self.revisions
            .iter()
            .flat_map(|revision| revision.collections.iter())
    }

    /// Checks the declaration before any side effect is applied
    pub fn validate(&self) -> Result<(), BootstrapError> {
        if self.database.is_empty() {
            return Err(BootstrapError::InvalidSpec(
                "database name is empty".to_string(),
            ));
        }
        if self.admin_user.username.is_empty() {
            return Err(BootstrapError::InvalidSpec(
                "admin username is empty".to_string(),
            ));
        }
        if self.admin_user.password.is_empty() {
            return Err(BootstrapError::InvalidSpec(
                "admin password is empty".to_string(),
            ));
        }
        for grant in &self.admin_user.roles {
            if grant.db != self.database {
                return Err(BootstrapError::InvalidSpec(format!(
                    "role '{}' is scoped to '{}', expected '{}'",
                    grant.role, grant.db, self.database
                )));
            }
        }

        let mut last_version = 0u32;
        for revision in &self.revisions {
            if revision.version <= last_version {
                return Err(BootstrapError::InvalidSpec(format!(
                    "revision versions must be strictly increasing, got {} after {}",
                    revision.version, last_version
                )));
            }
            last_version = revision.version;
        }

        let mut seen = HashSet::new();
        for collection in self.collections() {
            if collection.name.is_empty() {
                return Err(BootstrapError::InvalidSpec(
                    "collection name is empty".to_string(),
                ));
            }
            if !seen.insert(collection.name.as_str()) {
                return Err(BootstrapError::InvalidSpec(format!(
                    "duplicate collection name '{}'",
                    collection.name
                )));
            }
        }

        Ok(())
    }
}
