use mongodb::bson::doc;

use crate::models::{AdminUser, BootstrapSpec, CollectionSpec, RoleGrant, SchemaRevision};

/// Target database namespace
pub const DATABASE: &str = "strava";

// Collection names the API reads and writes
pub const USERS: &str = "users";
pub const SYNC_METADATA: &str = "sync_metadata";
pub const ACTIVITIES: &str = "activities";

/// Versioned declaration for the strava dev database.
///
/// Revision 1 is the initial dev schema with its placeholder collection;
/// revision 2 adds the collections the activity sync writes to. Revisions
/// are additive only, so the placeholder stays in the history.
pub fn bootstrap_spec() -> BootstrapSpec {
    BootstrapSpec {
        database: DATABASE.to_string(),
        admin_user: AdminUser {
            // Dev-only credentials
            username: "admin".to_string(),
            password: "admin".to_string(),
            roles: vec![RoleGrant {
                role: "readWrite".to_string(),
                db: DATABASE.to_string(),
            }],
        },
        revisions: vec![
            SchemaRevision {
                version: 1,
                collections: vec![
                    CollectionSpec {
                        name: "test".to_string(),
                        seeds: vec![doc! { "name": "test", "message": "Hello, world!" }],
                    },
                    CollectionSpec {
                        name: USERS.to_string(),
                        seeds: vec![],
                    },
                ],
            },
            SchemaRevision {
                version: 2,
                collections: vec![
                    CollectionSpec {
                        name: SYNC_METADATA.to_string(),
                        seeds: vec![],
                    },
                    CollectionSpec {
                        name: ACTIVITIES.to_string(),
                        seeds: vec![],
                    },
                ],
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_is_valid() {
        assert!(bootstrap_spec().validate().is_ok());
    }

    #[test]
    fn test_declared_collections() {
        let spec = bootstrap_spec();
        let names: Vec<&str> = spec.collections().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["test", USERS, SYNC_METADATA, ACTIVITIES]);
    }

    #[test]
    fn test_placeholder_seed_document() {
        let spec = bootstrap_spec();
        let placeholder = spec.collections().find(|c| c.name == "test").unwrap();
        assert_eq!(placeholder.seeds.len(), 1);
        assert_eq!(placeholder.seeds[0].get_str("name").unwrap(), "test");
        assert_eq!(
            placeholder.seeds[0].get_str("message").unwrap(),
            "Hello, world!"
        );
    }

    #[test]
    fn test_admin_role_scope() {
        let spec = bootstrap_spec();
        assert_eq!(spec.admin_user.username, "admin");
        assert_eq!(spec.admin_user.roles.len(), 1);
        assert_eq!(spec.admin_user.roles[0].role, "readWrite");
        assert_eq!(spec.admin_user.roles[0].db, DATABASE);
    }

    #[test]
    fn test_only_placeholder_is_seeded() {
        let spec = bootstrap_spec();
        for collection in spec.collections().filter(|c| c.name != "test") {
            assert!(collection.seeds.is_empty(), "{} has seeds", collection.name);
        }
    }
}
