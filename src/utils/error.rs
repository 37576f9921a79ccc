use mongodb::error::{Error as MongoError, ErrorKind};
use std::fmt;

// MongoDB server error codes surfaced during provisioning
const NAMESPACE_EXISTS: i32 = 48;
const USER_ALREADY_EXISTS: i32 = 51003;

#[derive(Debug)]
pub enum BootstrapError {
    ConnectionFailure(String),
    UserAlreadyExists(String),
    CollectionAlreadyExists(String),
    InvalidSpec(String),
    DatabaseError(String),
}

impl fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootstrapError::ConnectionFailure(msg) => write!(f, "Connection failure: {}", msg),
            BootstrapError::UserAlreadyExists(msg) => write!(f, "User already exists: {}", msg),
            BootstrapError::CollectionAlreadyExists(msg) => {
                write!(f, "Collection already exists: {}", msg)
            }
            BootstrapError::InvalidSpec(msg) => write!(f, "Invalid bootstrap spec: {}", msg),
            BootstrapError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for BootstrapError {}

impl From<MongoError> for BootstrapError {
    fn from(err: MongoError) -> Self {
        match &*err.kind {
            ErrorKind::Command(command) => match command.code {
                USER_ALREADY_EXISTS => BootstrapError::UserAlreadyExists(command.message.clone()),
                NAMESPACE_EXISTS => BootstrapError::CollectionAlreadyExists(command.message.clone()),
                _ => BootstrapError::DatabaseError(err.to_string()),
            },
            ErrorKind::ServerSelection { message, .. } => {
                BootstrapError::ConnectionFailure(message.clone())
            }
            ErrorKind::DnsResolve { message, .. } => {
                BootstrapError::ConnectionFailure(message.clone())
            }
            ErrorKind::Authentication { message, .. } => {
                BootstrapError::ConnectionFailure(message.clone())
            }
            ErrorKind::Io(io_err) => BootstrapError::ConnectionFailure(io_err.to_string()),
            _ => BootstrapError::DatabaseError(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BootstrapError::InvalidSpec("database name is empty".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid bootstrap spec: database name is empty"
        );

        let err = BootstrapError::ConnectionFailure("server selection timeout".to_string());
        assert_eq!(
            err.to_string(),
            "Connection failure: server selection timeout"
        );

        let err = BootstrapError::CollectionAlreadyExists("ns exists".to_string());
        assert_eq!(err.to_string(), "Collection already exists: ns exists");
    }
}
