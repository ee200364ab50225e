//! Error types for aac

use thiserror::Error;

/// Result type alias for aac operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for all document store operations
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    /// The value handed to an insert is not a mapping
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("MongoDB error: {0}")]
    MongoDB(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl StoreError {
    /// Returns true if the caller supplied something the store cannot accept
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            StoreError::InvalidDocument(_) | StoreError::Serialization(_)
        )
    }

    /// Returns true if the failure came from the database driver or server
    pub fn is_driver_error(&self) -> bool {
        matches!(self, StoreError::MongoDB(_) | StoreError::Connection(_))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

// MongoDB-specific error conversions (when mongodb-errors feature is enabled)
#[cfg(feature = "mongodb-errors")]
impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::MongoDB(err.to_string())
    }
}

#[cfg(feature = "mongodb-errors")]
impl From<bson::ser::Error> for StoreError {
    fn from(err: bson::ser::Error) -> Self {
        StoreError::Serialization(format!("BSON serialization error: {}", err))
    }
}

#[cfg(feature = "mongodb-errors")]
impl From<bson::de::Error> for StoreError {
    fn from(err: bson::de::Error) -> Self {
        StoreError::Serialization(format!("BSON deserialization error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_document() {
        let err = StoreError::InvalidDocument("expected a document, got string".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid document: expected a document, got string"
        );
    }

    #[test]
    fn test_error_display_mongodb() {
        let err = StoreError::MongoDB("connection refused".to_string());
        assert_eq!(err.to_string(), "MongoDB error: connection refused");
    }

    #[test]
    fn test_error_display_connection() {
        let err = StoreError::Connection("invalid URI".to_string());
        assert_eq!(err.to_string(), "Connection error: invalid URI");
    }

    #[test]
    fn test_error_display_configuration() {
        let err = StoreError::Configuration("AAC_MONGO_USERNAME is not set".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: AAC_MONGO_USERNAME is not set"
        );
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<String>("invalid").unwrap_err();
        let err: StoreError = json_err.into();
        assert!(matches!(err, StoreError::Serialization(_)));
    }

    #[test]
    fn test_error_kinds() {
        assert!(StoreError::InvalidDocument("x".to_string()).is_input_error());
        assert!(StoreError::Serialization("x".to_string()).is_input_error());
        assert!(!StoreError::MongoDB("x".to_string()).is_input_error());

        assert!(StoreError::MongoDB("x".to_string()).is_driver_error());
        assert!(StoreError::Connection("x".to_string()).is_driver_error());
        assert!(!StoreError::InvalidDocument("x".to_string()).is_driver_error());
        assert!(!StoreError::Configuration("x".to_string()).is_driver_error());
    }

    #[test]
    fn test_result_type_err() {
        let result: Result<u64> = Err(StoreError::MongoDB("failed".to_string()));
        assert!(result.is_err());
    }
}
