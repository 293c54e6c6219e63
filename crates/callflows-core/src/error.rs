use callflows_content_store::ContentStoreError;
use std::collections::BTreeMap;
use thiserror::Error;

/// Field -> reason map describing why a flow document was rejected
pub type ConstraintViolations = BTreeMap<String, String>;

/// Broad category of a [`CallFlowError`], for presentation layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad input (400)
    InvalidArgument,
    /// Name conflict (409)
    AlreadyExists,
    /// Backend unavailable or broken (500)
    StorageFailure,
    /// Caller lacks the required privilege (403)
    Unauthorized,
}

/// Core error type for the call flow services
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallFlowError {
    /// Malformed name, unknown id or name, bad request value
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Flow document failed structural validation
    #[error("Invalid flow document: {}", format_violations(.0))]
    InvalidDocument(ConstraintViolations),

    /// Another entity already holds the name
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Storage collaborator failure
    #[error("Storage failure: {0}")]
    StorageFailure(String),

    /// Settings document could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Missing privilege
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

fn format_violations(violations: &ConstraintViolations) -> String {
    violations
        .iter()
        .map(|(field, reason)| format!("{} -> {}", field, reason))
        .collect::<Vec<_>>()
        .join(", ")
}

impl CallFlowError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CallFlowError::InvalidArgument(_) | CallFlowError::InvalidDocument(_) => {
                ErrorKind::InvalidArgument
            }
            CallFlowError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            CallFlowError::StorageFailure(_) | CallFlowError::Serialization(_) => {
                ErrorKind::StorageFailure
            }
            CallFlowError::Unauthorized(_) => ErrorKind::Unauthorized,
        }
    }

    /// Stable error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            CallFlowError::InvalidArgument(_) => "ERR_CALLFLOW_INVALID_ARGUMENT",
            CallFlowError::InvalidDocument(_) => "ERR_CALLFLOW_INVALID_DOCUMENT",
            CallFlowError::AlreadyExists(_) => "ERR_CALLFLOW_ALREADY_EXISTS",
            CallFlowError::StorageFailure(_) => "ERR_CALLFLOW_STORAGE_FAILURE",
            CallFlowError::Serialization(_) => "ERR_CALLFLOW_SERIALIZATION",
            CallFlowError::Unauthorized(_) => "ERR_CALLFLOW_UNAUTHORIZED",
        }
    }

    /// Constraint violations carried by a document error, if any
    pub fn violations(&self) -> Option<&ConstraintViolations> {
        match self {
            CallFlowError::InvalidDocument(violations) => Some(violations),
            _ => None,
        }
    }
}

impl From<ContentStoreError> for CallFlowError {
    fn from(err: ContentStoreError) -> Self {
        CallFlowError::StorageFailure(err.to_string())
    }
}

impl From<serde_json::Error> for CallFlowError {
    fn from(err: serde_json::Error) -> Self {
        CallFlowError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let mut violations = ConstraintViolations::new();
        violations.insert("raw".to_string(), "Flow document is empty".to_string());

        let errors = vec![
            (CallFlowError::InvalidArgument("bad".to_string()), "Invalid argument: bad"),
            (
                CallFlowError::InvalidDocument(violations),
                "Invalid flow document: raw -> Flow document is empty",
            ),
            (CallFlowError::AlreadyExists("MainFlow".to_string()), "Already exists: MainFlow"),
            (CallFlowError::StorageFailure("disk".to_string()), "Storage failure: disk"),
            (CallFlowError::Serialization("eof".to_string()), "Serialization error: eof"),
            (CallFlowError::Unauthorized("nope".to_string()), "Unauthorized: nope"),
        ];

        for (error, expected_msg) in errors {
            assert_eq!(error.to_string(), expected_msg);
        }
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            CallFlowError::InvalidDocument(ConstraintViolations::new()).kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(CallFlowError::AlreadyExists(String::new()).kind(), ErrorKind::AlreadyExists);
        assert_eq!(CallFlowError::Serialization(String::new()).kind(), ErrorKind::StorageFailure);
        assert_eq!(CallFlowError::Unauthorized(String::new()).kind(), ErrorKind::Unauthorized);
    }

    #[test]
    fn test_from_content_store_error() {
        let error: CallFlowError = ContentStoreError::NotFound("settings.json".to_string()).into();
        match error {
            CallFlowError::StorageFailure(msg) => assert!(msg.contains("settings.json")),
            _ => panic!("Expected StorageFailure variant"),
        }
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error: CallFlowError = json_error.into();

        match error {
            CallFlowError::Serialization(msg) => assert!(msg.contains("expected value")),
            _ => panic!("Expected Serialization variant"),
        }
    }
}
