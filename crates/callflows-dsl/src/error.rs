use crate::validation::ValidationError;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// All possible errors that can occur while processing a flow document
#[derive(Error, Debug)]
pub enum DslError {
    /// The document is missing or blank
    #[error("Flow document is empty")]
    EmptyDocument,

    /// Errors that occur during JSON processing
    #[error("JSON processing error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The document parsed but is not shaped like a flow
    #[error("Invalid document structure: {0}")]
    InvalidStructure(String),

    /// A single validation error
    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationError),

    /// Multiple validation errors
    #[error("{}", MultipleErrorsFormat(.0))]
    MultipleValidationErrors(Vec<ValidationError>),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

// Helper struct to format multiple errors
struct MultipleErrorsFormat<'a>(&'a [ValidationError]);

impl fmt::Display for MultipleErrorsFormat<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Multiple validation errors ({} issues):", self.0.len())?;
        for (i, err) in self.0.iter().enumerate() {
            write!(f, "\n  {}. {}", i + 1, err)?;
        }
        Ok(())
    }
}

impl DslError {
    /// Create a DslError from a vector of validation errors
    pub fn from_validation_errors(mut errors: Vec<ValidationError>) -> Self {
        match errors.len() {
            0 => DslError::InternalError("Called from_validation_errors with empty vector".to_string()),
            1 => match errors.pop() {
                Some(error) => DslError::ValidationError(error),
                None => DslError::InternalError("Validation error vanished".to_string()),
            },
            _ => DslError::MultipleValidationErrors(errors),
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            DslError::EmptyDocument => "ERR_DSL_EMPTY_DOCUMENT",
            DslError::JsonError(_) => "ERR_DSL_JSON_PARSE",
            DslError::InvalidStructure(_) => "ERR_DSL_INVALID_STRUCTURE",
            DslError::ValidationError(err) => err.code,
            DslError::MultipleValidationErrors(_) => "ERR_DSL_VALIDATION_MULTIPLE",
            DslError::InternalError(_) => "ERR_DSL_INTERNAL",
        }
    }

    /// Flatten this error into a field -> message map.
    ///
    /// Keys are `root` for document-level problems and `root.<path>` for
    /// problems located inside the document. Messages sharing a key are
    /// joined with `"; "`.
    pub fn constraint_violations(&self, root: &str) -> BTreeMap<String, String> {
        let mut violations = BTreeMap::new();

        match self {
            DslError::ValidationError(err) => add_violation(&mut violations, root, err),
            DslError::MultipleValidationErrors(errors) => {
                for err in errors {
                    add_violation(&mut violations, root, err);
                }
            }
            other => {
                violations.insert(root.to_string(), other.to_string());
            }
        }

        violations
    }
}

fn add_violation(violations: &mut BTreeMap<String, String>, root: &str, err: &ValidationError) {
    let key = match &err.path {
        Some(path) => format!("{}.{}", root, path),
        None => root.to_string(),
    };

    violations
        .entry(key)
        .and_modify(|existing: &mut String| {
            existing.push_str("; ");
            existing.push_str(&err.message);
        })
        .or_insert_with(|| err.message.clone());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::error_codes;
    use pretty_assertions::assert_eq;

    fn error(code: &'static str, message: &str, path: Option<&str>) -> ValidationError {
        ValidationError {
            code,
            message: message.to_string(),
            path: path.map(str::to_string),
        }
    }

    #[test]
    fn test_from_validation_errors() {
        assert!(matches!(DslError::from_validation_errors(vec![]), DslError::InternalError(_)));

        let single = DslError::from_validation_errors(vec![error(error_codes::DUPLICATE_STEP, "dup", None)]);
        assert_eq!(single.error_code(), error_codes::DUPLICATE_STEP);

        let multiple = DslError::from_validation_errors(vec![
            error(error_codes::DUPLICATE_STEP, "dup", None),
            error(error_codes::BLANK_VALUE, "blank", None),
        ]);
        assert_eq!(multiple.error_code(), "ERR_DSL_VALIDATION_MULTIPLE");
        assert!(multiple.to_string().starts_with("Multiple validation errors (2 issues):"));
    }

    #[test]
    fn test_constraint_violations_merge_same_key() {
        let err = DslError::MultipleValidationErrors(vec![
            error(error_codes::BLANK_VALUE, "Step name is required", Some("nodes[0].step")),
            error(error_codes::DUPLICATE_STEP, "Duplicate step", Some("nodes[0].step")),
            error(error_codes::MISSING_REQUIRED_FIELD, "Missing name", Some("name")),
        ]);

        let violations = err.constraint_violations("raw");

        let mut expected = BTreeMap::new();
        expected.insert("raw.name".to_string(), "Missing name".to_string());
        expected.insert(
            "raw.nodes[0].step".to_string(),
            "Step name is required; Duplicate step".to_string(),
        );
        assert_eq!(violations, expected);
    }

    #[test]
    fn test_constraint_violations_for_document_errors() {
        let violations = DslError::EmptyDocument.constraint_violations("raw");
        assert_eq!(violations.get("raw").map(String::as_str), Some("Flow document is empty"));
    }
}
