use serde_json::Value;

use crate::error::DslError;
use crate::flow::Flow;
use crate::validation::{error_codes, ValidationError};

const REQUIRED_FIELDS: [&str; 2] = ["name", "nodes"];

/// Parse a raw JSON string into a Flow.
///
/// Only checks that the text is a JSON object carrying the required fields
/// with the right types. Structural rules are handled separately by the
/// validation module.
pub fn parse_flow_document(raw: &str) -> Result<Flow, DslError> {
    if raw.trim().is_empty() {
        return Err(DslError::EmptyDocument);
    }

    let value: Value = serde_json::from_str(raw)?;

    let object = match value.as_object() {
        Some(object) => object,
        None => {
            return Err(DslError::InvalidStructure(
                "flow document must be a JSON object".to_string(),
            ))
        }
    };

    let missing: Vec<ValidationError> = REQUIRED_FIELDS
        .iter()
        .filter(|field| !object.contains_key(**field))
        .map(|field| {
            ValidationError::at(
                error_codes::MISSING_REQUIRED_FIELD,
                format!("Missing required field '{}'", field),
                *field,
            )
        })
        .collect();

    if !missing.is_empty() {
        return Err(DslError::from_validation_errors(missing));
    }

    serde_json::from_value(value).map_err(|err| DslError::InvalidStructure(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_document() {
        let flow = parse_flow_document(r#"{"name":"MainFlow","nodes":[]}"#).unwrap();
        assert_eq!(flow.name, "MainFlow");
        assert!(flow.nodes.is_empty());
        assert!(flow.description.is_none());
    }

    #[test]
    fn test_blank_document() {
        assert!(matches!(parse_flow_document("   \n"), Err(DslError::EmptyDocument)));
    }

    #[test]
    fn test_invalid_json_syntax() {
        match parse_flow_document("{\"name\": ") {
            Err(DslError::JsonError(_)) => {}
            other => panic!("Expected JsonError, got {:?}", other),
        }
    }

    #[test]
    fn test_not_an_object() {
        assert!(matches!(
            parse_flow_document("[1, 2, 3]"),
            Err(DslError::InvalidStructure(_))
        ));
    }

    #[test]
    fn test_missing_fields_reported_together() {
        match parse_flow_document("{}") {
            Err(DslError::MultipleValidationErrors(errors)) => {
                let paths: Vec<_> = errors.iter().filter_map(|e| e.path.as_deref()).collect();
                assert_eq!(paths, vec!["name", "nodes"]);
            }
            other => panic!("Expected MultipleValidationErrors, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_field_type() {
        let result = parse_flow_document(r#"{"name":"MainFlow","nodes":"none"}"#);
        assert!(matches!(result, Err(DslError::InvalidStructure(_))));
    }
}
