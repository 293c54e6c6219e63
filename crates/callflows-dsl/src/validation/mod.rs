use std::error::Error;
use std::fmt;

use crate::error::DslError;
use crate::flow::Flow;

mod flow_validator;
mod node_validator;

pub use flow_validator::FlowValidator;
pub use node_validator::NodeValidator;

/// Represents a validation error found in a flow document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error code (should be a constant identifier)
    pub code: &'static str,

    /// Human-readable error message
    pub message: String,

    /// Optional path to the location of the error (e.g., "nodes[2].step")
    pub path: Option<String>,
}

impl ValidationError {
    pub(crate) fn at(code: &'static str, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(path) = &self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl Error for ValidationError {}

/// Validation error codes
pub mod error_codes {
    /// Missing required field
    pub const MISSING_REQUIRED_FIELD: &str = "ERR_DSL_VALIDATION_MISSING_REQUIRED_FIELD";

    /// A required text value is empty or whitespace
    pub const BLANK_VALUE: &str = "ERR_DSL_VALIDATION_BLANK_VALUE";

    /// Two nodes share the same step name
    pub const DUPLICATE_STEP: &str = "ERR_DSL_VALIDATION_DUPLICATE_STEP";

    /// Unknown node type
    pub const INVALID_NODE_TYPE: &str = "ERR_DSL_VALIDATION_INVALID_NODE_TYPE";

    /// A user node without templates
    pub const MISSING_TEMPLATE: &str = "ERR_DSL_VALIDATION_MISSING_TEMPLATE";
}

/// A trait for validators that check specific aspects of a flow
pub trait Validator {
    /// Validate the flow and return a list of validation errors (if any)
    fn validate(&self, flow: &Flow) -> Vec<ValidationError>;
}

/// Run every structural validator over a parsed flow
pub fn validate_flow(flow: &Flow) -> Result<(), DslError> {
    let validators: Vec<Box<dyn Validator>> = vec![
        Box::new(FlowValidator::new()),
        Box::new(NodeValidator::new()),
    ];

    let errors: Vec<ValidationError> = validators
        .iter()
        .flat_map(|validator| validator.validate(flow))
        .collect();

    if !errors.is_empty() {
        return Err(DslError::from_validation_errors(errors));
    }

    Ok(())
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
