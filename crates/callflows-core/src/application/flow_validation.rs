use callflows_dsl::{parse_and_validate_flow, Flow};
use std::sync::Arc;

use crate::domain::call_flow::CallFlow;
use crate::domain::validation::validate_name;
use crate::error::{CallFlowError, ConstraintViolations};

/// Key under which document-level violations are reported
pub const RAW_FIELD: &str = "raw";

/// Parses and structurally validates a raw flow document
pub trait FlowDocumentValidator: Send + Sync {
    /// Parse `raw`, returning the flow or every violation found
    fn parse_and_validate(&self, raw: &str) -> Result<Flow, ConstraintViolations>;
}

/// [`FlowDocumentValidator`] backed by the DSL crate
#[derive(Debug, Default, Clone)]
pub struct DslFlowDocumentValidator;

impl FlowDocumentValidator for DslFlowDocumentValidator {
    fn parse_and_validate(&self, raw: &str) -> Result<Flow, ConstraintViolations> {
        parse_and_validate_flow(raw).map_err(|err| err.constraint_violations(RAW_FIELD))
    }
}

/// Validates a whole call flow: name first, then document
#[derive(Clone)]
pub struct CallFlowValidator {
    documents: Arc<dyn FlowDocumentValidator>,
}

impl CallFlowValidator {
    /// Create a validator using `documents` for the raw document
    pub fn new(documents: Arc<dyn FlowDocumentValidator>) -> Self {
        Self { documents }
    }

    /// Validate `call_flow`, returning the parsed document on success
    pub fn validate(&self, call_flow: &CallFlow) -> Result<Flow, CallFlowError> {
        validate_name(&call_flow.name)?;
        self.documents
            .parse_and_validate(&call_flow.raw)
            .map_err(CallFlowError::InvalidDocument)
    }
}

impl Default for CallFlowValidator {
    fn default() -> Self {
        Self::new(Arc::new(DslFlowDocumentValidator))
    }
}

impl std::fmt::Debug for CallFlowValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallFlowValidator").finish_non_exhaustive()
    }
}
