//! # Call Flows DSL
//!
//! A call flow is stored as a JSON document describing the nodes of an IVR
//! script. This crate provides the document model, the parser and the
//! structural validators used before a flow is persisted.
//!
//! Validation is structural only: nodes are never executed here.
//!
//! ## Example
//!
//! ```
//! use callflows_dsl::parse_and_validate_flow;
//!
//! let raw = r#"{
//!     "name": "MainFlow",
//!     "nodes": [
//!         { "nodeType": "system", "step": "|entry|" },
//!         {
//!             "nodeType": "user",
//!             "step": "welcome",
//!             "templates": { "vxml": { "content": "<vxml/>" } }
//!         }
//!     ]
//! }"#;
//!
//! let flow = parse_and_validate_flow(raw).unwrap();
//! assert_eq!(flow.nodes.len(), 2);
//! ```

mod error;
mod parser;

pub mod flow;
pub mod validation;

pub use error::DslError;
pub use flow::{Flow, Node, NodeType, Template};
pub use validation::ValidationError;

/// Parse and validate a raw flow document.
///
/// 1. Parses the JSON into a [`Flow`]
/// 2. Runs every structural validator, collecting all problems
///
/// # Errors
///
/// * Blank document
/// * Invalid JSON syntax or a non-object document
/// * Missing `name` / `nodes`, or fields of the wrong type
/// * Structural violations (blank names, duplicate steps, unknown node
///   types, user nodes without templates, blank templates)
///
/// ```
/// use callflows_dsl::{parse_and_validate_flow, DslError};
///
/// let result = parse_and_validate_flow(r#"{"name":"Main","nodes":[
///     {"nodeType":"system","step":"a"},
///     {"nodeType":"system","step":"a"}
/// ]}"#);
///
/// let err = result.unwrap_err();
/// assert!(err.error_code().contains("DUPLICATE_STEP"));
/// assert!(err.constraint_violations("raw").contains_key("raw.nodes[1].step"));
/// ```
pub fn parse_and_validate_flow(raw: &str) -> Result<Flow, DslError> {
    let flow = parser::parse_flow_document(raw)?;

    validation::validate_flow(&flow)?;

    Ok(flow)
}

/// Returns a version string for the DSL crate
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
