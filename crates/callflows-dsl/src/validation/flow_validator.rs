use std::collections::BTreeMap;

use crate::flow::Flow;
use crate::validation::{error_codes, is_blank, ValidationError, Validator};

/// Validates flow-level structure: a non-blank name and unique step names
#[derive(Debug, Default)]
pub struct FlowValidator {}

impl FlowValidator {
    /// Create a new flow validator
    pub fn new() -> Self {
        FlowValidator {}
    }

    fn validate_name(&self, flow: &Flow) -> Option<ValidationError> {
        if is_blank(&flow.name) {
            return Some(ValidationError::at(
                error_codes::BLANK_VALUE,
                "Flow name must not be blank",
                "name",
            ));
        }
        None
    }

    /// Reports every node whose step repeats an earlier one.
    /// Blank steps are left to the node validator.
    fn validate_unique_steps(&self, flow: &Flow) -> Vec<ValidationError> {
        let mut first_seen: BTreeMap<&str, usize> = BTreeMap::new();
        let mut errors = Vec::new();

        for (index, node) in flow.nodes.iter().enumerate() {
            if is_blank(&node.step) {
                continue;
            }
            match first_seen.get(node.step.as_str()) {
                Some(first) => errors.push(ValidationError::at(
                    error_codes::DUPLICATE_STEP,
                    format!(
                        "Duplicate step '{}' - already defined at nodes[{}]",
                        node.step, first
                    ),
                    format!("nodes[{}].step", index),
                )),
                None => {
                    first_seen.insert(node.step.as_str(), index);
                }
            }
        }

        errors
    }
}

impl Validator for FlowValidator {
    fn validate(&self, flow: &Flow) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        errors.extend(self.validate_name(flow));
        errors.extend(self.validate_unique_steps(flow));
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::Node;
    use std::collections::BTreeMap;

    fn system_node(step: &str) -> Node {
        Node {
            node_type: "system".to_string(),
            step: step.to_string(),
            templates: BTreeMap::new(),
            blocks: Vec::new(),
        }
    }

    #[test]
    fn test_valid_flow_has_no_errors() {
        let flow = Flow {
            name: "MainFlow".to_string(),
            description: None,
            nodes: vec![system_node("|entry|"), system_node("|exit|")],
        };
        assert!(FlowValidator::new().validate(&flow).is_empty());
    }

    #[test]
    fn test_blank_name() {
        let flow = Flow {
            name: "  ".to_string(),
            description: None,
            nodes: vec![],
        };
        let errors = FlowValidator::new().validate(&flow);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, error_codes::BLANK_VALUE);
        assert_eq!(errors[0].path.as_deref(), Some("name"));
    }

    #[test]
    fn test_duplicate_steps_reported_at_each_repeat() {
        let flow = Flow {
            name: "MainFlow".to_string(),
            description: None,
            nodes: vec![system_node("a"), system_node("b"), system_node("a"), system_node("a")],
        };
        let errors = FlowValidator::new().validate(&flow);
        let paths: Vec<_> = errors.iter().filter_map(|e| e.path.as_deref()).collect();
        assert_eq!(paths, vec!["nodes[2].step", "nodes[3].step"]);
        assert!(errors.iter().all(|e| e.code == error_codes::DUPLICATE_STEP));
    }
}
