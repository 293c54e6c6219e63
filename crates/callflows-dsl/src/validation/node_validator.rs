use crate::flow::{Flow, Node, NodeType};
use crate::validation::{error_codes, is_blank, ValidationError, Validator};

/// Validates each node on its own: step, node type and templates
#[derive(Debug, Default)]
pub struct NodeValidator {}

impl NodeValidator {
    /// Create a new node validator
    pub fn new() -> Self {
        NodeValidator {}
    }

    fn validate_node(&self, index: usize, node: &Node, errors: &mut Vec<ValidationError>) {
        let path = format!("nodes[{}]", index);

        if is_blank(&node.step) {
            errors.push(ValidationError::at(
                error_codes::BLANK_VALUE,
                "Step name must not be blank",
                format!("{}.step", path),
            ));
        }

        match node.kind() {
            None => errors.push(ValidationError::at(
                error_codes::INVALID_NODE_TYPE,
                format!(
                    "Unknown node type '{}' - expected '{}' or '{}'",
                    node.node_type,
                    NodeType::User.as_str(),
                    NodeType::System.as_str()
                ),
                format!("{}.nodeType", path),
            )),
            Some(NodeType::User) if node.templates.is_empty() => errors.push(ValidationError::at(
                error_codes::MISSING_TEMPLATE,
                "User nodes require at least one template",
                format!("{}.templates", path),
            )),
            Some(_) => {}
        }

        for (renderer, template) in &node.templates {
            if is_blank(&template.content) {
                errors.push(ValidationError::at(
                    error_codes::BLANK_VALUE,
                    "Template content must not be blank",
                    format!("{}.templates.{}", path, renderer),
                ));
            }
        }
    }
}

impl Validator for NodeValidator {
    fn validate(&self, flow: &Flow) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for (index, node) in flow.nodes.iter().enumerate() {
            self.validate_node(index, node, &mut errors);
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::Template;
    use std::collections::BTreeMap;

    fn flow_with(nodes: Vec<Node>) -> Flow {
        Flow {
            name: "MainFlow".to_string(),
            description: None,
            nodes,
        }
    }

    fn user_node(step: &str, templates: &[(&str, &str)]) -> Node {
        Node {
            node_type: "user".to_string(),
            step: step.to_string(),
            templates: templates
                .iter()
                .map(|(name, content)| {
                    (
                        name.to_string(),
                        Template {
                            content: content.to_string(),
                            dirty: false,
                        },
                    )
                })
                .collect::<BTreeMap<_, _>>(),
            blocks: Vec::new(),
        }
    }

    #[test]
    fn test_valid_user_node() {
        let flow = flow_with(vec![user_node("welcome", &[("vxml", "<vxml/>")])]);
        assert!(NodeValidator::new().validate(&flow).is_empty());
    }

    #[test]
    fn test_user_node_without_templates() {
        let flow = flow_with(vec![user_node("welcome", &[])]);
        let errors = NodeValidator::new().validate(&flow);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, error_codes::MISSING_TEMPLATE);
        assert_eq!(errors[0].path.as_deref(), Some("nodes[0].templates"));
    }

    #[test]
    fn test_collects_all_node_problems() {
        let mut bad_type = user_node("", &[("txt", " ")]);
        bad_type.node_type = "robot".to_string();

        let errors = NodeValidator::new().validate(&flow_with(vec![bad_type]));
        let codes: Vec<_> = errors.iter().map(|e| e.code).collect();

        assert_eq!(
            codes,
            vec![
                error_codes::BLANK_VALUE,
                error_codes::INVALID_NODE_TYPE,
                error_codes::BLANK_VALUE
            ]
        );
        assert_eq!(errors[2].path.as_deref(), Some("nodes[0].templates.txt"));
    }
}
