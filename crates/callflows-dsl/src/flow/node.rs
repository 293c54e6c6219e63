use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Kind of a node in a flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    /// Interacts with the caller (prompts, menus, input collection)
    User,
    /// Runs on the server between user nodes
    System,
}

impl NodeType {
    /// Parse the wire name (`"user"` / `"system"`)
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "user" => Some(NodeType::User),
            "system" => Some(NodeType::System),
            _ => None,
        }
    }

    /// Wire name of the node type
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::User => "user",
            NodeType::System => "system",
        }
    }
}

/// A single node of a flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Node type as written in the document; see [`Node::kind`]
    #[serde(rename = "nodeType")]
    pub node_type: String,

    /// Step name, unique within the flow
    pub step: String,

    /// Templates keyed by renderer name (e.g. "vxml", "txt")
    #[serde(default)]
    pub templates: BTreeMap<String, Template>,

    /// Node blocks; opaque to structural validation
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blocks: Vec<serde_json::Value>,
}

impl Node {
    /// Parsed node type, `None` when the document carries an unknown value
    pub fn kind(&self) -> Option<NodeType> {
        NodeType::parse(&self.node_type)
    }
}

/// Template body attached to a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// Template content
    pub content: String,

    /// Whether the editor holds unsaved changes for this template
    #[serde(default)]
    pub dirty: bool,
}
