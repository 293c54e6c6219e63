mod node;

pub use node::{Node, NodeType, Template};

use serde::{Deserialize, Serialize};

/// A complete flow document.
/// This is the top-level structure stored in a call flow's `raw` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flow {
    /// Name of the flow
    pub name: String,

    /// Optional human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Nodes that make up the flow, in document order
    pub nodes: Vec<Node>,
}

impl Flow {
    /// Look up a node by its step name
    pub fn node(&self, step: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.step == step)
    }

    /// Step names in document order
    pub fn steps(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|node| node.step.as_str())
    }
}
