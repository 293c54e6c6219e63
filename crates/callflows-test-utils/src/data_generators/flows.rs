//! Generators for call flow documents.

use callflows_core::CallFlow;

/// A valid three-node flow document: entry, a user greeting, exit.
pub fn main_flow_raw() -> String {
    flow_raw("MainFlow")
}

/// A valid flow document whose top-level name is `name`.
pub fn flow_raw(name: &str) -> String {
    serde_json::json!({
        "name": name,
        "nodes": [
            {
                "nodeType": "system",
                "step": "|entry|",
                "blocks": [{ "name": "entry", "formBlockItems": [] }]
            },
            {
                "nodeType": "user",
                "step": "welcome",
                "templates": {
                    "vxml": { "content": "<vxml version=\"2.1\"><form><block>Welcome</block></form></vxml>", "dirty": false },
                    "txt": { "content": "Welcome", "dirty": false }
                }
            },
            { "nodeType": "system", "step": "|exit|" }
        ]
    })
    .to_string()
}

/// A document that parses but breaks several structural rules.
pub fn bad_flow_raw() -> String {
    serde_json::json!({
        "name": "BadFlow",
        "nodes": [
            { "nodeType": "user", "step": "welcome" },
            { "nodeType": "user", "step": "welcome", "templates": { "txt": { "content": "" } } }
        ]
    })
    .to_string()
}

/// An unsaved `MainFlow` call flow with a valid document.
pub fn main_flow() -> CallFlow {
    CallFlow::new("MainFlow", main_flow_raw()).with_description("Main entry flow")
}

/// An unsaved call flow named `name` with a valid document.
pub fn named_flow(name: &str) -> CallFlow {
    CallFlow::new(name, flow_raw(name))
}
