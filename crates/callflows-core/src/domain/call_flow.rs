use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::CallFlowError;

/// Unique identifier for a call flow, assigned by the repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallFlowId(pub i64);

impl fmt::Display for CallFlowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of a call flow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CallFlowStatus {
    /// Being edited, the default for new flows
    #[default]
    Draft,
    /// Live
    Published,
    /// No longer in use
    Retired,
}

impl CallFlowStatus {
    /// Upper-case wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            CallFlowStatus::Draft => "DRAFT",
            CallFlowStatus::Published => "PUBLISHED",
            CallFlowStatus::Retired => "RETIRED",
        }
    }
}

impl fmt::Display for CallFlowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CallFlowStatus {
    type Err = CallFlowError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "DRAFT" => Ok(CallFlowStatus::Draft),
            "PUBLISHED" => Ok(CallFlowStatus::Published),
            "RETIRED" => Ok(CallFlowStatus::Retired),
            _ => Err(CallFlowError::InvalidArgument(format!(
                "Unknown call flow status: {}",
                value
            ))),
        }
    }
}

/// A named IVR script definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallFlow {
    /// Identity; `None` until the flow is first saved
    #[serde(default)]
    pub id: Option<CallFlowId>,

    /// Unique, alphanumeric name
    pub name: String,

    /// Free text
    #[serde(default)]
    pub description: Option<String>,

    /// Serialized flow document
    pub raw: String,

    /// Lifecycle status, defaulted to draft on create
    #[serde(default)]
    pub status: Option<CallFlowStatus>,

    /// Soft-delete flag
    #[serde(default)]
    pub retired: bool,
}

impl CallFlow {
    /// Create a new, unsaved call flow
    pub fn new(name: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
            raw: raw.into(),
            status: None,
            retired: false,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the status
    pub fn with_status(mut self, status: CallFlowStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Set the id
    pub fn with_id(mut self, id: CallFlowId) -> Self {
        self.id = Some(id);
        self
    }

    /// Whether the flow has been saved at least once
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

/// Create/update request as received from an API caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallFlowRequest {
    /// Requested name
    #[serde(default)]
    pub name: Option<String>,
    /// Description
    #[serde(default)]
    pub description: Option<String>,
    /// Raw flow document
    #[serde(default)]
    pub raw: Option<String>,
    /// Status, case-insensitive
    #[serde(default)]
    pub status: Option<String>,
}

impl TryFrom<CallFlowRequest> for CallFlow {
    type Error = CallFlowError;

    fn try_from(request: CallFlowRequest) -> Result<Self, Self::Error> {
        let status = request
            .status
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(str::parse::<CallFlowStatus>)
            .transpose()?;

        Ok(CallFlow {
            id: None,
            name: request.name.unwrap_or_default(),
            description: request.description,
            raw: request.raw.unwrap_or_default(),
            status,
            retired: false,
        })
    }
}
