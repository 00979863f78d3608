//! Child stream contexts
//!
//! A context scopes one pagination chain of a child stream to a single parent
//! record. Contexts are created when the parent record is emitted and never
//! change afterwards.

use crate::types::JsonObject;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Scope of an i18n formats chain: one organization
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrganizationContext {
    /// Transifex organization id, e.g. `o:acme`
    pub organization_id: String,
}

impl OrganizationContext {
    /// Create a context for an organization
    pub fn new(organization_id: impl Into<String>) -> Self {
        Self {
            organization_id: organization_id.into(),
        }
    }
}

/// Context passed from a parent stream to its children
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StreamContext {
    /// Records scoped to one organization
    Organization(OrganizationContext),
}

impl StreamContext {
    /// Context for an organization id
    pub fn organization(organization_id: impl Into<String>) -> Self {
        Self::Organization(OrganizationContext::new(organization_id))
    }

    /// Organization id carried by this context, if any
    pub fn organization_id(&self) -> Option<&str> {
        match self {
            StreamContext::Organization(ctx) => Some(&ctx.organization_id),
        }
    }

    /// Key/value view, used to annotate records and in state bookmarks
    pub fn to_map(&self) -> JsonObject {
        let mut map = JsonObject::new();
        match self {
            StreamContext::Organization(ctx) => {
                map.insert(
                    "organization_id".to_string(),
                    Value::String(ctx.organization_id.clone()),
                );
            }
        }
        map
    }
}

impl std::fmt::Display for StreamContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreamContext::Organization(ctx) => write!(f, "organization_id={}", ctx.organization_id),
        }
    }
}
