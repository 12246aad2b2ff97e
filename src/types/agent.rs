//! Identity of the agent that issued a tool call.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Agent identity carried through dispatch.
///
/// The dispatcher only clones this into the produced [`ToolMessage`]; it never
/// inspects or mutates it.
///
/// [`ToolMessage`]: super::ToolMessage
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Agent {
    pub name: String,
    pub id: Uuid,
}

impl Agent {
    /// Create an agent with a fresh random id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: Uuid::new_v4(),
        }
    }

    /// Create an agent with a known id.
    pub fn with_id(name: impl Into<String>, id: Uuid) -> Self {
        Self {
            name: name.into(),
            id,
        }
    }
}
