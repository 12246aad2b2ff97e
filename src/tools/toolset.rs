//! Name-unique collections of tools.

use std::ops::Deref;

use super::tool::{Tool, ToolDefinition};
use crate::error::{Result, ToolError};

/// Ordered collection of tools with unique names.
///
/// Dereferences to `[Tool]`, so a toolset can be passed anywhere a dispatch
/// set is expected.
#[derive(Debug, Clone, Default)]
pub struct Toolset {
    tools: Vec<Tool>,
}

impl Toolset {
    pub fn new(tools: impl IntoIterator<Item = Tool>) -> Result<Self> {
        let mut set = Self::default();
        for tool in tools {
            set.push(tool)?;
        }
        Ok(set)
    }

    /// Add a tool, rejecting a name that is already taken.
    pub fn push(&mut self, tool: Tool) -> Result<()> {
        if self.get(tool.name()).is_some() {
            return Err(ToolError::DuplicateTool(tool.name().to_string()));
        }
        self.tools.push(tool);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.iter().find(|t| t.name() == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(Tool::name).collect()
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(Tool::definition).collect()
    }
}

impl Deref for Toolset {
    type Target = [Tool];

    fn deref(&self) -> &[Tool] {
        &self.tools
    }
}

impl IntoIterator for Toolset {
    type Item = Tool;
    type IntoIter = std::vec::IntoIter<Tool>;

    fn into_iter(self) -> Self::IntoIter {
        self.tools.into_iter()
    }
}

impl<'a> IntoIterator for &'a Toolset {
    type Item = &'a Tool;
    type IntoIter = std::slice::Iter<'a, Tool>;

    fn into_iter(self) -> Self::IntoIter {
        self.tools.iter()
    }
}
