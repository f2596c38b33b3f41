//! Registry snapshot: the tool list as of one discovery call

use std::collections::HashSet;
use std::sync::Arc;

use super::tool::ToolDescriptor;

/// Ordered, immutable list of tools returned by one discovery call.
///
/// Names are unique within a snapshot. A refresh builds a new snapshot; an
/// existing one is never modified.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrySnapshot {
    tools: Vec<Arc<ToolDescriptor>>,
}

/// Two descriptors in one discovery response share a name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("duplicate tool name: {0}")]
pub struct DuplicateToolName(pub String);

impl RegistrySnapshot {
    /// Build a snapshot, rejecting duplicate names
    pub fn new(tools: Vec<ToolDescriptor>) -> Result<Self, DuplicateToolName> {
        let mut seen = HashSet::with_capacity(tools.len());
        for tool in &tools {
            if !seen.insert(tool.name.as_str()) {
                return Err(DuplicateToolName(tool.name.clone()));
            }
        }

        Ok(Self {
            tools: tools.into_iter().map(Arc::new).collect(),
        })
    }

    /// Snapshot of a successful discovery that returned no tools
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn tools(&self) -> &[Arc<ToolDescriptor>] {
        &self.tools
    }

    pub fn count(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<ToolDescriptor>> {
        self.tools.iter()
    }

    /// Find a tool by its qualified name
    pub fn get(&self, name: &str) -> Option<&Arc<ToolDescriptor>> {
        self.tools.iter().find(|t| t.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name.as_str()).collect()
    }

    /// Distinct service names, in first-seen order
    pub fn services(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.tools
            .iter()
            .map(|t| t.service.as_str())
            .filter(|s| seen.insert(*s))
            .collect()
    }
}

impl<'a> IntoIterator for &'a RegistrySnapshot {
    type Item = &'a Arc<ToolDescriptor>;
    type IntoIter = std::slice::Iter<'a, Arc<ToolDescriptor>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tools.iter()
    }
}
