//! Tool descriptor types

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Deserializer, Serialize};

/// A remote service method exposed by the gateway as a tool.
///
/// `name` is the primary key. By convention it is `<service>.<endpoint>`,
/// e.g. `users.Users.Get`, but it is stored as received and never rebuilt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Qualified tool name (e.g., "users.Users.Get")
    pub name: String,
    /// Service name (e.g., "users")
    pub service: String,
    /// Endpoint name (e.g., "Users.Get")
    pub endpoint: String,
    /// Human-readable description, may be empty
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Example input, as opaque JSON text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// Authorization scopes required to call the tool
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scopes: Option<BTreeSet<String>>,
    /// Additional metadata from the service
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: HashMap<String, String>,
}

impl ToolDescriptor {
    /// Create a descriptor named `<service>.<endpoint>`
    pub fn new(service: impl Into<String>, endpoint: impl Into<String>) -> Self {
        let service = service.into();
        let endpoint = endpoint.into();
        Self {
            name: format!("{}.{}", service, endpoint),
            service,
            endpoint,
            description: String::new(),
            example: None,
            scopes: None,
            metadata: HashMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self
    }

    pub fn with_scopes(mut self, scopes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.scopes = Some(scopes.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
