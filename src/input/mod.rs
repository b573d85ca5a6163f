pub mod loader;

use serde::{Serialize, Deserialize};
use crate::error::NodeError;
use crate::fusion::{ItemParameters, Operation, Resource, Selection};
use crate::fusion::schema::CREDENTIAL_NAME;

/// 节点输入文档 (Node Input)
///
/// ```yaml
/// resource: Record
/// operation: Create Record
/// items:
///   - DatasheetID: dst123
///     records_body: '{"records": [{"fields": {"a": 1}}]}'
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeInput {
    pub resource: Resource,
    pub operation: Operation,
    #[serde(default = "default_credential")]
    pub credential: String,
    #[serde(default)]
    pub items: Vec<ItemParameters>,
}

fn default_credential() -> String {
    CREDENTIAL_NAME.to_string()
}

impl NodeInput {
    pub fn new(resource: Resource, operation: Operation) -> Self {
        Self {
            resource,
            operation,
            credential: default_credential(),
            items: Vec::new(),
        }
    }

    pub fn credential(mut self, profile: &str) -> Self {
        self.credential = profile.to_string();
        self
    }

    pub fn item(mut self, params: ItemParameters) -> Self {
        self.items.push(params);
        self
    }

    pub fn selection(&self) -> Result<Selection, NodeError> {
        Selection::new(self.resource, self.operation)
    }

    /// Items to run. A node always runs at least once, so an empty list
    /// becomes a single item without parameters.
    pub fn batch(&self) -> Vec<ItemParameters> {
        if self.items.is_empty() {
            vec![ItemParameters::default()]
        } else {
            self.items.clone()
        }
    }
}
