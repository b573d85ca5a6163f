pub mod params;
pub mod request;
pub mod schema;
pub mod table;

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use crate::error::NodeError;

pub use params::ItemParameters;
pub use request::{HttpMethod, RequestDescriptor};

/// 资源 (Resource): top-level entity category of the Fusion API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Resource {
    Space,
    Node,
    View,
    Field,
    Record,
}

impl Resource {
    pub const ALL: [Resource; 5] = [
        Resource::Space,
        Resource::Node,
        Resource::View,
        Resource::Field,
        Resource::Record,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Resource::Space => "Space",
            Resource::Node => "Node",
            Resource::View => "View",
            Resource::Field => "Field",
            Resource::Record => "Record",
        }
    }

    /// Operations offered on this resource, in menu order.
    pub fn operations(&self) -> &'static [Operation] {
        match self {
            Resource::Space => &[Operation::ListSpaces],
            Resource::Node => &[Operation::SearchNodes],
            Resource::View => &[Operation::GetViews],
            Resource::Field => &[
                Operation::GetFields,
                Operation::CreateField,
                Operation::DeleteField,
            ],
            Resource::Record => &[
                Operation::GetRecords,
                Operation::CreateRecord,
                Operation::UpdateRecord,
                Operation::DeleteRecord,
            ],
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Resource {
    type Err = NodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Resource::ALL
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| NodeError::UnknownResource(s.to_string()))
    }
}

impl TryFrom<String> for Resource {
    type Error = NodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Resource> for String {
    fn from(value: Resource) -> Self {
        value.name().to_string()
    }
}

/// An action on a [`Resource`]. Display names match the node's menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Operation {
    ListSpaces,
    SearchNodes,
    GetViews,
    GetFields,
    CreateField,
    DeleteField,
    GetRecords,
    CreateRecord,
    UpdateRecord,
    DeleteRecord,
}

impl Operation {
    pub const ALL: [Operation; 10] = [
        Operation::ListSpaces,
        Operation::SearchNodes,
        Operation::GetViews,
        Operation::GetFields,
        Operation::CreateField,
        Operation::DeleteField,
        Operation::GetRecords,
        Operation::CreateRecord,
        Operation::UpdateRecord,
        Operation::DeleteRecord,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Operation::ListSpaces => "List space",
            Operation::SearchNodes => "Search node",
            Operation::GetViews => "Get Views",
            Operation::GetFields => "Get Fields",
            Operation::CreateField => "Create Field",
            Operation::DeleteField => "Delete Field",
            Operation::GetRecords => "Get Records",
            Operation::CreateRecord => "Create Record",
            Operation::UpdateRecord => "Update Record",
            Operation::DeleteRecord => "Delete Record",
        }
    }

    /// Older spellings still found in saved workflows.
    fn aliases(&self) -> &'static [&'static str] {
        match self {
            Operation::CreateField => &["Create Fields"],
            Operation::DeleteField => &["Delete Fields"],
            _ => &[],
        }
    }

    pub fn resource(&self) -> Resource {
        match self {
            Operation::ListSpaces => Resource::Space,
            Operation::SearchNodes => Resource::Node,
            Operation::GetViews => Resource::View,
            Operation::GetFields | Operation::CreateField | Operation::DeleteField => Resource::Field,
            Operation::GetRecords
            | Operation::CreateRecord
            | Operation::UpdateRecord
            | Operation::DeleteRecord => Resource::Record,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = NodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Operation::ALL
            .into_iter()
            .find(|op| {
                op.name().eq_ignore_ascii_case(s)
                    || op.aliases().iter().any(|a| a.eq_ignore_ascii_case(s))
            })
            .ok_or_else(|| NodeError::UnknownOperation(s.to_string()))
    }
}

impl TryFrom<String> for Operation {
    type Error = NodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Operation> for String {
    fn from(value: Operation) -> Self {
        value.name().to_string()
    }
}

/// The (resource, operation) pair chosen once for a whole batch. Only
/// [`Selection::new`] builds one, so the operation always belongs to the
/// resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Selection {
    resource: Resource,
    operation: Operation,
}

impl Selection {
    pub fn new(resource: Resource, operation: Operation) -> Result<Self, NodeError> {
        if operation.resource() != resource {
            return Err(NodeError::UnsupportedOperation {
                resource: resource.to_string(),
                operation: operation.to_string(),
            });
        }
        Ok(Self { resource, operation })
    }

    pub fn parse(resource: &str, operation: &str) -> Result<Self, NodeError> {
        Self::new(resource.parse()?, operation.parse()?)
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }
}
