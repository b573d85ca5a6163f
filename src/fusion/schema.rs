use serde::Serialize;
use crate::fusion::{Operation, Resource};
use crate::fusion::table::{BodyShape, route};

pub const NODE_NAME: &str = "friendGrid";
pub const NODE_DISPLAY_NAME: &str = "FriendGrid";
pub const CREDENTIAL_NAME: &str = "friendGridApi";

/// Static description of the node, as shown in a workflow editor.
#[derive(Debug, Clone, Serialize)]
pub struct NodeDescription {
    pub name: &'static str,
    pub display_name: &'static str,
    pub credential: &'static str,
    pub resources: Vec<ResourceDescription>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResourceDescription {
    pub name: Resource,
    pub operations: Vec<OperationDescription>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OperationDescription {
    pub name: Operation,
    pub method: &'static str,
    pub path: &'static str,
    pub required: Vec<&'static str>,
    pub body: BodyShape,
}

/// Built from the dispatch table, so the menu never lists an operation the
/// dispatcher cannot build.
pub fn describe() -> NodeDescription {
    let resources = Resource::ALL
        .iter()
        .map(|resource| ResourceDescription {
            name: *resource,
            operations: resource
                .operations()
                .iter()
                .map(|op| {
                    let r = route(*op);
                    OperationDescription {
                        name: *op,
                        method: r.method.as_str(),
                        path: r.path,
                        required: r.required.iter().map(|p| p.name()).collect(),
                        body: r.body,
                    }
                })
                .collect(),
        })
        .collect();

    NodeDescription {
        name: NODE_NAME,
        display_name: NODE_DISPLAY_NAME,
        credential: CREDENTIAL_NAME,
        resources,
    }
}
