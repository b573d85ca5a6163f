//! FriendGrid: a workflow node for the Fusion API of a tabular-data service
//! (spaces, datasheets, views, fields, records).
//!
//! A batch picks one [`fusion::Resource`] and [`fusion::Operation`]; each
//! input item becomes one request built from the dispatch table in
//! [`fusion::table`] and sent through an injected
//! [`transport::AuthenticatedRequester`].

pub mod config;
pub mod error;
pub mod fusion;
pub mod input;
pub mod runtime;
pub mod transport;

pub use error::NodeError;
pub use fusion::{ItemParameters, Operation, RequestDescriptor, Resource, Selection};
pub use runtime::context::Context;
pub use runtime::dispatcher::Dispatcher;
