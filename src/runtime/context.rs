use std::sync::Arc;
use uuid::Uuid;
use crate::fusion::schema::CREDENTIAL_NAME;
use crate::transport::AuthenticatedRequester;

/// 运行时上下文 (Runtime Context)
/// What one execution of the node gets from its host.
#[derive(Clone)] // Context should be cheap to clone (just Arcs)
pub struct Context {
    pub execution_id: Uuid,
    /// Credential profile handed to the requester on every call.
    pub credential: String,
    pub requester: Arc<dyn AuthenticatedRequester>,
}

impl Context {
    pub fn new(requester: Arc<dyn AuthenticatedRequester>) -> Self {
        Self {
            execution_id: Uuid::new_v4(),
            credential: CREDENTIAL_NAME.to_string(),
            requester,
        }
    }

    pub fn with_credential(mut self, profile: impl Into<String>) -> Self {
        self.credential = profile.into();
        self
    }
}
