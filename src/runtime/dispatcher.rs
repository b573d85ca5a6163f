use serde_json::Value;
use tracing::{debug, error, info};
use crate::error::Result;
use crate::fusion::{ItemParameters, RequestDescriptor, Selection};
use crate::fusion::table::build_request;
use crate::input::NodeInput;
use crate::runtime::context::Context;

/// Resource-operation dispatcher.
///
/// Items run strictly one after another: request i+1 is only built once the
/// response to request i is in. The first error aborts the batch and is
/// returned unchanged; requests already sent stay sent.
pub struct Dispatcher {
    ctx: Context,
}

impl Dispatcher {
    pub fn new(ctx: Context) -> Self {
        Self { ctx }
    }

    pub async fn execute(&self, selection: Selection, items: &[ItemParameters]) -> Result<Vec<Value>> {
        let (resource, operation) = (selection.resource(), selection.operation());
        info!(
            execution_id = %self.ctx.execution_id,
            resource = %resource,
            operation = %operation,
            items = items.len(),
            "Dispatching batch"
        );

        let mut responses = Vec::with_capacity(items.len());

        for (i, params) in items.iter().enumerate() {
            // 1. Build (all validation happens here, before anything is sent)
            let request = build_request(operation, params, i).inspect_err(|e| {
                error!(execution_id = %self.ctx.execution_id, item = i, error = %e, "Invalid item parameters");
            })?;
            debug!(item = i, method = %request.method, path = %request.path_and_query(), "Request built");

            // 2. Send
            let response = self
                .ctx
                .requester
                .request(&self.ctx.credential, &request)
                .await
                .inspect_err(|e| {
                    error!(execution_id = %self.ctx.execution_id, item = i, error = %e, "Request failed");
                })?;

            // 3. Collect
            responses.push(response);
        }

        info!(execution_id = %self.ctx.execution_id, responses = responses.len(), "Batch finished");
        Ok(responses)
    }

    /// Run a loaded input document. The document's credential profile wins
    /// over the context's.
    pub async fn run(&self, input: &NodeInput) -> Result<Vec<Value>> {
        let selection = input.selection()?;
        let dispatcher = Dispatcher::new(self.ctx.clone().with_credential(input.credential.as_str()));
        dispatcher.execute(selection, &input.batch()).await
    }
}

/// Build every request of a batch without sending any (dry run).
pub fn plan(selection: Selection, items: &[ItemParameters]) -> Result<Vec<RequestDescriptor>> {
    items
        .iter()
        .enumerate()
        .map(|(i, params)| build_request(selection.operation(), params, i))
        .collect()
}
