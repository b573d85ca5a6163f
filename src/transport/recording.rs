//! `RecordingRequester`: an in-process stand-in for the host's HTTP helper.
//!
//! Records every call and answers from a programmed behaviour, so dispatch
//! can be tested without network access.

use async_trait::async_trait;
use serde_json::{Value, json};
use crate::error::{NodeError, Result};
use crate::fusion::RequestDescriptor;
use crate::transport::AuthenticatedRequester;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub credential: String,
    pub request: RequestDescriptor,
}

#[derive(Debug, Clone)]
pub enum Reply {
    /// Always answer with this value.
    Value(Value),
    /// Answer with `{"method", "path", "body"}` of the request received.
    Echo,
}

#[derive(Debug)]
pub struct RecordingRequester {
    reply: Reply,
    /// Zero-based call index that fails with an HTTP error.
    fail_at: Option<(usize, u16, String)>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingRequester {
    pub fn returning(value: Value) -> Self {
        Self {
            reply: Reply::Value(value),
            fail_at: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn echoing() -> Self {
        Self {
            reply: Reply::Echo,
            fail_at: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Make call number `index` fail with `status` and `body`.
    pub fn failing_at(mut self, index: usize, status: u16, body: impl Into<String>) -> Self {
        self.fail_at = Some((index, status, body.into()));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<RecordedCall>> {
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl AuthenticatedRequester for RecordingRequester {
    async fn request(&self, credential: &str, request: &RequestDescriptor) -> Result<Value> {
        let index = {
            let mut calls = self.lock();
            calls.push(RecordedCall {
                credential: credential.to_string(),
                request: request.clone(),
            });
            calls.len() - 1
        };

        if let Some((fail_index, status, body)) = &self.fail_at {
            if *fail_index == index {
                return Err(NodeError::Http {
                    status: *status,
                    body: body.clone(),
                });
            }
        }

        match &self.reply {
            Reply::Value(v) => Ok(v.clone()),
            Reply::Echo => Ok(json!({
                "method": request.method.as_str(),
                "path": request.path_and_query(),
                "body": request.body.clone().unwrap_or(Value::Null),
            })),
        }
    }
}
