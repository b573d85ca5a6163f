use async_trait::async_trait;
use serde_json::Value;
use crate::error::Result;
use crate::fusion::RequestDescriptor;
use std::fmt::Debug;

pub mod http;
pub mod recording;

pub use http::HttpRequester;
pub use recording::RecordingRequester;

/// 认证请求接口：authenticated HTTP as the host provides it.
///
/// Implementations resolve `credential` (a named credential profile), send
/// the request and hand back the parsed JSON response. Errors are returned
/// as-is; callers never retry.
#[async_trait]
pub trait AuthenticatedRequester: Send + Sync + Debug {
    async fn request(&self, credential: &str, request: &RequestDescriptor) -> Result<Value>;
}
