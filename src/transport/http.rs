use async_trait::async_trait;
use serde_json::Value;
use crate::config::FriendGridConfig;
use crate::error::{NodeError, Result};
use crate::fusion::RequestDescriptor;
use crate::transport::AuthenticatedRequester;
use reqwest::Client;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://aitable.ai";

/// reqwest-backed requester. Each credential profile maps to an API token
/// sent as a bearer token.
pub struct HttpRequester {
    client: Client,
    base_url: String,
    tokens: HashMap<String, String>,
}

impl fmt::Debug for HttpRequester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut profiles: Vec<&String> = self.tokens.keys().collect();
        profiles.sort();
        f.debug_struct("HttpRequester")
            .field("base_url", &self.base_url)
            .field("profiles", &profiles)
            .finish()
    }
}

impl HttpRequester {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            tokens: HashMap::new(),
        }
    }

    pub fn from_config(config: &FriendGridConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            tokens: config
                .credentials
                .iter()
                .map(|(profile, c)| (profile.clone(), c.api_token.clone()))
                .collect(),
        })
    }

    pub fn with_credential(mut self, profile: impl Into<String>, api_token: impl Into<String>) -> Self {
        self.tokens.insert(profile.into(), api_token.into());
        self
    }

    /// Turn a descriptor into a ready-to-send request without sending it.
    pub fn build(&self, credential: &str, request: &RequestDescriptor) -> Result<reqwest::Request> {
        let token = self
            .tokens
            .get(credential)
            .ok_or_else(|| NodeError::MissingCredential(credential.to_string()))?;

        let mut builder = self
            .client
            .request(request.method.into(), request.url(&self.base_url))
            .bearer_auth(token);

        for (k, v) in &request.headers {
            builder = builder.header(k, v);
        }

        // Headers already carry Content-Type, so send the serialized bytes
        // rather than going through `.json()`.
        if let Some(body) = &request.body {
            let bytes = serde_json::to_vec(body).map_err(|e| NodeError::Requester(e.to_string()))?;
            builder = builder.body(bytes);
        }

        Ok(builder.build()?)
    }
}

#[async_trait]
impl AuthenticatedRequester for HttpRequester {
    async fn request(&self, credential: &str, request: &RequestDescriptor) -> Result<Value> {
        let http_request = self.build(credential, request)?;
        debug!(url = %http_request.url(), method = %request.method, "Sending request");

        let response = self.client.execute(http_request).await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await?;
            return Err(NodeError::Http {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<Value>().await?)
    }
}
