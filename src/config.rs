use anyhow::{Context as AnyhowContext, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use crate::fusion::schema::CREDENTIAL_NAME;
use crate::transport::http::DEFAULT_BASE_URL;

pub const ENV_BASE_URL: &str = "FRIENDGRID_BASE_URL";
pub const ENV_API_TOKEN: &str = "FRIENDGRID_API_TOKEN";

/// 节点配置 (Node Configuration)
///
/// ```yaml
/// base_url: "https://aitable.ai"
/// timeout_secs: 30
/// credentials:
///   friendGridApi:
///     api_token: "usk..."
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FriendGridConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub credentials: HashMap<String, CredentialConfig>,
}

impl Default for FriendGridConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            credentials: HashMap::new(),
        }
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialConfig {
    pub api_token: String,
}

impl fmt::Debug for CredentialConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialConfig").field("api_token", &"<redacted>").finish()
    }
}

impl FriendGridConfig {
    pub fn load(file_path: &Path) -> Result<Self> {
        let content = fs::read_to_string(file_path)
            .with_context(|| format!("Failed to read config file from {}", file_path.display()))?;

        let config: FriendGridConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to deserialize config from {}", file_path.display()))?;

        Ok(config)
    }

    /// Apply `FRIENDGRID_BASE_URL` / `FRIENDGRID_API_TOKEN` when set.
    pub fn with_env(self) -> Self {
        self.with_overrides(
            std::env::var(ENV_BASE_URL).ok(),
            std::env::var(ENV_API_TOKEN).ok(),
        )
    }

    /// A token override always lands on the node's default credential profile.
    pub fn with_overrides(mut self, base_url: Option<String>, api_token: Option<String>) -> Self {
        if let Some(url) = base_url.filter(|s| !s.trim().is_empty()) {
            self.base_url = url;
        }
        if let Some(token) = api_token.filter(|s| !s.trim().is_empty()) {
            self.credentials
                .insert(CREDENTIAL_NAME.to_string(), CredentialConfig { api_token: token });
        }
        self
    }
}
