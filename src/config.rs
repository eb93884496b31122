//! Connection settings for the Azure DevOps REST API.

use crate::{AdoError, Result};
use std::fmt;

pub const DEFAULT_HOST: &str = "https://dev.azure.com";

pub const PAT_ENV_VAR: &str = "PAT_TOKEN";

#[derive(Clone)]
pub struct ClientConfig {
    pub host: String,
    pub organization: String,
    pub project: String,
    pub token: String,
}

impl ClientConfig {
    pub fn new(
        organization: impl Into<String>,
        project: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            organization: organization.into(),
            project: project.into(),
            token: token.into(),
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Checks that every field needed to reach the API is present.
    pub fn validate(&self) -> Result<()> {
        if self.token.trim().is_empty() {
            return Err(AdoError::ConfigError(format!(
                "Please set your Personal Access Token via --pat OR env-var: {}",
                PAT_ENV_VAR
            )));
        }
        if self.organization.trim().is_empty() {
            return Err(AdoError::ConfigError(
                "organization must not be empty".to_string(),
            ));
        }
        if self.project.trim().is_empty() {
            return Err(AdoError::ConfigError("project must not be empty".to_string()));
        }
        if self.host.trim().is_empty() {
            return Err(AdoError::ConfigError("host must not be empty".to_string()));
        }
        Ok(())
    }

    /// `{host}/{organization}/{project}`, without a trailing slash.
    pub fn base_url(&self) -> String {
        format!(
            "{}/{}/{}",
            self.host.trim_end_matches('/'),
            self.organization,
            self.project
        )
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("organization", &self.organization)
            .field("project", &self.project)
            .field("token", &"<redacted>")
            .finish()
    }
}
