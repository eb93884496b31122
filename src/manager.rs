//! Environment actions built on top of [`DevOpsApi`]
//!
//! Each action fetches the current remote state, compares it with what was
//! requested and only issues the mutating calls that are still needed.
//! Progress is written line by line to the manager's output as it happens;
//! the returned `Result` carries the overall outcome.

use crate::devops::{DevOpsApi, Environment, KubernetesResource, KUBERNETES_ENDPOINT_TYPE};
use crate::{AdoError, Result};
use serde::Serialize;
use std::io::Write;
use tracing::{debug, info, warn};

/// Output format for listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// What `list` should print. Both selectors may be set; each runs in turn.
#[derive(Debug, Clone, Default)]
pub struct ListTarget {
    pub environments: bool,
    pub resources: Option<String>,
}

/// What `delete` should remove. Exactly one selector is expected.
#[derive(Debug, Clone, Default)]
pub struct DeleteTarget {
    pub environment: Option<String>,
    pub resources: Vec<String>,
}

pub struct EnvironmentManager<A, W> {
    api: A,
    out: W,
}

impl<A: DevOpsApi, W: Write> EnvironmentManager<A, W> {
    pub fn new(api: A, out: W) -> Self {
        Self { api, out }
    }

    pub fn into_inner(self) -> (A, W) {
        (self.api, self.out)
    }

    /// Ensures the environment exists, then binds each requested namespace to
    /// it. Stops at the first resource that fails to be created.
    ///
    /// A failed existence lookup is treated like an absent environment and the
    /// create is attempted.
    pub async fn create(&mut self, environment: &str, resources: &[String]) -> Result<()> {
        let existing_env = match self.api.get_environment(environment).await {
            Ok(env) => env,
            Err(e) => {
                warn!("Could not look up environment {}: {}", environment, e);
                None
            }
        };

        let env = match existing_env {
            Some(env) => {
                writeln!(self.out, "Environment {} already exists", environment)?;
                env
            }
            None => match self.api.create_environment(environment).await {
                Ok(env) => {
                    writeln!(self.out, "Created environment {}", environment)?;
                    env
                }
                Err(e) => {
                    return Err(AdoError::CreateEnvironmentFailed {
                        name: environment.to_string(),
                        source: e.boxed(),
                    })
                }
            },
        };

        if resources.is_empty() {
            return Ok(());
        }

        let endpoint = self
            .api
            .get_service_endpoint(environment, KUBERNETES_ENDPOINT_TYPE)
            .await?
            .ok_or_else(|| AdoError::ServiceEndpointNotFound {
                name: environment.to_string(),
                endpoint_type: KUBERNETES_ENDPOINT_TYPE.to_string(),
            })?;

        let existing: Vec<String> = self
            .api
            .list_environment_resources(&env.id)
            .await
            .map_err(|e| AdoError::ListResourcesFailed {
                environment: environment.to_string(),
                source: e.boxed(),
            })?
            .into_iter()
            .map(|r| r.name)
            .collect();

        for name in resources {
            if existing.iter().any(|r| r == name) {
                writeln!(self.out, "Resource '{}' already exists", name)?;
                continue;
            }

            let resource = KubernetesResource::for_namespace(environment, name, &endpoint);
            if let Err(e) = self.api.create_environment_resource(&env.id, &resource).await {
                return Err(AdoError::CreateResourceFailed {
                    name: name.clone(),
                    source: e.boxed(),
                });
            }
            writeln!(self.out, "Resource '{}' created", name)?;
        }

        Ok(())
    }

    pub async fn list(&mut self, target: &ListTarget, format: OutputFormat) -> Result<()> {
        if !target.environments && target.resources.is_none() {
            return Err(AdoError::InvalidSelection(
                "one of --environments or --resources is required".to_string(),
            ));
        }

        if target.environments {
            let environments: Vec<Environment> = self.api.list_environments().await?;
            debug!("Listing {} environments", environments.len());
            self.emit(&environments, format)?;
        }

        if let Some(name) = &target.resources {
            let env = self
                .api
                .get_environment(name)
                .await?
                .ok_or_else(|| AdoError::EnvironmentNotFound(name.clone()))?;
            let resources = self
                .api
                .list_environment_resources(&env.id)
                .await
                .map_err(|e| AdoError::ListResourcesFailed {
                    environment: name.clone(),
                    source: e.boxed(),
                })?;
            self.emit(&resources, format)?;
        }

        Ok(())
    }

    pub async fn update(&mut self, environment: &str, resources: &[String]) -> Result<()> {
        debug!(
            "Update requested for {} with {} resources",
            environment,
            resources.len()
        );
        Err(AdoError::Unsupported("update".to_string()))
    }

    pub async fn delete(&mut self, target: &DeleteTarget) -> Result<()> {
        match (&target.environment, target.resources.is_empty()) {
            (Some(_), false) => Err(AdoError::InvalidSelection(
                "--environment and --resources cannot be combined".to_string(),
            )),
            (None, true) => Err(AdoError::InvalidSelection(
                "one of --environment or --resources is required".to_string(),
            )),
            (Some(name), true) => self.delete_environment(name).await,
            (None, false) => self.delete_resources(&target.resources).await,
        }
    }

    async fn delete_environment(&mut self, name: &str) -> Result<()> {
        let env = self
            .api
            .list_environments()
            .await?
            .into_iter()
            .find(|env| env.name == name)
            .ok_or_else(|| AdoError::EnvironmentNotFound(name.to_string()))?;

        self.api
            .delete_environment(&env.id)
            .await
            .map_err(|e| AdoError::DeleteEnvironmentFailed {
                name: name.to_string(),
                source: e.boxed(),
            })?;

        writeln!(self.out, "Deleted environment {}", name)?;
        Ok(())
    }

    /// Removes every resource with a requested name from every environment.
    /// All matches are attempted; failures are reported together at the end.
    async fn delete_resources(&mut self, names: &[String]) -> Result<()> {
        let environments = self.api.list_environments().await?;
        let mut failed = Vec::new();
        let mut matched = 0usize;

        for env in &environments {
            let resources = match self.api.list_environment_resources(&env.id).await {
                Ok(resources) => resources,
                Err(e) => {
                    warn!("Skipping environment {}: {}", env.name, e);
                    failed.push(format!("{} (resource listing)", env.name));
                    continue;
                }
            };

            for resource in resources.iter().filter(|r| names.contains(&r.name)) {
                matched += 1;
                writeln!(
                    self.out,
                    "Deleting resource {} within {}",
                    resource.name, env.name
                )?;
                match self.api.delete_environment_resource(&env.id, resource).await {
                    Ok(()) => writeln!(
                        self.out,
                        "Deleted resource {} within {}",
                        resource.name, env.name
                    )?,
                    Err(e) => {
                        warn!("Failed to delete {} within {}: {}", resource.name, env.name, e);
                        failed.push(format!("{}/{}", env.name, resource.name));
                    }
                }
            }
        }

        if !failed.is_empty() {
            return Err(AdoError::DeleteResourcesFailed { failed });
        }
        if matched == 0 {
            writeln!(self.out, "No matching resources found")?;
        }
        info!("Deleted {} resources", matched);
        Ok(())
    }

    fn emit<T: Serialize>(&mut self, value: &T, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.out, value)?;
                writeln!(self.out)?;
            }
            OutputFormat::Yaml => serde_yaml::to_writer(&mut self.out, value)?,
        }
        Ok(())
    }
}
