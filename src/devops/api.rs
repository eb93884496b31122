use crate::devops::types::{
    Environment, EnvironmentResourceReference, KubernetesResource, ResourceId, ServiceEndpoint,
};
use crate::Result;
use async_trait::async_trait;
use tracing::debug;

/// One call per remote endpoint the environment manager relies on.
///
/// Implementations log a failure once before returning it, so callers only
/// decide what a failed step means for the action they are running.
#[async_trait]
pub trait DevOpsApi: Send + Sync {
    async fn list_environments(&self) -> Result<Vec<Environment>>;

    /// First environment whose name matches, `None` if there is none.
    async fn get_environment(&self, name: &str) -> Result<Option<Environment>> {
        debug!("Getting environment {}", name);
        let environments = self.list_environments().await?;
        Ok(environments.into_iter().find(|env| env.name == name))
    }

    async fn create_environment(&self, name: &str) -> Result<Environment>;

    async fn delete_environment(&self, environment_id: &ResourceId) -> Result<()>;

    async fn list_service_endpoints(&self) -> Result<Vec<ServiceEndpoint>>;

    async fn get_service_endpoint(
        &self,
        name: &str,
        endpoint_type: &str,
    ) -> Result<Option<ServiceEndpoint>> {
        debug!(
            "Getting service endpoint {} with type {}",
            name, endpoint_type
        );
        let endpoints = self.list_service_endpoints().await?;
        Ok(endpoints
            .into_iter()
            .find(|ep| ep.endpoint_type == endpoint_type && ep.name == name))
    }

    async fn delete_service_endpoint(&self, endpoint_id: &ResourceId, project_id: &str)
        -> Result<()>;

    async fn list_environment_resources(
        &self,
        environment_id: &ResourceId,
    ) -> Result<Vec<EnvironmentResourceReference>>;

    async fn create_environment_resource(
        &self,
        environment_id: &ResourceId,
        resource: &KubernetesResource,
    ) -> Result<()>;

    async fn delete_environment_resource(
        &self,
        environment_id: &ResourceId,
        resource: &EnvironmentResourceReference,
    ) -> Result<()>;
}
