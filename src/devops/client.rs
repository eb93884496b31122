use crate::config::ClientConfig;
use crate::devops::api::DevOpsApi;
use crate::devops::types::{
    Environment, EnvironmentResourceReference, EnvironmentWithResources, KubernetesResource,
    NewEnvironment, ResourceId, ServiceEndpoint, ValueList,
};
use crate::{AdoError, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error};

const ENVIRONMENTS_API_VERSION: &str = "7.0";
const SERVICE_ENDPOINTS_API_VERSION: &str = "6.0-preview.4";
const ENVIRONMENT_RESOURCES_API_VERSION: &str = "6.0-preview.1";

/// Whether a non-2xx response is turned into an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCheck {
    Enforce,
    Ignore,
}

/// Authenticated client for one organization/project pair.
///
/// Credentials and base URL are fixed at construction; the value is
/// read-only afterwards and reused for every call.
pub struct DevOpsClient {
    http: Client,
    base_url: String,
    token: String,
}

impl DevOpsClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let http = Client::builder()
            .user_agent(concat!("ado-envs/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let base_url = config.base_url();
        debug!("Using Azure DevOps base URL {}", base_url);

        Ok(Self {
            http,
            base_url,
            token: config.token.clone(),
        })
    }

    /// Sends one authenticated request to `{base}/_apis/{uri}`.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        query: &[(&str, &str)],
        body: Option<&serde_json::Value>,
        check: StatusCheck,
    ) -> Result<Response> {
        let url = format!("{}/_apis/{}", self.base_url, uri);
        debug!("{} {}", method, url);

        let mut builder = self
            .http
            .request(method.clone(), &url)
            .basic_auth("", Some(&self.token))
            .query(query);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;

        if check == StatusCheck::Enforce && !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            return Err(AdoError::StatusError {
                method: method.to_string(),
                url,
                status,
                body,
            });
        }

        Ok(response)
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        uri: &str,
        query: &[(&str, &str)],
        body: Option<&serde_json::Value>,
    ) -> Result<T> {
        let response = self
            .request(method, uri, query, body, StatusCheck::Enforce)
            .await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn call_unit(
        &self,
        method: Method,
        uri: &str,
        query: &[(&str, &str)],
        body: Option<&serde_json::Value>,
    ) -> Result<()> {
        self.request(method, uri, query, body, StatusCheck::Enforce)
            .await?;
        Ok(())
    }
}

fn to_body<T: Serialize>(value: &T) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(value)?)
}

fn logged<T>(operation: &str, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        error!("{} failed: {}", operation, e);
    }
    result
}

#[async_trait]
impl DevOpsApi for DevOpsClient {
    async fn list_environments(&self) -> Result<Vec<Environment>> {
        debug!("Getting existing environments");
        let result = self
            .call::<ValueList<Environment>>(
                Method::GET,
                "distributedtask/environments",
                &[("api-version", ENVIRONMENTS_API_VERSION)],
                None,
            )
            .await
            .map(|list| list.value);
        logged("list environments", result)
    }

    async fn create_environment(&self, name: &str) -> Result<Environment> {
        debug!("Creating environment {}", name);
        let result = async {
            let body = to_body(&NewEnvironment::named(name))?;
            self.call::<Environment>(
                Method::POST,
                "distributedtask/environments",
                &[("api-version", ENVIRONMENTS_API_VERSION)],
                Some(&body),
            )
            .await
        }
        .await;
        logged("create environment", result)
    }

    async fn delete_environment(&self, environment_id: &ResourceId) -> Result<()> {
        debug!("Deleting environment {}", environment_id);
        let uri = format!("distributedtask/environments/{}", environment_id);
        let result = self
            .call_unit(
                Method::DELETE,
                &uri,
                &[("api-version", ENVIRONMENTS_API_VERSION)],
                None,
            )
            .await;
        logged("delete environment", result)
    }

    async fn list_service_endpoints(&self) -> Result<Vec<ServiceEndpoint>> {
        debug!("Getting service endpoints");
        let result = self
            .call::<ValueList<ServiceEndpoint>>(
                Method::GET,
                "serviceendpoint/endpoints",
                &[("api-version", SERVICE_ENDPOINTS_API_VERSION)],
                None,
            )
            .await
            .map(|list| list.value);
        logged("list service endpoints", result)
    }

    async fn delete_service_endpoint(
        &self,
        endpoint_id: &ResourceId,
        project_id: &str,
    ) -> Result<()> {
        debug!("Deleting service endpoint {}", endpoint_id);
        let uri = format!("serviceendpoint/endpoints/{}", endpoint_id);
        let result = self
            .call_unit(
                Method::DELETE,
                &uri,
                &[
                    ("projectIds", project_id),
                    ("api-version", SERVICE_ENDPOINTS_API_VERSION),
                ],
                None,
            )
            .await;
        logged("delete service endpoint", result)
    }

    async fn list_environment_resources(
        &self,
        environment_id: &ResourceId,
    ) -> Result<Vec<EnvironmentResourceReference>> {
        debug!("Getting resources of environment {}", environment_id);
        let uri = format!("distributedtask/environments/{}", environment_id);
        let result = self
            .call::<EnvironmentWithResources>(
                Method::GET,
                &uri,
                &[
                    ("expands", "resourceReferences"),
                    ("api-version", ENVIRONMENT_RESOURCES_API_VERSION),
                ],
                None,
            )
            .await
            .map(|env| env.resources);
        logged("list environment resources", result)
    }

    async fn create_environment_resource(
        &self,
        environment_id: &ResourceId,
        resource: &KubernetesResource,
    ) -> Result<()> {
        debug!("Creating resource {}", resource.name);
        let uri = format!(
            "distributedtask/environments/{}/providers/kubernetes",
            environment_id
        );
        let result = async {
            let body = to_body(resource)?;
            self.call_unit(
                Method::POST,
                &uri,
                &[("api-version", ENVIRONMENT_RESOURCES_API_VERSION)],
                Some(&body),
            )
            .await
        }
        .await;
        logged("create environment resource", result)
    }

    async fn delete_environment_resource(
        &self,
        environment_id: &ResourceId,
        resource: &EnvironmentResourceReference,
    ) -> Result<()> {
        debug!("Deleting resource {}", resource.name);
        let uri = format!(
            "distributedtask/environments/{}/providers/kubernetes",
            environment_id
        );
        let result = async {
            let body = to_body(resource)?;
            self.call_unit(
                Method::DELETE,
                &uri,
                &[("api-version", ENVIRONMENT_RESOURCES_API_VERSION)],
                Some(&body),
            )
            .await
        }
        .await;
        logged("delete environment resource", result)
    }
}
