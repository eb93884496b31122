use serde::{Deserialize, Serialize};
use std::fmt;

/// Service endpoint type backing every environment resource this tool creates.
pub const KUBERNETES_ENDPOINT_TYPE: &str = "kubernetes";

/// Identifier assigned by the remote system.
///
/// Environments come back with numeric ids while service endpoints use GUIDs,
/// so both shapes are accepted and serialized back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Number(n) => write!(f, "{}", n),
            ResourceId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ResourceId {
    fn from(value: i64) -> Self {
        ResourceId::Number(value)
    }
}

impl From<&str> for ResourceId {
    fn from(value: &str) -> Self {
        ResourceId::Text(value.to_string())
    }
}

/// Pipeline environment, projected to the fields this tool reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    pub id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewEnvironment {
    pub description: String,
    pub name: String,
}

impl NewEnvironment {
    pub fn named(name: &str) -> Self {
        Self {
            description: String::new(),
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceEndpoint {
    pub id: ResourceId,
    pub name: String,
    #[serde(rename = "type")]
    pub endpoint_type: String,
}

/// Body of a Kubernetes resource creation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KubernetesResource {
    pub cluster_name: String,
    pub name: String,
    pub namespace: String,
    pub service_endpoint_id: ResourceId,
}

impl KubernetesResource {
    /// Binds `namespace` on the cluster named after `environment`.
    pub fn for_namespace(environment: &str, namespace: &str, endpoint: &ServiceEndpoint) -> Self {
        Self {
            cluster_name: environment.to_string(),
            name: namespace.to_string(),
            namespace: namespace.to_string(),
            service_endpoint_id: endpoint.id.clone(),
        }
    }
}

/// Resource reference as listed under an environment.
///
/// Fields other than `id` and `name` are kept as-is so listings can be echoed
/// back verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentResourceReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    pub name: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ValueList<T> {
    pub value: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EnvironmentWithResources {
    pub resources: Vec<EnvironmentResourceReference>,
}
