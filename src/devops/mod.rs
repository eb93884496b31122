pub mod api;
pub mod client;
pub mod types;

pub use api::DevOpsApi;
pub use client::{DevOpsClient, StatusCheck};
pub use types::{
    Environment, EnvironmentResourceReference, KubernetesResource, ResourceId, ServiceEndpoint,
    KUBERNETES_ENDPOINT_TYPE,
};
