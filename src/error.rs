use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdoError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("{method} {url} returned {status}: {body}")]
    StatusError {
        method: String,
        url: String,
        status: u16,
        body: String,
    },

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to find the given environment: {0}")]
    EnvironmentNotFound(String),

    #[error(
        "Failed to locate a service-connection with name: {name} (type {endpoint_type}). Please create it via the UI"
    )]
    ServiceEndpointNotFound { name: String, endpoint_type: String },

    #[error("Failed to create environment {name}")]
    CreateEnvironmentFailed {
        name: String,
        #[source]
        source: Box<AdoError>,
    },

    #[error("Failed to delete environment {name}")]
    DeleteEnvironmentFailed {
        name: String,
        #[source]
        source: Box<AdoError>,
    },

    #[error("Failed to create resource '{name}'")]
    CreateResourceFailed {
        name: String,
        #[source]
        source: Box<AdoError>,
    },

    #[error("Failed to fetch resources of environment {environment}")]
    ListResourcesFailed {
        environment: String,
        #[source]
        source: Box<AdoError>,
    },

    #[error("Failed to delete resources: {}", failed.join(", "))]
    DeleteResourcesFailed { failed: Vec<String> },

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Unsupported operation: {0} is not implemented")]
    Unsupported(String),
}

impl AdoError {
    pub(crate) fn boxed(self) -> Box<AdoError> {
        Box::new(self)
    }
}

pub type Result<T> = std::result::Result<T, AdoError>;
