pub mod commands;

use crate::config::{ClientConfig, DEFAULT_HOST, PAT_ENV_VAR};
use crate::manager::{DeleteTarget, ListTarget, OutputFormat};
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ado-envs")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Manage Azure DevOps Pipeline Environments and Kubernetes Resources", long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(
        long = "pat",
        env = PAT_ENV_VAR,
        hide_env_values = true,
        global = true,
        help = "Your Personal Access Token for the Azure DevOps API"
    )]
    pub personal_access_token: Option<String>,

    #[arg(short, long, help = "The organization to target within Azure DevOps")]
    pub organization: String,

    #[arg(short, long, help = "The project to target in the given organization")]
    pub project: String,

    #[arg(long, default_value = DEFAULT_HOST, hide = true, help = "Azure DevOps host URL")]
    pub host: String,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(
            self.organization.clone(),
            self.project.clone(),
            self.personal_access_token.clone().unwrap_or_default(),
        )
        .with_host(self.host.clone())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Create an environment or resource")]
    Create {
        environment: String,

        #[arg(long, num_args = 1.., help = "Resource name")]
        resources: Vec<String>,
    },
    #[command(about = "List environments or resources")]
    List {
        #[command(flatten)]
        selector: ListSelector,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json, help = "Output format")]
        output: OutputFormat,
    },
    #[command(about = "Update an environment or resource")]
    Update {
        environment: String,

        #[arg(long, num_args = 1.., help = "Resource name")]
        resources: Vec<String>,
    },
    #[command(about = "Delete an environment or resource")]
    Delete {
        #[command(flatten)]
        selector: DeleteSelector,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct ListSelector {
    #[arg(long, help = "List all visible environments")]
    pub environments: bool,

    #[arg(
        long,
        value_name = "ENV",
        help = "List all visible resources within the given environment"
    )]
    pub resources: Option<String>,
}

impl From<ListSelector> for ListTarget {
    fn from(selector: ListSelector) -> Self {
        Self {
            environments: selector.environments,
            resources: selector.resources,
        }
    }
}

#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct DeleteSelector {
    #[arg(
        long,
        num_args = 1..,
        help = "Delete all given resources across all environments"
    )]
    pub resources: Vec<String>,

    #[arg(long, help = "Delete the given environment")]
    pub environment: Option<String>,
}

impl From<DeleteSelector> for DeleteTarget {
    fn from(selector: DeleteSelector) -> Self {
        Self {
            environment: selector.environment,
            resources: selector.resources,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        let mut argv = vec!["ado-envs", "--pat", "token", "-o", "contoso", "-p", "platform"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv)
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_create_with_resources() {
        let cli = parse(&["create", "prod", "--resources", "payments", "orders"]).unwrap();
        match cli.command {
            Commands::Create {
                environment,
                resources,
            } => {
                assert_eq!(environment, "prod");
                assert_eq!(resources, vec!["payments", "orders"]);
            }
            _ => panic!("expected create"),
        }
    }

    #[test]
    fn test_create_without_resources() {
        let cli = parse(&["create", "prod"]).unwrap();
        assert!(matches!(cli.command, Commands::Create { resources, .. } if resources.is_empty()));
    }

    #[test]
    fn test_global_options_build_config() {
        let cli = parse(&["create", "prod"]).unwrap();
        let config = cli.client_config();
        assert_eq!(config.base_url(), "https://dev.azure.com/contoso/platform");
        assert_eq!(config.token, "token");
    }

    #[test]
    fn test_organization_is_required() {
        let err = Cli::try_parse_from(["ado-envs", "--pat", "t", "-p", "platform", "create", "x"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_list_selectors_are_exclusive() {
        let err = parse(&["list", "--environments", "--resources", "prod"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_list_requires_a_selector() {
        let err = parse(&["list"]).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_list_resources_with_yaml_output() {
        let cli = parse(&["list", "--resources", "prod", "--output", "yaml"]).unwrap();
        match cli.command {
            Commands::List { selector, output } => {
                let target = ListTarget::from(selector);
                assert!(!target.environments);
                assert_eq!(target.resources.as_deref(), Some("prod"));
                assert_eq!(output, OutputFormat::Yaml);
            }
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn test_delete_selectors_are_exclusive() {
        let err = parse(&["delete", "--environment", "prod", "--resources", "payments"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_delete_resources() {
        let cli = parse(&["delete", "--resources", "payments", "orders"]).unwrap();
        match cli.command {
            Commands::Delete { selector } => {
                let target = DeleteTarget::from(selector);
                assert!(target.environment.is_none());
                assert_eq!(target.resources, vec!["payments", "orders"]);
            }
            _ => panic!("expected delete"),
        }
    }
}
