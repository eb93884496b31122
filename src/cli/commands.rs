use crate::cli::Commands;
use crate::devops::DevOpsApi;
use crate::manager::{DeleteTarget, EnvironmentManager, ListTarget};
use crate::Result;
use std::io::Write;
use tracing::info;

pub async fn handle_command<A, W>(
    command: Commands,
    manager: &mut EnvironmentManager<A, W>,
) -> Result<()>
where
    A: DevOpsApi,
    W: Write,
{
    match command {
        Commands::Create {
            environment,
            resources,
        } => {
            info!("Create requested for environment {}", environment);
            manager.create(&environment, &resources).await
        }
        Commands::List { selector, output } => {
            info!("List requested");
            manager.list(&ListTarget::from(selector), output).await
        }
        Commands::Update {
            environment,
            resources,
        } => {
            info!("Update requested for environment {}", environment);
            manager.update(&environment, &resources).await
        }
        Commands::Delete { selector } => {
            info!("Delete requested");
            manager.delete(&DeleteTarget::from(selector)).await
        }
    }
}
