use anyhow::Context;
use ado_envs::cli::{commands, Cli};
use ado_envs::devops::DevOpsClient;
use ado_envs::manager::EnvironmentManager;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::process;
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    debug!("Starting ado-envs v{}", ado_envs::VERSION);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.client_config();
    if let Err(e) = config.validate() {
        Cli::command()
            .error(ErrorKind::MissingRequiredArgument, e.to_string())
            .exit();
    }

    let client = DevOpsClient::new(&config).context("Failed to create Azure DevOps client")?;
    let mut manager = EnvironmentManager::new(client, std::io::stdout().lock());

    commands::handle_command(cli.command, &mut manager).await?;
    Ok(())
}
