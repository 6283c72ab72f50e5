//! graphup is a CLI tool that provisions a graph-node subgraph deployment
//! for a smart contract in one run.

mod cli;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use cli::Cli;
use graphup_deploy::{Deployer, DeployerBuilder, GraphCliConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize the logger.
    tracing_subscriber::fmt()
        .with_max_level(cli.verbosity)
        .init();

    // If a config file is provided, load it and provision
    let deployer = if let Some(config_path) = &cli.config {
        let config_path = PathBuf::from(config_path);
        let deployer = Deployer::load_from_file(&config_path)?;

        tracing::info!(
            config_path = %config_path.display(),
            project = %deployer.project_name,
            network = %deployer.network,
            start_block = deployer.start_block,
            "Loading deployment from config file..."
        );

        deployer
    } else {
        // Otherwise, resolve a new deployment from CLI arguments
        let mut builder = DeployerBuilder::new(
            cli.abi.unwrap_or_default(),
            cli.address.unwrap_or_default(),
            cli.rpc_url.unwrap_or_default(),
            cli.node_host.unwrap_or_default(),
            cli.project.unwrap_or_default(),
        )
        .network(cli.network.unwrap_or_default())
        .node_port(cli.node_port)
        .workspace_root(cli.workspace_root)
        .graph(GraphCliConfig {
            bin: cli.graph_bin,
            version_label: cli.version_label,
        });

        // Set the start block if provided; otherwise the builder adopts the
        // chain's current height.
        if let Some(start_block) = cli.start_block {
            builder = builder.start_block(start_block);
        }

        let deployer = builder.build().await?;

        // Save the configuration so the run can be replayed with --config.
        deployer.save_config()?;

        deployer
    };

    let report = deployer.provision().await?;

    println!("{}", report.render());

    if report.all_ok() {
        tracing::info!("Subgraph created and deployed successfully");
    } else {
        tracing::warn!("Provisioning completed with failed stages, see the report above");
    }

    Ok(())
}
