//! Builder module for creating a [`Deployer`] configuration.
//!
//! This module provides the [`DeployerBuilder`] struct which validates the
//! resolved parameters, sanitizes the project name, and fetches the current
//! chain height when no start block is configured.

use std::path::PathBuf;

use anyhow::{Context, Result};
use url::Url;

use crate::{
    DEFAULT_NODE_PORT, DEFAULT_WORKSPACE_ROOT, Deployer, GraphCliConfig, rpc,
};

/// Builder for creating a [`Deployer`] configuration.
///
/// # Example
///
/// ```no_run
/// use graphup_deploy::DeployerBuilder;
///
/// # async fn example() -> anyhow::Result<()> {
/// let deployer = DeployerBuilder::new(
///     "abi.json",
///     "0xabc",
///     "https://rpc.example",
///     "1.2.3.4",
///     "demo",
/// )
/// .network("mainnet")
/// .start_block(9_000_000)
/// .build()
/// .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DeployerBuilder {
    /// Path to the contract ABI (required).
    abi_path: String,
    /// Address of the contract to index (required).
    contract_address: String,
    /// Chain JSON-RPC endpoint URL (required).
    rpc_url: String,
    /// Host of the target graph-node (required).
    node_host: String,
    /// Project identifier (required).
    project_name: String,
    /// Target network name.
    network: Option<String>,
    /// Graph-node admin port.
    node_port: u16,
    /// Explicit start block; the chain height is adopted when unset.
    start_block: Option<u64>,
    /// Parent directory project skeletons are generated under.
    workspace_root: PathBuf,
    /// External graph CLI configuration.
    graph: GraphCliConfig,
}

impl DeployerBuilder {
    /// Create a new [`DeployerBuilder`] with the required parameters.
    pub fn new(
        abi_path: impl Into<String>,
        contract_address: impl Into<String>,
        rpc_url: impl Into<String>,
        node_host: impl Into<String>,
        project_name: impl Into<String>,
    ) -> Self {
        Self {
            abi_path: abi_path.into(),
            contract_address: contract_address.into(),
            rpc_url: rpc_url.into(),
            node_host: node_host.into(),
            project_name: project_name.into(),
            network: None,
            node_port: DEFAULT_NODE_PORT,
            start_block: None,
            workspace_root: PathBuf::from(DEFAULT_WORKSPACE_ROOT),
            graph: GraphCliConfig::default(),
        }
    }

    /// Set the target network name.
    pub fn network(mut self, network: impl Into<String>) -> Self {
        self.network = Some(network.into());
        self
    }

    /// Set the graph-node admin port.
    pub fn node_port(mut self, port: u16) -> Self {
        self.node_port = port;
        self
    }

    /// Set the start block explicitly.
    ///
    /// When set, the chain is never queried. When left unset, the chain's
    /// current height is adopted at build time, so repeated runs resolve
    /// different start blocks.
    pub fn start_block(mut self, block: u64) -> Self {
        self.start_block = Some(block);
        self
    }

    /// Set the workspace root project skeletons are generated under.
    pub fn workspace_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.workspace_root = root.into();
        self
    }

    /// Override the graph CLI configuration.
    pub fn graph(mut self, graph: GraphCliConfig) -> Self {
        self.graph = graph;
        self
    }

    /// Build the [`Deployer`] configuration.
    ///
    /// This method:
    /// 1. Rejects missing or empty required parameters before any side effect
    /// 2. Validates the project name as a plain directory name
    /// 3. Fetches the current chain height when no start block is set
    pub async fn build(self) -> Result<Deployer> {
        for (value, name) in [
            (&self.abi_path, "contract ABI path"),
            (&self.contract_address, "contract address"),
            (&self.rpc_url, "chain RPC endpoint"),
            (&self.node_host, "graph-node host"),
            (&self.project_name, "project name"),
        ] {
            if value.trim().is_empty() {
                anyhow::bail!("{name} must not be empty");
            }
        }

        let network = match self.network {
            Some(network) if !network.trim().is_empty() => network,
            _ => anyhow::bail!("target network name must not be empty"),
        };

        validate_project_name(&self.project_name)?;

        Url::parse(&self.rpc_url)
            .context(format!("Invalid chain RPC endpoint: {}", self.rpc_url))?;

        let start_block = match self.start_block {
            Some(block) => block,
            None => rpc::fetch_block_number(&self.rpc_url)
                .await
                .context("Failed to fetch the current block height from the chain RPC endpoint")?,
        };

        tracing::info!(
            project = %self.project_name,
            contract = %self.contract_address,
            network = %network,
            start_block,
            workspace_root = %self.workspace_root.display(),
            "Resolved deployment parameters"
        );

        Ok(Deployer {
            abi_path: PathBuf::from(self.abi_path),
            contract_address: self.contract_address,
            rpc_url: self.rpc_url,
            node_host: self.node_host,
            node_port: self.node_port,
            project_name: self.project_name,
            network,
            start_block,
            workspace_root: self.workspace_root,
            graph: self.graph,
        })
    }
}

/// Reject project names that would escape the workspace root when used as a
/// directory segment.
fn validate_project_name(name: &str) -> Result<()> {
    if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        anyhow::bail!("project name must be a plain directory name, got {name:?}");
    }
    Ok(())
}
