//! External graph CLI surface.
//!
//! Layout:
//! - `cmd.rs` - argument builders for each graph subcommand
//! - `mod.rs` - config and invocation logic

pub mod cmd;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::runner::{CommandOutcome, CommandRunner};
use crate::{DEFAULT_GRAPH_BIN, DEFAULT_VERSION_LABEL, IPFS_PORT};

use cmd::{InitCmdBuilder, NodeCmdBuilder};

/// Configuration for the external graph CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphCliConfig {
    /// Name or path of the graph CLI binary.
    pub bin: String,
    /// Version label attached to deployments.
    pub version_label: String,
}

impl Default for GraphCliConfig {
    fn default() -> Self {
        Self {
            bin: DEFAULT_GRAPH_BIN.to_string(),
            version_label: DEFAULT_VERSION_LABEL.to_string(),
        }
    }
}

/// Handle for driving the graph CLI against a fixed graph-node endpoint.
pub struct GraphCli {
    runner: CommandRunner,
    node_url: String,
    ipfs_url: String,
    version_label: String,
}

impl GraphCli {
    /// Create a handle targeting `http://<host>:<port>/`.
    pub fn new(config: &GraphCliConfig, node_host: &str, node_port: u16) -> Self {
        Self {
            runner: CommandRunner::new(&config.bin),
            node_url: format!("http://{node_host}:{node_port}/"),
            ipfs_url: format!("http://{node_host}:{IPFS_PORT}"),
            version_label: config.version_label.clone(),
        }
    }

    /// The graph-node admin endpoint the remote commands target.
    pub fn node_url(&self) -> &str {
        &self.node_url
    }

    /// Scaffold a fresh project skeleton from a contract ABI.
    pub async fn init(
        &self,
        abi_path: &Path,
        project_name: &str,
        project_dir: &Path,
    ) -> CommandOutcome {
        let args = InitCmdBuilder::new(abi_path, project_name, project_dir).build();
        self.runner.run(&args, None).await
    }

    /// Generate mapping types inside the project directory.
    pub async fn codegen(&self, project_dir: &Path) -> CommandOutcome {
        self.runner.run(&cmd::codegen_cmd(), Some(project_dir)).await
    }

    /// Compile the subgraph inside the project directory.
    pub async fn build(&self, project_dir: &Path) -> CommandOutcome {
        self.runner.run(&cmd::build_cmd(), Some(project_dir)).await
    }

    /// Register the project name on the remote graph-node.
    pub async fn create(&self, project_name: &str, project_dir: &Path) -> CommandOutcome {
        let args = NodeCmdBuilder::new(self.node_url.as_str(), project_name).create();
        self.runner.run(&args, Some(project_dir)).await
    }

    /// Publish the built subgraph to the remote graph-node.
    pub async fn deploy(&self, project_name: &str, project_dir: &Path) -> CommandOutcome {
        let args = NodeCmdBuilder::new(self.node_url.as_str(), project_name)
            .deploy(self.ipfs_url.as_str(), self.version_label.as_str());
        self.runner.run(&args, Some(project_dir)).await
    }
}
