//! Argument builders for the external graph CLI.

use std::path::Path;

use crate::{SCAFFOLD_CONTRACT_ADDRESS, SCAFFOLD_NETWORK, SCAFFOLD_START_BLOCK};

/// Builder for `graph init` arguments.
#[derive(Debug, Clone)]
pub struct InitCmdBuilder {
    abi_path: String,
    project_name: String,
    project_dir: String,
    protocol: String,
}

impl InitCmdBuilder {
    /// Create a new init command builder.
    pub fn new(
        abi_path: impl AsRef<Path>,
        project_name: impl Into<String>,
        project_dir: impl AsRef<Path>,
    ) -> Self {
        Self {
            abi_path: abi_path.as_ref().display().to_string(),
            project_name: project_name.into(),
            project_dir: project_dir.as_ref().display().to_string(),
            protocol: "ethereum".to_string(),
        }
    }

    /// Override the indexing protocol.
    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    /// Build the argument vector.
    ///
    /// The contract address, network and start block are fixed placeholders
    /// that the patchers rewrite after scaffolding.
    pub fn build(self) -> Vec<String> {
        vec![
            "init".to_string(),
            "--skip-git".to_string(),
            "--protocol".to_string(),
            self.protocol,
            "--from-contract".to_string(),
            SCAFFOLD_CONTRACT_ADDRESS.to_string(),
            "--network".to_string(),
            SCAFFOLD_NETWORK.to_string(),
            "--abi".to_string(),
            self.abi_path,
            format!("--start-block={SCAFFOLD_START_BLOCK}"),
            format!("--contract-name={}", self.project_name),
            "--index-events".to_string(),
            self.project_name,
            self.project_dir,
        ]
    }
}

/// Builder for the remote `graph create`/`graph deploy` commands.
#[derive(Debug, Clone)]
pub struct NodeCmdBuilder {
    node_url: String,
    project_name: String,
}

impl NodeCmdBuilder {
    /// Create a builder targeting a graph-node admin endpoint.
    pub fn new(node_url: impl Into<String>, project_name: impl Into<String>) -> Self {
        Self {
            node_url: node_url.into(),
            project_name: project_name.into(),
        }
    }

    /// `graph create --node <url> <project>`.
    pub fn create(self) -> Vec<String> {
        vec![
            "create".to_string(),
            "--node".to_string(),
            self.node_url,
            self.project_name,
        ]
    }

    /// `graph deploy --node <url> --ipfs <ipfs-url> <project> -l <label>`.
    pub fn deploy(
        self,
        ipfs_url: impl Into<String>,
        version_label: impl Into<String>,
    ) -> Vec<String> {
        vec![
            "deploy".to_string(),
            "--node".to_string(),
            self.node_url,
            "--ipfs".to_string(),
            ipfs_url.into(),
            self.project_name,
            "-l".to_string(),
            version_label.into(),
        ]
    }
}

/// `graph codegen`.
pub fn codegen_cmd() -> Vec<String> {
    vec!["codegen".to_string()]
}

/// `graph build`.
pub fn build_cmd() -> Vec<String> {
    vec!["build".to_string()]
}
