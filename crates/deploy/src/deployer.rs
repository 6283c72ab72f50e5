use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::graph::GraphCli;
use crate::report::{RunReport, Stage, StageStatus};
use crate::workspace::ProjectWorkspace;
use crate::{GraphCliConfig, manifest, networks};

/// The default name for the graphup configuration file.
pub const GRAPHUP_CONF_FILENAME: &str = "Graphup.toml";

/// Main deployer that provisions a subgraph deployment end to end.
///
/// This struct contains every resolved parameter of a run and can be
/// serialized to/from TOML format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployer {
    /// Path to the contract ABI the project is scaffolded from.
    pub abi_path: PathBuf,
    /// Address of the contract to index.
    pub contract_address: String,
    /// Chain JSON-RPC endpoint URL.
    pub rpc_url: String,
    /// Host of the target graph-node.
    pub node_host: String,
    /// Admin port of the target graph-node.
    pub node_port: u16,
    /// Project identifier, used as the workspace directory name.
    pub project_name: String,
    /// The network the deployed subgraph indexes.
    pub network: String,
    /// Chain height event indexing starts from.
    pub start_block: u64,
    /// Parent directory project skeletons are generated under.
    pub workspace_root: PathBuf,
    /// External graph CLI configuration.
    pub graph: GraphCliConfig,
}

impl Deployer {
    /// Save the configuration to a TOML file.
    pub fn save_to_file(&self, path: &PathBuf) -> Result<()> {
        let content =
            toml::to_string_pretty(self).context("Failed to serialize deployer config to TOML")?;
        std::fs::write(path, content)
            .context(format!("Failed to write config to {}", path.display()))?;
        tracing::info!(path = %path.display(), "Configuration saved");
        Ok(())
    }

    /// Load the configuration from a TOML file.
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            return Err(anyhow::anyhow!(
                "Configuration file or directory not found: {}",
                path.display()
            ));
        }

        let config_path = if path.is_dir() {
            path.join(GRAPHUP_CONF_FILENAME)
        } else {
            path.to_path_buf()
        };

        let content = std::fs::read_to_string(config_path)
            .context(format!("Failed to read config from {}", path.display()))?;
        let config: Self =
            toml::from_str(&content).context("Failed to parse config file as TOML")?;
        tracing::info!(path = %path.display(), "Configuration loaded");
        Ok(config)
    }

    /// Save the deployer's configuration to the default location
    /// (Graphup.toml in the workspace root).
    pub fn save_config(&self) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.workspace_root).context(format!(
            "Failed to create workspace root {}",
            self.workspace_root.display()
        ))?;
        let config_path = self.workspace_root.join(GRAPHUP_CONF_FILENAME);
        self.save_to_file(&config_path)?;
        Ok(config_path)
    }
}

impl Deployer {
    /// Run the full provisioning pipeline.
    ///
    /// External tool failures are captured in the returned report and do not
    /// stop the pipeline. Registry and manifest patch failures abort with an
    /// error, as does a scrub failure.
    pub async fn provision(&self) -> Result<RunReport> {
        let mut report = RunReport::new();

        let workspace = ProjectWorkspace::new(&self.workspace_root, &self.project_name);
        let graph = GraphCli::new(&self.graph, &self.node_host, self.node_port);

        tracing::info!(
            project = %self.project_name,
            contract = %self.contract_address,
            start_block = self.start_block,
            networks_file = %workspace.networks_file.display(),
            manifest_file = %workspace.manifest_file.display(),
            "Starting provisioning..."
        );

        // Always scaffold from a clean skeleton.
        workspace.scrub()?;

        tracing::info!("Scaffolding project skeleton...");
        let outcome = graph
            .init(&self.abi_path, &self.project_name, &workspace.project_dir)
            .await;
        report.record_command(Stage::Scaffold, &outcome);

        networks::patch_registry(
            &workspace.networks_file,
            &self.network,
            &self.contract_address,
            self.start_block,
        )?;
        report.record(Stage::RegistryPatch, StageStatus::Ok, None);

        manifest::patch_manifest(
            &workspace.manifest_file,
            &self.network,
            &self.contract_address,
            self.start_block,
        )?;
        report.record(Stage::ManifestPatch, StageStatus::Ok, None);

        tracing::info!(node_url = %graph.node_url(), "Building and publishing subgraph...");

        let outcome = graph.codegen(&workspace.project_dir).await;
        report.record_command(Stage::Codegen, &outcome);

        let outcome = graph.build(&workspace.project_dir).await;
        report.record_command(Stage::Build, &outcome);

        let outcome = graph.create(&self.project_name, &workspace.project_dir).await;
        report.record_command(Stage::Create, &outcome);

        let outcome = graph.deploy(&self.project_name, &workspace.project_dir).await;
        report.record_command(Stage::Deploy, &outcome);

        Ok(report)
    }
}
