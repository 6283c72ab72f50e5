//! graphup-deploy - Provisioning library for graph-node subgraph deployments.
//!
//! This crate scaffolds a subgraph project from a contract ABI, patches the
//! generated configuration to target a specific network/contract/start block,
//! and drives the build-and-publish sequence against a remote graph-node.

mod deployer;
pub use deployer::{Deployer, GRAPHUP_CONF_FILENAME};

mod builder;
pub use builder::DeployerBuilder;

pub mod graph;
mod manifest;
mod networks;
mod report;
mod rpc;
mod runner;
mod workspace;

pub use graph::{GraphCli, GraphCliConfig};
pub use report::{RunReport, Stage, StageReport, StageStatus};
pub use runner::{CommandOutcome, CommandRunner};
pub use workspace::ProjectWorkspace;

/// Contract address baked into the scaffold invocation; the patchers rewrite
/// it afterwards.
pub const SCAFFOLD_CONTRACT_ADDRESS: &str = "0x936657D0FD1b3aa305EB0cd71830dF16A010A08e";
/// Network baked into the scaffold invocation.
pub const SCAFFOLD_NETWORK: &str = "base-sepolia";
/// Start block baked into the scaffold invocation.
pub const SCAFFOLD_START_BLOCK: u64 = 13067270;
/// Manifest spec version emitted by the scaffolding tool.
pub const SCAFFOLD_SPEC_VERSION: &str = "1.3.0";
/// Manifest spec version understood by the target graph-node.
pub const TARGET_SPEC_VERSION: &str = "1.0.0";
/// Logical dataset key the contract binding is registered under.
pub const DATASET_KEY: &str = "AssetMetadata";
/// Port of the IPFS artifact store `graph deploy` publishes to.
pub const IPFS_PORT: u16 = 15001;

/// Default graph-node admin port.
pub const DEFAULT_NODE_PORT: u16 = 8020;
/// Default version label attached to deployments.
pub const DEFAULT_VERSION_LABEL: &str = "v0.0.1";
/// Default workspace root project skeletons are generated under.
pub const DEFAULT_WORKSPACE_ROOT: &str = "subgraph";
/// Default name of the external graph CLI binary.
pub const DEFAULT_GRAPH_BIN: &str = "graph";
