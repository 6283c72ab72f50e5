use clap::Parser;
use graphup_deploy::{
    DEFAULT_GRAPH_BIN, DEFAULT_NODE_PORT, DEFAULT_VERSION_LABEL, DEFAULT_WORKSPACE_ROOT,
};
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(name = "graphup")]
#[command(
    author,
    version,
    about = "Provision a subgraph deployment for a smart contract in one run"
)]
pub struct Cli {
    /// The verbosity level.
    #[arg(short, long, env = "GRAPHUP_VERBOSITY", default_value_t = LevelFilter::INFO)]
    pub verbosity: LevelFilter,

    /// Path to the contract ABI the project is scaffolded from.
    #[arg(long, env = "GRAPHUP_ABI_PATH", required_unless_present = "config")]
    pub abi: Option<String>,

    /// Address of the contract to index.
    #[arg(long, env = "GRAPHUP_CONTRACT_ADDRESS", required_unless_present = "config")]
    pub address: Option<String>,

    /// The URL of a chain JSON-RPC endpoint.
    ///
    /// Queried for the current block height when no start block is provided.
    #[arg(long, alias = "rpc", env = "GRAPHUP_RPC_URL", required_unless_present = "config")]
    pub rpc_url: Option<String>,

    /// Host of the target graph-node.
    #[arg(long, alias = "host", env = "GRAPHUP_NODE_HOST", required_unless_present = "config")]
    pub node_host: Option<String>,

    /// Admin port of the target graph-node.
    #[arg(long, alias = "port", env = "GRAPHUP_NODE_PORT", default_value_t = DEFAULT_NODE_PORT)]
    pub node_port: u16,

    /// Project identifier. Also names the workspace directory the project
    /// skeleton is generated into.
    #[arg(long, visible_alias = "name", env = "GRAPHUP_PROJECT_NAME", required_unless_present = "config")]
    pub project: Option<String>,

    /// The network the deployed subgraph indexes.
    #[arg(long, env = "GRAPHUP_NETWORK", required_unless_present = "config")]
    pub network: Option<String>,

    /// The chain height event indexing starts from.
    ///
    /// If not provided, the chain's current block height is adopted at run
    /// time, so repeated runs resolve different start blocks.
    #[arg(long, env = "GRAPHUP_START_BLOCK")]
    pub start_block: Option<u64>,

    /// The parent directory project skeletons are generated under.
    #[arg(long, alias = "root", env = "GRAPHUP_WORKSPACE_ROOT", default_value = DEFAULT_WORKSPACE_ROOT)]
    pub workspace_root: String,

    /// Version label attached to the deployed subgraph.
    #[arg(long, alias = "label", env = "GRAPHUP_VERSION_LABEL", default_value = DEFAULT_VERSION_LABEL)]
    pub version_label: String,

    /// Name or path of the external graph CLI binary.
    #[arg(long, env = "GRAPHUP_GRAPH_BIN", default_value = DEFAULT_GRAPH_BIN)]
    pub graph_bin: String,

    /// Path to an existing Graphup.toml configuration file to load.
    ///
    /// When provided, the run uses the configuration from this file instead
    /// of resolving a new one from CLI arguments.
    #[arg(long, alias = "conf", env = "GRAPHUP_CONFIG")]
    pub config: Option<String>,
}
