//! Integration tests for graphup-deploy.
//!
//! These tests drive the full pipeline against a stub graph CLI (a shell
//! script that fabricates the scaffold output and records every
//! invocation), so no real graph-node or chain endpoint is needed.

use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

use anyhow::{Context, Result};
use graphup_deploy::{Deployer, DeployerBuilder, GraphCliConfig, Stage, StageStatus};
use rand::Rng;
use serde_json::Value;
use tempdir::TempDir;

const CONTRACT_ADDRESS: &str = "0xAbCd000000000000000000000000000000000001";

/// What the scaffolding tool writes for `networks.json` with the fixed
/// placeholder flags.
const SCAFFOLD_NETWORKS: &str = r#"{
  "base-sepolia": {
    "AssetMetadata": {
      "address": "0x936657D0FD1b3aa305EB0cd71830dF16A010A08e",
      "startBlock": 13067270
    }
  }
}"#;

/// What the scaffolding tool writes for `subgraph.yaml` with the fixed
/// placeholder flags.
const SCAFFOLD_MANIFEST: &str = r#"specVersion: 1.3.0
schema:
  file: ./schema.graphql
dataSources:
  - kind: ethereum
    name: demo
    network: base-sepolia
    source:
      address: "0x936657D0FD1b3aa305EB0cd71830dF16A010A08e"
      abi: demo
      startBlock: 13067270
"#;

/// Test setup context containing common test infrastructure.
struct TestContext {
    root: TempDir,
    project_name: String,
    workspace_root: PathBuf,
    graph_bin: PathBuf,
    log_path: PathBuf,
}

impl TestContext {
    /// Initialize a new test context with a unique project name.
    fn new(test_prefix: &str) -> Result<Self> {
        let project_name = format!(
            "{}-{}",
            test_prefix,
            rand::rng().random_range(100000..=999999)
        );
        let root = TempDir::new("graphup-test").context("Failed to create temp dir")?;
        let workspace_root = root.path().join("subgraph");
        let graph_bin = root.path().join("graph");
        let log_path = root.path().join("graph-invocations.log");

        Ok(Self {
            root,
            project_name,
            workspace_root,
            graph_bin,
            log_path,
        })
    }

    fn project_dir(&self) -> PathBuf {
        self.workspace_root.join(&self.project_name)
    }

    /// Install a stub graph CLI.
    ///
    /// The stub appends every invocation to a log file; `init` fabricates
    /// the scaffold output; the subcommand named in `fail_on` exits 1.
    fn install_stub_graph(&self, fail_on: Option<&str>) -> Result<()> {
        let networks_template = self.root.path().join("networks.template.json");
        let manifest_template = self.root.path().join("subgraph.template.yaml");
        std::fs::write(&networks_template, SCAFFOLD_NETWORKS)?;
        std::fs::write(&manifest_template, SCAFFOLD_MANIFEST)?;

        let fail_arm = fail_on
            .map(|subcommand| format!("  {subcommand})\n    exit 1\n    ;;\n"))
            .unwrap_or_default();

        let script = format!(
            "#!/bin/sh\n\
             echo \"$*\" >> \"{log}\"\n\
             case \"$1\" in\n\
             {fail_arm}  init)\n\
             \x20   if [ -e \"{project}\" ]; then echo \"PRE-EXISTING\" >> \"{log}\"; fi\n\
             \x20   mkdir -p \"{project}\"\n\
             \x20   cp \"{networks}\" \"{project}/networks.json\"\n\
             \x20   cp \"{manifest}\" \"{project}/subgraph.yaml\"\n\
             \x20   ;;\n\
             esac\n\
             exit 0\n",
            log = self.log_path.display(),
            project = self.project_dir().display(),
            networks = networks_template.display(),
            manifest = manifest_template.display(),
        );

        std::fs::write(&self.graph_bin, script)?;
        let mut perms = std::fs::metadata(&self.graph_bin)?.permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&self.graph_bin, perms)?;
        Ok(())
    }

    /// Build a standard deployer for testing, with an explicit start block
    /// so the chain endpoint is never queried.
    async fn build_deployer(&self) -> Result<Deployer> {
        DeployerBuilder::new(
            "abi.json",
            CONTRACT_ADDRESS,
            "https://rpc.example",
            "1.2.3.4",
            self.project_name.as_str(),
        )
        .network("mainnet")
        .start_block(9_000_000)
        .workspace_root(&self.workspace_root)
        .graph(GraphCliConfig {
            bin: self.graph_bin.display().to_string(),
            version_label: "v0.0.1".to_string(),
        })
        .build()
        .await
        .context("Failed to build deployer")
    }

    /// The stub's invocation log, one line per graph command.
    fn invocations(&self) -> Result<Vec<String>> {
        let log = std::fs::read_to_string(&self.log_path)
            .context("Stub graph CLI was never invoked")?;
        Ok(log.lines().map(str::to_string).collect())
    }
}

#[tokio::test]
async fn test_provision_end_to_end() -> Result<()> {
    let ctx = TestContext::new("e2e")?;
    ctx.install_stub_graph(None)?;

    let deployer = ctx.build_deployer().await?;
    let report = deployer.provision().await?;

    assert!(report.all_ok());
    assert_eq!(report.stages().len(), 7);

    // Registry carries the resolved binding, scaffold entry untouched.
    let registry: Value = serde_json::from_str(&std::fs::read_to_string(
        ctx.project_dir().join("networks.json"),
    )?)?;
    assert_eq!(
        registry["mainnet"]["AssetMetadata"]["address"],
        CONTRACT_ADDRESS
    );
    assert_eq!(registry["mainnet"]["AssetMetadata"]["startBlock"], 9_000_000);
    assert_eq!(
        registry["base-sepolia"]["AssetMetadata"]["startBlock"],
        13067270
    );

    // Manifest aligned with the resolved parameters.
    let manifest = std::fs::read_to_string(ctx.project_dir().join("subgraph.yaml"))?;
    assert!(manifest.contains("network: mainnet"));
    assert!(manifest.contains("startBlock: 9000000"));
    assert!(manifest.contains(&format!("address: \"{CONTRACT_ADDRESS}\"")));
    assert!(manifest.contains("specVersion: 1.0.0"));

    // All five graph commands were attempted, in order, against the
    // configured endpoints.
    let invocations = ctx.invocations()?;
    assert_eq!(invocations.len(), 5);
    assert!(invocations[0].starts_with("init"));
    assert!(invocations[0].contains("--skip-git"));
    assert!(invocations[0].contains("--index-events"));
    assert_eq!(invocations[1], "codegen");
    assert_eq!(invocations[2], "build");
    assert!(invocations[3].starts_with("create --node http://1.2.3.4:8020/"));
    assert!(invocations[4].starts_with("deploy --node http://1.2.3.4:8020/"));
    assert!(invocations[4].contains("--ipfs http://1.2.3.4:15001"));
    assert!(invocations[4].ends_with("-l v0.0.1"));

    Ok(())
}

#[tokio::test]
async fn test_failing_build_does_not_gate_deploy() -> Result<()> {
    let ctx = TestContext::new("failbuild")?;
    ctx.install_stub_graph(Some("build"))?;

    let deployer = ctx.build_deployer().await?;
    let report = deployer.provision().await?;

    assert!(!report.all_ok());

    let build = report
        .stages()
        .iter()
        .find(|entry| entry.stage == Stage::Build)
        .context("build stage missing from report")?;
    assert_eq!(build.status, StageStatus::Failed);

    // The deploy command was still attempted and succeeded.
    let deploy = report
        .stages()
        .iter()
        .find(|entry| entry.stage == Stage::Deploy)
        .context("deploy stage missing from report")?;
    assert_eq!(deploy.status, StageStatus::Ok);
    assert!(
        ctx.invocations()?
            .iter()
            .any(|line| line.starts_with("deploy"))
    );

    Ok(())
}

#[tokio::test]
async fn test_stale_project_dir_is_scrubbed_before_scaffolding() -> Result<()> {
    let ctx = TestContext::new("scrub")?;
    ctx.install_stub_graph(None)?;

    let stale = ctx.project_dir().join("generated");
    std::fs::create_dir_all(&stale)?;
    std::fs::write(stale.join("stale.ts"), "stale")?;

    let deployer = ctx.build_deployer().await?;
    deployer.provision().await?;

    // The stub logs PRE-EXISTING when the project directory survived until
    // the scaffold command ran.
    assert!(
        !ctx.invocations()?
            .iter()
            .any(|line| line.contains("PRE-EXISTING"))
    );
    assert!(!ctx.project_dir().join("generated").exists());

    Ok(())
}

#[tokio::test]
async fn test_scaffold_failure_aborts_on_registry_patch() -> Result<()> {
    let ctx = TestContext::new("failinit")?;
    ctx.install_stub_graph(Some("init"))?;

    let deployer = ctx.build_deployer().await?;
    let err = deployer
        .provision()
        .await
        .expect_err("no registry to patch");

    assert!(err.to_string().contains("network registry"));

    Ok(())
}

#[tokio::test]
async fn test_validation_failure_leaves_no_filesystem_trace() -> Result<()> {
    let ctx = TestContext::new("novalidate")?;

    let result = DeployerBuilder::new(
        "abi.json",
        CONTRACT_ADDRESS,
        "https://rpc.example",
        "",
        ctx.project_name.as_str(),
    )
    .network("mainnet")
    .start_block(1)
    .workspace_root(&ctx.workspace_root)
    .build()
    .await;

    assert!(result.is_err());
    assert!(!ctx.workspace_root.exists());

    Ok(())
}

#[tokio::test]
async fn test_config_round_trip() -> Result<()> {
    let ctx = TestContext::new("conf")?;

    let deployer = ctx.build_deployer().await?;
    let config_path = ctx.root.path().join("Graphup.toml");
    deployer.save_to_file(&config_path)?;

    let loaded = Deployer::load_from_file(&config_path)?;
    assert_eq!(loaded, deployer);

    Ok(())
}
