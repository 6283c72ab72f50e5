//! Deployment manifest (`subgraph.yaml`) patching.
//!
//! The manifest is treated as raw text: each field is located by the exact
//! literal the scaffolding tool emits for the fixed placeholder flags and
//! replaced wholesale. A field whose placeholder is gone but whose target
//! value is already present counts as up to date, so re-running the patch
//! changes nothing.

use std::path::Path;

use anyhow::{Context, Result};

use crate::{
    SCAFFOLD_CONTRACT_ADDRESS, SCAFFOLD_NETWORK, SCAFFOLD_SPEC_VERSION, SCAFFOLD_START_BLOCK,
    TARGET_SPEC_VERSION,
};

/// One literal substitution in the manifest text.
struct FieldPatch {
    field: &'static str,
    placeholder: String,
    replacement: String,
}

fn field_patches(network: &str, address: &str, start_block: u64) -> Vec<FieldPatch> {
    vec![
        FieldPatch {
            field: "network",
            placeholder: format!("network: {SCAFFOLD_NETWORK}"),
            replacement: format!("network: {network}"),
        },
        FieldPatch {
            field: "startBlock",
            placeholder: format!("startBlock: {SCAFFOLD_START_BLOCK}"),
            replacement: format!("startBlock: {start_block}"),
        },
        FieldPatch {
            field: "address",
            placeholder: format!("address: \"{SCAFFOLD_CONTRACT_ADDRESS}\""),
            replacement: format!("address: \"{address}\""),
        },
        FieldPatch {
            field: "specVersion",
            placeholder: format!("specVersion: {SCAFFOLD_SPEC_VERSION}"),
            replacement: format!("specVersion: {TARGET_SPEC_VERSION}"),
        },
    ]
}

/// Align the manifest's network, start block, contract address and spec
/// version with the resolved deployment parameters.
///
/// The four substitutions are independent, order-independent and
/// non-overlapping. Fails when a field can neither be found by its scaffold
/// placeholder nor already carries the target value, naming every such
/// field.
pub fn patch_manifest(
    path: &Path,
    network: &str,
    address: &str,
    start_block: u64,
) -> Result<()> {
    tracing::info!(path = %path.display(), "Updating manifest");

    let original = std::fs::read_to_string(path)
        .context(format!("Failed to read manifest {}", path.display()))?;

    let mut text = original.clone();
    let mut missing = Vec::new();
    for patch in field_patches(network, address, start_block) {
        if text.contains(&patch.placeholder) {
            text = text.replace(&patch.placeholder, &patch.replacement);
        } else if text.contains(&patch.replacement) {
            tracing::debug!(field = patch.field, "Manifest field already up to date");
        } else {
            missing.push(patch.field);
        }
    }

    if !missing.is_empty() {
        anyhow::bail!(
            "Manifest {} does not contain the expected placeholder for: {} (was the scaffold template changed?)",
            path.display(),
            missing.join(", ")
        );
    }

    if text != original {
        std::fs::write(path, &text)
            .context(format!("Failed to write manifest {}", path.display()))?;
        tracing::info!(path = %path.display(), "Manifest updated");
    } else {
        tracing::info!(path = %path.display(), "Manifest already up to date");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    fn scaffold_manifest() -> &'static str {
        r#"specVersion: 1.3.0
indexerHints:
  prune: auto
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
    mapping:
      kind: ethereum/events
      apiVersion: 0.0.9
      language: wasm/assemblyscript
"#
    }

    fn write_manifest(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("subgraph.yaml");
        std::fs::write(&path, content).expect("write");
        path
    }

    #[test]
    fn test_patch_replaces_all_four_fields() {
        let dir = TempDir::new("graphup-manifest").expect("tempdir");
        let path = write_manifest(&dir, scaffold_manifest());

        patch_manifest(&path, "mainnet", "0xabc", 9_000_000).expect("patch");

        let patched = std::fs::read_to_string(&path).expect("read");
        assert!(patched.contains("network: mainnet"));
        assert!(patched.contains("startBlock: 9000000"));
        assert!(patched.contains("address: \"0xabc\""));
        assert!(patched.contains("specVersion: 1.0.0"));
        assert!(!patched.contains("base-sepolia"));
        assert!(!patched.contains("13067270"));
    }

    #[test]
    fn test_patch_is_idempotent() {
        let dir = TempDir::new("graphup-manifest").expect("tempdir");
        let path = write_manifest(&dir, scaffold_manifest());

        patch_manifest(&path, "mainnet", "0xabc", 9_000_000).expect("first patch");
        let first = std::fs::read_to_string(&path).expect("read");

        patch_manifest(&path, "mainnet", "0xabc", 9_000_000).expect("second patch");
        let second = std::fs::read_to_string(&path).expect("read");

        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_placeholder_names_the_field() {
        let dir = TempDir::new("graphup-manifest").expect("tempdir");
        let without_start_block = scaffold_manifest().replace("      startBlock: 13067270\n", "");
        let path = write_manifest(&dir, &without_start_block);

        let err = patch_manifest(&path, "mainnet", "0xabc", 9_000_000)
            .expect_err("placeholder is gone");
        assert!(err.to_string().contains("startBlock"));
        assert!(!err.to_string().contains("network,"));
    }

    #[test]
    fn test_missing_manifest_file_is_an_error() {
        let dir = TempDir::new("graphup-manifest").expect("tempdir");
        let path = dir.path().join("subgraph.yaml");

        let result = patch_manifest(&path, "mainnet", "0xabc", 9_000_000);
        assert!(result.is_err());
    }
}
