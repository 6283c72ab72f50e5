//! Network registry (`networks.json`) patching.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{Map, Value, json};

use crate::DATASET_KEY;

/// Bind `network` to `address`/`start_block` in the registry file.
///
/// The registry is parsed as a whole, the target network's entry is
/// overwritten under the fixed dataset key, and the structure is written
/// back pretty-printed. Entries for other networks are left untouched.
pub fn patch_registry(
    path: &Path,
    network: &str,
    address: &str,
    start_block: u64,
) -> Result<()> {
    tracing::info!(path = %path.display(), network, "Updating network registry");

    let raw = std::fs::read_to_string(path).context(format!(
        "Failed to read network registry {}",
        path.display()
    ))?;
    let mut registry: Map<String, Value> = serde_json::from_str(&raw).context(format!(
        "Failed to parse network registry {}",
        path.display()
    ))?;

    registry.insert(
        network.to_string(),
        json!({
            DATASET_KEY: {
                "address": address,
                "startBlock": start_block,
            }
        }),
    );

    let pretty =
        serde_json::to_string_pretty(&registry).context("Failed to serialize network registry")?;
    std::fs::write(path, pretty).context(format!(
        "Failed to write network registry {}",
        path.display()
    ))?;

    tracing::info!(path = %path.display(), "Network registry updated");
    Ok(())
}
