//! Project workspace layout and lifecycle.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Name of the network registry file generated by the scaffolding tool.
pub const NETWORKS_FILENAME: &str = "networks.json";
/// Name of the deployment manifest generated by the scaffolding tool.
pub const MANIFEST_FILENAME: &str = "subgraph.yaml";

/// The on-disk workspace of a single subgraph project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectWorkspace {
    /// `<workspace-root>/<project-name>`.
    pub project_dir: PathBuf,
    /// Path of the network registry file inside the project.
    pub networks_file: PathBuf,
    /// Path of the deployment manifest inside the project.
    pub manifest_file: PathBuf,
}

impl ProjectWorkspace {
    /// Compute the workspace paths for a project under `root`.
    pub fn new(root: &Path, project_name: &str) -> Self {
        let project_dir = root.join(project_name);
        Self {
            networks_file: project_dir.join(NETWORKS_FILENAME),
            manifest_file: project_dir.join(MANIFEST_FILENAME),
            project_dir,
        }
    }

    /// Remove a stale project directory so the run starts from a clean
    /// skeleton.
    ///
    /// Deletion is unconditional and happens before the scaffolding command
    /// executes.
    pub fn scrub(&self) -> Result<()> {
        if self.project_dir.exists() {
            tracing::info!(
                path = %self.project_dir.display(),
                "Removing stale project directory"
            );
            std::fs::remove_dir_all(&self.project_dir).context(format!(
                "Failed to remove stale project directory {}",
                self.project_dir.display()
            ))?;
        }
        Ok(())
    }
}
