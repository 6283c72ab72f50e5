//! Per-stage outcome capture for the provisioning pipeline.

use comfy_table::{Table, presets};

use crate::runner::CommandOutcome;

/// A provisioning pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Stage {
    Scaffold,
    RegistryPatch,
    ManifestPatch,
    Codegen,
    Build,
    Create,
    Deploy,
}

/// Outcome of a single stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
    Ok,
    Failed,
}

/// One stage's entry in the run report.
#[derive(Debug, Clone)]
pub struct StageReport {
    pub stage: Stage,
    pub status: StageStatus,
    pub detail: Option<String>,
}

/// Structured record of a provisioning run.
///
/// Tool failures do not stop the pipeline, so the report is what
/// distinguishes a fully successful run from one that completed with
/// suppressed failures.
#[derive(Debug, Default)]
pub struct RunReport {
    stages: Vec<StageReport>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a stage outcome.
    pub fn record(&mut self, stage: Stage, status: StageStatus, detail: Option<String>) {
        self.stages.push(StageReport {
            stage,
            status,
            detail,
        });
    }

    /// Record a stage outcome from an external command invocation.
    pub fn record_command(&mut self, stage: Stage, outcome: &CommandOutcome) {
        let status = if outcome.success {
            StageStatus::Ok
        } else {
            StageStatus::Failed
        };
        self.record(stage, status, outcome.failure.clone());
    }

    /// The recorded stage entries, in pipeline order.
    pub fn stages(&self) -> &[StageReport] {
        &self.stages
    }

    /// Whether every recorded stage succeeded.
    pub fn all_ok(&self) -> bool {
        self.stages
            .iter()
            .all(|entry| entry.status == StageStatus::Ok)
    }

    /// Render the report as a table.
    pub fn render(&self) -> String {
        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL_CONDENSED);
        table.set_header(vec!["stage", "status", "detail"]);
        for entry in &self.stages {
            table.add_row(vec![
                entry.stage.to_string(),
                match entry.status {
                    StageStatus::Ok => "ok".to_string(),
                    StageStatus::Failed => "FAILED".to_string(),
                },
                entry.detail.clone().unwrap_or_default(),
            ]);
        }
        table.to_string()
    }
}
