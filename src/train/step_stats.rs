use serde::{Deserialize, Serialize};

/// Progress record emitted by `train_loop` every `report_every` steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepStats {
    /// 1-based step number.
    pub step: usize,
    /// Total steps requested for this run.
    pub total_steps: usize,
    /// Batch cost after this step's update.
    pub cost: f64,
    /// Wall-clock time since the run started, in milliseconds.
    pub elapsed_ms: u64,
}
