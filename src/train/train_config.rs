use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::error::Result;
use crate::grad::method::GradientMethod;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `steps`         — number of gradient/update iterations over the full batch
/// - `learning_rate` — step size applied to the gradient
/// - `method`        — how the gradient is computed (defaults to back-propagation)
/// - `report_every`  — compute and report the cost every this many steps;
///                     `0` disables progress reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    pub steps: usize,
    pub learning_rate: f64,
    #[serde(default)]
    pub method: GradientMethod,
    #[serde(default)]
    pub report_every: usize,
}

impl TrainConfig {
    /// Creates a `TrainConfig` without progress reports.
    pub fn new(steps: usize, learning_rate: f64, method: GradientMethod) -> Self {
        TrainConfig {
            steps,
            learning_rate,
            method,
            report_every: 0,
        }
    }

    pub fn with_report_every(mut self, report_every: usize) -> Self {
        self.report_every = report_every;
        self
    }

    /// Reads a configuration from a JSON file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<TrainConfig> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Writes the configuration as pretty-printed JSON.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig::new(10_000, 1.0, GradientMethod::BackProp)
    }
}
